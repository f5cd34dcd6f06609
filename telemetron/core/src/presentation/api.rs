// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::application::system_state::SystemStateService;

/// Body served at `/`
pub const INDEX_TEXT: &str = "Telemetron API - visit /system/state";

const INTERNAL_ERROR_TEXT: &str = "Internal server error";

pub struct AppState {
    pub system_state_service: Arc<dyn SystemStateService>,
    pub start_time: Instant,
}

pub fn app(service: Arc<dyn SystemStateService>) -> Router {
    let state = Arc::new(AppState {
        system_state_service: service,
        start_time: Instant::now(),
    });

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/system/state", get(get_system_state))
        .route("/agents/{name}", get(get_agent))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    INDEX_TEXT
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

async fn get_system_state(State(state): State<Arc<AppState>>) -> Response {
    match state.system_state_service.get_system_state().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to get system state");
            internal_error()
        }
    }
}

async fn get_agent(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    match state.system_state_service.get_agent(&name).await {
        Ok(Some(agent)) => Json(agent).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("Agent not found: {name}")).into_response(),
        Err(e) => {
            error!(error = %e, agent = %name, "Failed to get agent");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_TEXT).into_response()
}
