// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP server startup and shutdown

use anyhow::{Context, Result};
use std::future::Future;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, info_span};

use telemetron_core::application::repository_factory::create_system_state_service;
use telemetron_core::domain::config::TelemetronConfig;
use telemetron_core::presentation::api;

/// Validate `config`, bind its address and serve until Ctrl+C or SIGTERM.
pub async fn start_server(config: TelemetronConfig) -> Result<()> {
    config
        .validate()
        .context("Configuration validation failed")?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Telemetron API listening on {}", addr);

    run(listener, &config, shutdown_signal()).await
}

/// Serve the API on `listener` until `shutdown` completes.
///
/// The data sources are built here and closed once the server has drained.
pub async fn run<F>(listener: TcpListener, config: &TelemetronConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let service = create_system_state_service(config, info_span!("system_state"))
        .context("Failed to initialize data sources")?;

    let served = axum::serve(listener, api::app(service.clone()))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed");

    service.close();
    info!("Telemetron API shut down");

    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
