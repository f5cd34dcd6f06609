// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates the concrete data sources from configuration and wires them into
//! the system state service. Keeps the domain layer free of infrastructure
//! dependencies: the domain defines the traits, this module picks the
//! implementations.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Composition root for the aggregation core

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, Span};

use crate::application::snapshot_cache::CachingSystemStateService;
use crate::application::system_state::{StandardSystemStateService, SystemStateService};
use crate::domain::config::{ConfigError, TelemetronConfig};
use crate::domain::repository::{
    AgentRepository, DataSourceBackend, LiteLLMRepository, QueueRepository, WorkloadRepository,
};
use crate::infrastructure::repositories::{
    seed, ActivitySimulatorConfig, SimulatedAgentRepository, SimulatedLiteLLMRepository,
    SimulatedQueueRepository, SimulatedWorkloadRepository,
};

/// One instance of each data source
#[derive(Clone)]
pub struct DataSources {
    pub agents: Arc<dyn AgentRepository>,
    pub workloads: Arc<dyn WorkloadRepository>,
    pub queues: Arc<dyn QueueRepository>,
    pub litellm: Arc<dyn LiteLLMRepository>,
}

/// Creates the data sources for the configured backend
///
/// Must run inside a Tokio runtime for the agent simulator to start.
pub fn create_data_sources(config: &TelemetronConfig, span: Span) -> Result<DataSources, ConfigError> {
    match config.backend()? {
        DataSourceBackend::Simulated => {
            let simulator = ActivitySimulatorConfig::with_interval(config.activity_interval());
            Ok(DataSources {
                agents: Arc::new(SimulatedAgentRepository::with_agents(
                    seed::agents(Utc::now()),
                    simulator,
                    span,
                )),
                workloads: Arc::new(SimulatedWorkloadRepository::new()),
                queues: Arc::new(SimulatedQueueRepository::new()),
                litellm: Arc::new(SimulatedLiteLLMRepository::new()),
            })
        }
    }
}

/// Builds the system state service, with a snapshot cache when a TTL is set
pub fn create_system_state_service(
    config: &TelemetronConfig,
    span: Span,
) -> Result<Arc<dyn SystemStateService>, ConfigError> {
    let sources = create_data_sources(config, span.clone())?;
    let service: Arc<dyn SystemStateService> = Arc::new(
        StandardSystemStateService::new(
            sources.agents,
            sources.workloads,
            sources.queues,
            sources.litellm,
        )
        .with_span(span),
    );

    let ttl = config.cache_ttl();
    if ttl.is_zero() {
        return Ok(service);
    }
    info!(ttl_seconds = ttl.as_secs(), "System state cache enabled");
    Ok(Arc::new(CachingSystemStateService::new(service, ttl)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_simulated_sources() {
        let config = TelemetronConfig::default();
        let sources = create_data_sources(&config, Span::none()).unwrap();

        assert_eq!(sources.agents.get_all().await.unwrap().len(), 2);
        assert_eq!(sources.workloads.get_all().await.unwrap().len(), 1);
        assert_eq!(sources.queues.get_all().await.unwrap().len(), 2);
        assert_eq!(sources.litellm.get_all().await.unwrap().len(), 3);
        sources.agents.close();
    }

    #[tokio::test]
    async fn test_mock_data_disabled_is_rejected() {
        let mut config = TelemetronConfig::default();
        config.data_sources.mock_data = false;

        assert!(matches!(
            create_data_sources(&config, Span::none()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_unvalidated_huge_interval_keeps_sources_usable() {
        let mut config = TelemetronConfig::default();
        config.data_sources.activity_interval_seconds = u64::MAX;

        let sources = create_data_sources(&config, Span::none()).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        assert_eq!(sources.agents.get_all().await.unwrap().len(), 2);
        sources.agents.close();
    }

    #[tokio::test]
    async fn test_create_service_with_cache() {
        let mut config = TelemetronConfig::default();
        config.cache.ttl_seconds = 60;

        let service = create_system_state_service(&config, Span::none()).unwrap();
        let first = service.get_system_state().await.unwrap();
        let second = service.get_system_state().await.unwrap();
        assert_eq!(first, second);
        service.close();
    }
}
