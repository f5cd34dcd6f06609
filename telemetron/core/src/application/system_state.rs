// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! System State Service - fleet snapshot aggregation
//!
//! Fans out to the four data sources and assembles one [`SystemState`].
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Use case behind `GET /system/state`
//!
//! # Semantics
//!
//! - Sources are queried sequentially in a fixed order: agents, workloads,
//!   queues, gateway telemetry.
//! - Fail fast: the first source error is returned as-is and no later source
//!   is queried. A partial snapshot is never produced.
//! - `close` releases the sources in the same order. It is best-effort,
//!   idempotent and terminal.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, Span};

use crate::domain::agent::Agent;
use crate::domain::repository::{
    AgentRepository, LiteLLMRepository, QueueRepository, RepositoryError, WorkloadRepository,
};
use crate::domain::system_state::SystemState;

#[async_trait]
pub trait SystemStateService: Send + Sync {
    /// Assemble a snapshot of every data source
    async fn get_system_state(&self) -> Result<SystemState, RepositoryError>;

    /// Look up a single agent by name
    async fn get_agent(&self, name: &str) -> Result<Option<Agent>, RepositoryError>;

    /// Release every data source
    fn close(&self);
}

pub struct StandardSystemStateService {
    agents: Arc<dyn AgentRepository>,
    workloads: Arc<dyn WorkloadRepository>,
    queues: Arc<dyn QueueRepository>,
    litellm: Arc<dyn LiteLLMRepository>,
    closed: AtomicBool,
    span: Span,
}

impl StandardSystemStateService {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        workloads: Arc<dyn WorkloadRepository>,
        queues: Arc<dyn QueueRepository>,
        litellm: Arc<dyn LiteLLMRepository>,
    ) -> Self {
        Self {
            agents,
            workloads,
            queues,
            litellm,
            closed: AtomicBool::new(false),
            span: Span::current(),
        }
    }

    /// Log into `span` instead of the span current at construction.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl SystemStateService for StandardSystemStateService {
    async fn get_system_state(&self) -> Result<SystemState, RepositoryError> {
        let agents = self.agents.get_all().await?;
        let workloads = self.workloads.get_all().await?;
        let queues = self.queues.get_all().await?;
        let litellm = self.litellm.get_all().await?;

        self.span.in_scope(|| {
            debug!(
                agents = agents.len(),
                workloads = workloads.len(),
                queues = queues.len(),
                models = litellm.len(),
                "Assembled system state"
            )
        });

        Ok(SystemState::new(agents, workloads, queues, litellm))
    }

    async fn get_agent(&self, name: &str) -> Result<Option<Agent>, RepositoryError> {
        self.agents.find_by_name(name).await
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.agents.close();
        self.workloads.close();
        self.queues.close();
        self.litellm.close();
        self.span.in_scope(|| info!("System state service closed"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::system_state::SYSTEM_ID;
    use crate::infrastructure::repositories::{
        ActivitySimulatorConfig, SimulatedAgentRepository, SimulatedLiteLLMRepository,
        SimulatedQueueRepository, SimulatedWorkloadRepository,
    };

    fn service() -> StandardSystemStateService {
        StandardSystemStateService::new(
            Arc::new(SimulatedAgentRepository::new(ActivitySimulatorConfig::default())),
            Arc::new(SimulatedWorkloadRepository::new()),
            Arc::new(SimulatedQueueRepository::new()),
            Arc::new(SimulatedLiteLLMRepository::new()),
        )
    }

    #[tokio::test]
    async fn test_get_system_state_success() {
        let service = service();

        let state = service.get_system_state().await.unwrap();

        assert_eq!(state.id, SYSTEM_ID);
        assert!(!state.agents.is_empty());
        assert!(!state.workload.is_empty());
        assert!(!state.queues.is_empty());
        assert!(!state.litellm.is_empty());
        service.close();
    }

    #[tokio::test]
    async fn test_get_agent() {
        let service = service();

        let agent = service.get_agent("agent-1").await.unwrap();
        assert_eq!(agent.map(|a| a.deployment_name), Some("agent-deployment-1".to_string()));
        assert!(service.get_agent("missing").await.unwrap().is_none());
        service.close();
    }

    #[tokio::test]
    async fn test_close_is_terminal_and_idempotent() {
        let service = service();
        assert!(!service.is_closed());

        service.close();
        service.close();

        assert!(service.is_closed());
    }
}
