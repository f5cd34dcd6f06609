// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! One read contract per data source feeding the fleet snapshot. Interfaces
//! live in the domain layer; implementations live in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Records | Implementations |
//! |-------|---------|----------------|
//! | `AgentRepository` | `Agent` | `SimulatedAgentRepository` |
//! | `WorkloadRepository` | `Workload` | `SimulatedWorkloadRepository` |
//! | `QueueRepository` | `Queue` | `SimulatedQueueRepository` |
//! | `LiteLLMRepository` | `LiteLLM` | `SimulatedLiteLLMRepository` |
//!
//! ## Contract
//!
//! - `get_all` returns records owned by the caller. Mutating them never
//!   touches repository state, and an `Err` never carries partial data.
//! - `close` releases background resources. It is idempotent, and a no-op for
//!   repositories that hold none.
//!
//! Real backends (Kubernetes, message queue, gateway API) slot in behind the
//! same traits without changes to the aggregation service.

use async_trait::async_trait;

use crate::domain::agent::Agent;
use crate::domain::litellm::LiteLLM;
use crate::domain::queue::Queue;
use crate::domain::workload::Workload;

/// Backend selection for the data sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceBackend {
    /// Seeded in-memory stand-ins
    Simulated,
    // Future: Kubernetes(KubeConfig), Broker(..), Gateway(..)
}

/// Read contract for agent records
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Copy of every agent currently known
    async fn get_all(&self) -> Result<Vec<Agent>, RepositoryError>;

    /// Copy of the agent with the given name
    async fn find_by_name(&self, name: &str) -> Result<Option<Agent>, RepositoryError>;

    /// Stop background activity
    fn close(&self);
}

/// Read contract for workload deployments
#[async_trait]
pub trait WorkloadRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Workload>, RepositoryError>;

    fn close(&self);
}

/// Read contract for task queues
#[async_trait]
pub trait QueueRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Queue>, RepositoryError>;

    fn close(&self);
}

/// Read contract for gateway rate-limit telemetry
#[async_trait]
pub trait LiteLLMRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<LiteLLM>, RepositoryError>;

    fn close(&self);
}

/// Source fetch failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("Backend error: {0}")]
    Backend(String),
}
