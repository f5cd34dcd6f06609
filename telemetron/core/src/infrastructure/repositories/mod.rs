// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the data source contracts defined in
//! `crate::domain::repository`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Serve fleet records to the aggregation service
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! ## Simulated Repositories
//!
//! In-memory stand-ins seeded at construction:
//! - **SimulatedAgentRepository** - Agents with a background activity simulator
//! - **SimulatedWorkloadRepository** - Static workload deployments and pods
//! - **SimulatedQueueRepository** - Static task queues
//! - **SimulatedLiteLLMRepository** - Static gateway rate-limit telemetry
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use telemetron_core::application::system_state::StandardSystemStateService;
//! use telemetron_core::infrastructure::repositories::{
//!     ActivitySimulatorConfig, SimulatedAgentRepository, SimulatedLiteLLMRepository,
//!     SimulatedQueueRepository, SimulatedWorkloadRepository,
//! };
//!
//! # async fn run() {
//! let service = StandardSystemStateService::new(
//!     Arc::new(SimulatedAgentRepository::new(ActivitySimulatorConfig::default())),
//!     Arc::new(SimulatedWorkloadRepository::new()),
//!     Arc::new(SimulatedQueueRepository::new()),
//!     Arc::new(SimulatedLiteLLMRepository::new()),
//! );
//! # }
//! ```

pub mod seed;
pub mod simulated_agent;
pub mod simulated_static;

pub use simulated_agent::{ActivitySimulatorConfig, SimulatedAgentRepository};
pub use simulated_static::{
    SimulatedLiteLLMRepository, SimulatedQueueRepository, SimulatedWorkloadRepository,
};

use parking_lot::RwLock;
use std::sync::Arc;

/// Lock-protected record list shared by the simulated repositories.
///
/// Readers always receive an owned copy taken under the read lock.
#[derive(Debug)]
pub(crate) struct RecordSet<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Clone> RecordSet<T> {
    pub(crate) fn new(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.records.read().clone()
    }

    pub(crate) fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.read().iter().find(|r| predicate(r)).cloned()
    }

    pub(crate) fn replace(&self, records: Vec<T>) {
        *self.records.write() = records;
    }

    pub(crate) fn shared(&self) -> Arc<RwLock<Vec<T>>> {
        Arc::clone(&self.records)
    }
}
