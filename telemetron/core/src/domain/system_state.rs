// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # System State Snapshot
//!
//! [`SystemState`] is the aggregate root returned by the aggregation service:
//! a fixed system identifier plus one collection per data source.
//!
//! A snapshot owns all of its records. Nothing in it borrows from or shares
//! storage with a live repository, so later background activity in a source
//! can never change a snapshot that has already been handed out.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::agent::Agent;
use crate::domain::litellm::LiteLLM;
use crate::domain::queue::Queue;
use crate::domain::workload::Workload;

/// Identifier stamped on every snapshot.
pub const SYSTEM_ID: &str = "system-1";

/// Point-in-time view of the whole fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    pub id: String,
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub workload: Vec<Workload>,
    #[serde(default)]
    pub queues: Vec<Queue>,
    #[serde(default)]
    pub litellm: Vec<LiteLLM>,
}

impl SystemState {
    /// Assemble a snapshot under the fixed [`SYSTEM_ID`].
    pub fn new(
        agents: Vec<Agent>,
        workload: Vec<Workload>,
        queues: Vec<Queue>,
        litellm: Vec<LiteLLM>,
    ) -> Self {
        Self {
            id: SYSTEM_ID.to_string(),
            agents,
            workload,
            queues,
            litellm,
        }
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// Workload deployment names that no agent in this snapshot refers to.
    ///
    /// Sources do not enforce workload/agent referential consistency; this
    /// only reports it.
    pub fn orphaned_workloads(&self) -> Vec<&str> {
        let deployments: HashSet<&str> = self
            .agents
            .iter()
            .map(|a| a.deployment_name.as_str())
            .collect();

        self.workload
            .iter()
            .map(|w| w.deployment_name.as_str())
            .filter(|name| !deployments.contains(name))
            .collect()
    }

    /// True when agent names and queue names are each unique.
    pub fn has_unique_names(&self) -> bool {
        let mut agents = HashSet::new();
        let mut queues = HashSet::new();
        self.agents.iter().all(|a| agents.insert(a.name.as_str()))
            && self.queues.iter().all(|q| queues.insert(q.name.as_str()))
    }
}
