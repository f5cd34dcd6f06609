// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deployed workload backing one or more agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Deployment name, expected to match an `Agent::deployment_name`
    pub deployment_name: String,

    pub max_pods: u32,

    /// Per-pod memory limit as a Kubernetes quantity (e.g. "2Gi")
    pub pod_max_ram: String,

    /// Per-pod CPU limit as a Kubernetes quantity (e.g. "1000m")
    pub pod_max_cpu: String,

    pub live: LiveWorkload,

    pub pods: Vec<Pod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveWorkload {
    pub active_pods: u32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    pub pod_id: String,

    /// CPU usage as a fraction of one core
    pub cpu: f64,

    /// Memory usage in MB
    pub memory: u64,

    pub status: String,
}

impl Pod {
    pub fn running(pod_id: impl Into<String>, cpu: f64, memory: u64) -> Self {
        Self {
            pod_id: pod_id.into(),
            cpu,
            memory,
            status: "running".to_string(),
        }
    }
}
