// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pending task queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    /// Unique queue name within a snapshot
    pub name: String,
    pub updated_at: DateTime<Utc>,
    /// Tasks in submission order
    pub tasks: Vec<QueueTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueTask {
    pub id: String,
    pub priority: Priority,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub level: PriorityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn new(level: PriorityLevel) -> Self {
        Self { level }
    }
}

impl QueueTask {
    pub fn new(id: impl Into<String>, level: PriorityLevel, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            priority: Priority::new(level),
            submitted_at,
        }
    }
}
