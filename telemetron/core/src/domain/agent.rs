// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Autonomous worker agent as reported in a fleet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent name within a snapshot
    pub name: String,

    pub description: String,

    /// Upper bound on concurrently running invocations
    pub max_parallel_invocations: u32,

    /// Name of the workload deployment hosting this agent
    pub deployment_name: String,

    /// Model identifiers the agent may call (e.g. "gpt-4")
    pub models: Vec<String>,

    pub activity: Activity,
}

/// Recent task activity of an agent.
///
/// Only the owning agent source mutates this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub active_task_ids: Vec<TaskStatus>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: String,
    pub status: TaskState,
}

/// Status of an agent task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Running,
    Pending,
    Completed,
    Failed,
}

impl TaskState {
    /// Cycle order used when simulating activity.
    pub const CYCLE: [TaskState; 4] = [
        TaskState::Running,
        TaskState::Pending,
        TaskState::Completed,
        TaskState::Failed,
    ];

    /// Select a state deterministically from the whole seconds of `at`.
    pub fn at(at: DateTime<Utc>) -> Self {
        let index = at.timestamp().rem_euclid(Self::CYCLE.len() as i64) as usize;
        Self::CYCLE[index]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Running => "running",
            TaskState::Pending => "pending",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Activity {
    pub fn new(tasks: Vec<TaskStatus>, updated_at: DateTime<Utc>) -> Self {
        Self {
            active_task_ids: tasks,
            updated_at,
        }
    }

    /// Move every active task to the state selected by `now` and stamp the record.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        let state = TaskState::at(now);
        for task in &mut self.active_task_ids {
            task.status = state;
        }
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

impl TaskStatus {
    pub fn new(id: impl Into<String>, status: TaskState) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}
