// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Seed records for the simulated repositories.
//!
//! Every function stamps its timestamps relative to `now` so callers (and
//! tests) control the clock.

use chrono::{DateTime, Duration, Utc};

use crate::domain::agent::{Activity, Agent, TaskState, TaskStatus};
use crate::domain::litellm::LiteLLM;
use crate::domain::queue::{PriorityLevel, Queue, QueueTask};
use crate::domain::workload::{LiveWorkload, Pod, Workload};

pub fn agents(now: DateTime<Utc>) -> Vec<Agent> {
    vec![
        Agent {
            name: "agent-1".to_string(),
            description: "Data processing agent".to_string(),
            max_parallel_invocations: 5,
            deployment_name: "agent-deployment-1".to_string(),
            models: vec!["gpt-4".to_string(), "gpt-3.5-turbo".to_string()],
            activity: Activity::new(
                vec![
                    TaskStatus::new("task-1", TaskState::Running),
                    TaskStatus::new("task-2", TaskState::Pending),
                ],
                now,
            ),
        },
        Agent {
            name: "agent-2".to_string(),
            description: "Analytics agent".to_string(),
            max_parallel_invocations: 3,
            deployment_name: "agent-deployment-2".to_string(),
            models: vec!["gpt-4".to_string()],
            activity: Activity::new(vec![TaskStatus::new("task-3", TaskState::Running)], now),
        },
    ]
}

pub fn workloads(now: DateTime<Utc>) -> Vec<Workload> {
    vec![Workload {
        deployment_name: "agent-deployment-1".to_string(),
        max_pods: 10,
        pod_max_ram: "2Gi".to_string(),
        pod_max_cpu: "1000m".to_string(),
        live: LiveWorkload {
            active_pods: 3,
            updated_at: now,
        },
        pods: vec![
            Pod::running("pod-1", 0.5, 1024),
            Pod::running("pod-2", 0.3, 512),
            Pod::running("pod-3", 0.2, 256),
        ],
    }]
}

pub fn queues(now: DateTime<Utc>) -> Vec<Queue> {
    vec![
        Queue {
            name: "default".to_string(),
            updated_at: now,
            tasks: vec![
                QueueTask::new("task-1", PriorityLevel::High, now - Duration::minutes(5)),
                QueueTask::new("task-2", PriorityLevel::Medium, now - Duration::minutes(2)),
            ],
        },
        Queue {
            name: "priority".to_string(),
            updated_at: now,
            tasks: vec![QueueTask::new("task-3", PriorityLevel::High, now - Duration::minutes(1))],
        },
    ]
}

pub fn litellm() -> Vec<LiteLLM> {
    vec![
        gateway_model("gpt-4", "openai", (45_000, 200), (90_000, 3_500)),
        gateway_model("gpt-3.5-turbo", "openai", (120_000, 3_400), (240_000, 3_500)),
        gateway_model("claude-3-opus", "anthropic", (30_000, 150), (80_000, 3_000)),
    ]
}

fn gateway_model(model: &str, provider: &str, current: (u64, u64), max: (u64, u64)) -> LiteLLM {
    LiteLLM {
        model: model.to_string(),
        provider: provider.to_string(),
        tpm: current.0,
        rpm: current.1,
        tpm_max: max.0,
        rpm_max: max.1,
        payment_type: "pay-per-request".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_tasks_are_in_submission_order() {
        let now = Utc::now();
        for queue in queues(now) {
            assert!(queue
                .tasks
                .windows(2)
                .all(|pair| pair[0].submitted_at <= pair[1].submitted_at));
        }
    }

    #[test]
    fn test_telemetry_within_ceilings() {
        for model in litellm() {
            assert!(model.tpm <= model.tpm_max, "{} over tpm ceiling", model.model);
            assert!(model.rpm <= model.rpm_max, "{} over rpm ceiling", model.model);
        }
    }

    #[test]
    fn test_active_pods_match_pod_list() {
        for workload in workloads(Utc::now()) {
            assert_eq!(workload.live.active_pods as usize, workload.pods.len());
            assert!(workload.pods.len() as u32 <= workload.max_pods);
        }
    }
}
