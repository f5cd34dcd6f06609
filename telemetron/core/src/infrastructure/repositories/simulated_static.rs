// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Static simulated repositories: workloads, queues and gateway telemetry.
//
// Nothing mutates these after construction except an explicit `replace_all`
// from a test harness. They still copy under a read lock so they behave like
// the live agent source and like the real backends that will replace them.

use async_trait::async_trait;
use chrono::Utc;

use super::{seed, RecordSet};
use crate::domain::litellm::LiteLLM;
use crate::domain::queue::Queue;
use crate::domain::repository::{
    LiteLLMRepository, QueueRepository, RepositoryError, WorkloadRepository,
};
use crate::domain::workload::Workload;

pub struct SimulatedWorkloadRepository {
    workloads: RecordSet<Workload>,
}

impl SimulatedWorkloadRepository {
    pub fn new() -> Self {
        Self::with_workloads(seed::workloads(Utc::now()))
    }

    pub fn with_workloads(workloads: Vec<Workload>) -> Self {
        Self {
            workloads: RecordSet::new(workloads),
        }
    }

    pub fn replace_all(&self, workloads: Vec<Workload>) {
        self.workloads.replace(workloads);
    }
}

impl Default for SimulatedWorkloadRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkloadRepository for SimulatedWorkloadRepository {
    async fn get_all(&self) -> Result<Vec<Workload>, RepositoryError> {
        Ok(self.workloads.snapshot())
    }

    fn close(&self) {}
}

pub struct SimulatedQueueRepository {
    queues: RecordSet<Queue>,
}

impl SimulatedQueueRepository {
    pub fn new() -> Self {
        Self::with_queues(seed::queues(Utc::now()))
    }

    pub fn with_queues(queues: Vec<Queue>) -> Self {
        Self {
            queues: RecordSet::new(queues),
        }
    }

    pub fn replace_all(&self, queues: Vec<Queue>) {
        self.queues.replace(queues);
    }
}

impl Default for SimulatedQueueRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueRepository for SimulatedQueueRepository {
    async fn get_all(&self) -> Result<Vec<Queue>, RepositoryError> {
        Ok(self.queues.snapshot())
    }

    fn close(&self) {}
}

pub struct SimulatedLiteLLMRepository {
    models: RecordSet<LiteLLM>,
}

impl SimulatedLiteLLMRepository {
    pub fn new() -> Self {
        Self::with_models(seed::litellm())
    }

    pub fn with_models(models: Vec<LiteLLM>) -> Self {
        Self {
            models: RecordSet::new(models),
        }
    }

    pub fn replace_all(&self, models: Vec<LiteLLM>) {
        self.models.replace(models);
    }
}

impl Default for SimulatedLiteLLMRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LiteLLMRepository for SimulatedLiteLLMRepository {
    async fn get_all(&self) -> Result<Vec<LiteLLM>, RepositoryError> {
        Ok(self.models.snapshot())
    }

    fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_workload_repository() {
        let repo = SimulatedWorkloadRepository::new();

        let workloads = repo.get_all().await.unwrap();
        assert_eq!(workloads.len(), 1);
        assert_eq!(workloads[0].deployment_name, "agent-deployment-1");
        assert_eq!(workloads[0].max_pods, 10);
        assert_eq!(workloads[0].pods.len(), 3);
    }

    #[tokio::test]
    async fn test_queue_repository() {
        let repo = SimulatedQueueRepository::new();

        let queues = repo.get_all().await.unwrap();
        let names: Vec<_> = queues.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["default", "priority"]);
        assert_eq!(queues[0].tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_litellm_repository() {
        let repo = SimulatedLiteLLMRepository::new();

        let models = repo.get_all().await.unwrap();
        assert_eq!(models.len(), 3);
        assert_eq!(models[0].model, "gpt-4");
        assert_eq!(models[2].provider, "anthropic");
    }

    #[tokio::test]
    async fn test_returned_records_are_copies() {
        let repo = SimulatedWorkloadRepository::new();

        let mut first = repo.get_all().await.unwrap();
        first[0].pods.clear();
        first[0].max_pods = 0;
        first.push(first[0].clone());

        let second = repo.get_all().await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].max_pods, 10);
        assert_eq!(second[0].pods.len(), 3);
    }

    #[tokio::test]
    async fn test_close_is_noop() {
        let repo = SimulatedQueueRepository::new();
        repo.close();
        repo.close();
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_replace_all() {
        let repo = SimulatedLiteLLMRepository::new();
        repo.replace_all(vec![]);
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_workload_replace_all() {
        let repo = SimulatedWorkloadRepository::with_workloads(vec![]);
        assert!(repo.get_all().await.unwrap().is_empty());

        let mut scaled = seed::workloads(Utc::now());
        scaled[0].max_pods = 20;
        repo.replace_all(scaled);

        let workloads = repo.get_all().await.unwrap();
        assert_eq!(workloads.len(), 1);
        assert_eq!(workloads[0].max_pods, 20);
    }

    #[tokio::test]
    async fn test_queue_replace_all() {
        let repo = SimulatedQueueRepository::new();

        let mut queues = seed::queues(Utc::now());
        queues.truncate(1);
        queues[0].tasks.clear();
        repo.replace_all(queues);

        let queues = repo.get_all().await.unwrap();
        assert_eq!(queues.len(), 1);
        assert_eq!(queues[0].name, "default");
        assert!(queues[0].tasks.is_empty());
    }
}
