// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Snapshot cache decorator for [`SystemStateService`].
//!
//! Reuses the last successful snapshot until it is older than the configured
//! TTL. Failures are never cached. A zero TTL passes every call through.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::application::system_state::SystemStateService;
use crate::domain::agent::Agent;
use crate::domain::repository::RepositoryError;
use crate::domain::system_state::SystemState;

pub struct CachingSystemStateService {
    inner: Arc<dyn SystemStateService>,
    ttl: Duration,
    cached: Mutex<Option<(Instant, SystemState)>>,
}

impl CachingSystemStateService {
    pub fn new(inner: Arc<dyn SystemStateService>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Drop the cached snapshot.
    pub fn invalidate(&self) {
        self.cached.lock().take();
    }

    fn fresh(&self) -> Option<SystemState> {
        let cached = self.cached.lock();
        match cached.as_ref() {
            Some((fetched_at, state)) if fetched_at.elapsed() < self.ttl => Some(state.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl SystemStateService for CachingSystemStateService {
    async fn get_system_state(&self) -> Result<SystemState, RepositoryError> {
        if self.ttl.is_zero() {
            return self.inner.get_system_state().await;
        }
        if let Some(state) = self.fresh() {
            debug!("Serving cached system state");
            return Ok(state);
        }

        let state = self.inner.get_system_state().await?;
        *self.cached.lock() = Some((Instant::now(), state.clone()));
        Ok(state)
    }

    async fn get_agent(&self, name: &str) -> Result<Option<Agent>, RepositoryError> {
        self.inner.get_agent(name).await
    }

    fn close(&self) {
        self.invalidate();
        self.inner.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingService {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SystemStateService for CountingService {
        async fn get_system_state(&self) -> Result<SystemState, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(RepositoryError::Unavailable("agents".to_string()))
            } else {
                Ok(SystemState::new(vec![], vec![], vec![], vec![]))
            }
        }

        async fn get_agent(&self, _name: &str) -> Result<Option<Agent>, RepositoryError> {
            Ok(None)
        }

        fn close(&self) {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_reuses_snapshot_within_ttl() {
        let inner = CountingService::new(false);
        let cache = CachingSystemStateService::new(inner.clone(), Duration::from_secs(30));

        cache.get_system_state().await.unwrap();
        cache.get_system_state().await.unwrap();
        assert_eq!(inner.calls(), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        cache.get_system_state().await.unwrap();
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_passes_through() {
        let inner = CountingService::new(false);
        let cache = CachingSystemStateService::new(inner.clone(), Duration::ZERO);

        cache.get_system_state().await.unwrap();
        cache.get_system_state().await.unwrap();
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let inner = CountingService::new(true);
        let cache = CachingSystemStateService::new(inner.clone(), Duration::from_secs(30));

        assert!(cache.get_system_state().await.is_err());
        assert!(cache.get_system_state().await.is_err());
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let inner = CountingService::new(false);
        let cache = CachingSystemStateService::new(inner.clone(), Duration::from_secs(30));

        cache.get_system_state().await.unwrap();
        cache.invalidate();
        cache.get_system_state().await.unwrap();
        assert_eq!(inner.calls(), 2);
    }
}
