// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Simulated Agent Repository - in-memory agents with live activity
//!
//! Holds the agent records under a read/write lock and runs one background
//! task that periodically cycles every active task's status and refreshes the
//! activity timestamp, emulating a live fleet.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Stateful stand-in for a real agent registry
//!
//! # Shutdown
//!
//! The simulator is stopped through a `CancellationToken`. `close` may be
//! called any number of times. Once it returns, no further mutation is
//! applied: every tick re-checks the token while holding the write lock, and
//! `close` waits for any tick already inside the lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument, Span};

use super::{seed, RecordSet};
use crate::domain::agent::Agent;
use crate::domain::repository::{AgentRepository, RepositoryError};

/// Configuration for the background activity simulator
#[derive(Debug, Clone)]
pub struct ActivitySimulatorConfig {
    /// Time between two activity updates
    pub interval: Duration,

    /// Whether the simulator runs at all
    pub enabled: bool,
}

impl Default for ActivitySimulatorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            enabled: true,
        }
    }
}

impl ActivitySimulatorConfig {
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

pub struct SimulatedAgentRepository {
    agents: RecordSet<Agent>,
    shutdown_token: CancellationToken,
    span: Span,
}

impl SimulatedAgentRepository {
    /// Seeded repository logging into the current span.
    ///
    /// Starts the simulator when called inside a Tokio runtime.
    pub fn new(config: ActivitySimulatorConfig) -> Self {
        Self::with_agents(seed::agents(Utc::now()), config, Span::current())
    }

    /// Repository over caller-supplied agents.
    pub fn with_agents(agents: Vec<Agent>, config: ActivitySimulatorConfig, span: Span) -> Self {
        let repo = Self {
            agents: RecordSet::new(agents),
            shutdown_token: CancellationToken::new(),
            span,
        };
        repo.start(&config);
        repo
    }

    fn start(&self, config: &ActivitySimulatorConfig) {
        let _entered = self.span.enter();

        if !config.enabled {
            info!("Agent activity simulator is disabled");
            return;
        }
        if config.interval.is_zero() {
            warn!("Agent activity simulator interval is zero, not starting");
            return;
        }
        let start = match Instant::now().checked_add(config.interval) {
            Some(start) => start,
            None => {
                warn!(
                    interval_secs = config.interval.as_secs(),
                    "Agent activity simulator interval is out of range, not starting"
                );
                return;
            }
        };
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No Tokio runtime available, agent activity simulator not started");
                return;
            }
        };

        let agents = self.agents.shared();
        let token = self.shutdown_token.clone();
        let period = config.interval;

        info!(interval_ms = period.as_millis() as u64, "Starting agent activity simulator");

        handle.spawn(
            async move {
                let mut tick = interval_at(start, period);
                tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        _ = tick.tick() => {
                            if !advance_activity(&agents, &token, Utc::now()) {
                                break;
                            }
                        }
                    }
                }

                info!("Agent activity simulator stopped");
            }
            .instrument(self.span.clone()),
        );
    }

    /// Apply one activity update at `now`, as the simulator would.
    ///
    /// Returns `false` without touching any record once the repository is closed.
    pub fn tick(&self, now: DateTime<Utc>) -> bool {
        advance_activity(&self.agents.shared(), &self.shutdown_token, now)
    }

    /// Replace every agent record.
    pub fn replace_all(&self, agents: Vec<Agent>) {
        self.agents.replace(agents);
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }
}

fn advance_activity(
    agents: &RwLock<Vec<Agent>>,
    token: &CancellationToken,
    now: DateTime<Utc>,
) -> bool {
    let mut agents = agents.write();
    if token.is_cancelled() {
        return false;
    }
    for agent in agents.iter_mut() {
        agent.activity.advance(now);
    }
    debug!(agents = agents.len(), "Agent activity updated");
    true
}

#[async_trait]
impl AgentRepository for SimulatedAgentRepository {
    async fn get_all(&self) -> Result<Vec<Agent>, RepositoryError> {
        Ok(self.agents.snapshot())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Agent>, RepositoryError> {
        Ok(self.agents.find(|a| a.name == name))
    }

    fn close(&self) {
        if self.shutdown_token.is_cancelled() {
            return;
        }
        self.shutdown_token.cancel();
        // Wait out a tick that may already hold the write lock.
        drop(self.agents.shared().write());

        let _entered = self.span.enter();
        info!("Simulated agent repository closed");
    }
}

impl Drop for SimulatedAgentRepository {
    fn drop(&mut self) {
        self.shutdown_token.cancel();
    }
}
