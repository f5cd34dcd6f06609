// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `telemetron-core` - Fleet State Aggregation
//!
//! Aggregates the operational state of an agent fleet into one snapshot.
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | Fleet records, `SystemState`, repository traits, config |
//! | [`application`] | Application | `SystemStateService`, snapshot cache, repository factory |
//! | [`infrastructure`] | Infrastructure | Simulated in-memory repositories |
//! | [`presentation`] | Presentation | Axum HTTP router |

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
