// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Fleet records, the `SystemState` snapshot aggregate, the data source
//! repository contracts, and the service configuration schema.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure types and interfaces, no infrastructure dependencies

pub mod agent;
pub mod workload;
pub mod queue;
pub mod litellm;
pub mod system_state;
pub mod repository;
pub mod config;
