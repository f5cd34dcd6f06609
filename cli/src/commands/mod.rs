// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the Telemetron CLI

pub mod config;
pub mod state;

pub use self::config::ConfigCommand;
pub use self::state::{StateArgs, StateClient};
