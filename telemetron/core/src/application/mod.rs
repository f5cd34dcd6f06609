// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod system_state;
pub mod snapshot_cache;
pub mod repository_factory;

pub use system_state::{StandardSystemStateService, SystemStateService};
pub use snapshot_cache::CachingSystemStateService;
