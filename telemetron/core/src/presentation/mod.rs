// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`telemetron-core`)
//!
//! HTTP surface that translates requests into application service calls.
//! **No business logic lives here**: all real work is delegated to
//! `crate::application`.
//!
//! | Module | Transport | Description |
//! |--------|-----------|-------------|
//! | [`api`] | HTTP (Axum) | `/`, `/health`, `/system/state`, `/agents/{name}` |

pub mod api;
