// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! LiteLLM
//!
//! Per-model rate-limit telemetry reported by the upstream LLM gateway.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Value type for gateway token/request budgets

use serde::{Deserialize, Serialize};

/// Rate-limit telemetry for one model served through the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteLLM {
    /// Model identifier (e.g. "gpt-4")
    pub model: String,

    /// Upstream provider (e.g. "openai", "anthropic")
    pub provider: String,

    /// Current tokens per minute
    pub tpm: u64,

    /// Current requests per minute
    pub rpm: u64,

    /// Configured tokens-per-minute ceiling
    pub tpm_max: u64,

    /// Configured requests-per-minute ceiling
    pub rpm_max: u64,

    /// Billing model (e.g. "pay-per-request")
    pub payment_type: String,
}

impl LiteLLM {
    /// Fraction of the token budget in use, `None` when no ceiling is configured.
    pub fn tpm_utilization(&self) -> Option<f64> {
        (self.tpm_max > 0).then(|| self.tpm as f64 / self.tpm_max as f64)
    }

    /// Fraction of the request budget in use, `None` when no ceiling is configured.
    pub fn rpm_utilization(&self) -> Option<f64> {
        (self.rpm_max > 0).then(|| self.rpm as f64 / self.rpm_max as f64)
    }
}
