// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Fleet state inspection against a running server

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use reqwest::{Client, StatusCode, Url};
use std::fmt::Write as _;
use std::time::Duration;

use telemetron_core::domain::agent::{Agent, TaskState};
use telemetron_core::domain::system_state::SystemState;

const DEFAULT_CONNECT_HOST: &str = "127.0.0.1";

#[derive(Args, Debug)]
pub struct StateArgs {
    /// Print the raw JSON snapshot
    #[arg(long)]
    pub json: bool,

    /// Show a single agent instead of the whole fleet
    #[arg(long, value_name = "NAME")]
    pub agent: Option<String>,
}

/// HTTP client for the Telemetron API
#[derive(Debug, Clone)]
pub struct StateClient {
    client: Client,
    base_url: String,
}

impl StateClient {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: format!("http://{}:{}", host, port),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn system_state(&self) -> Result<SystemState> {
        let response = self
            .client
            .get(format!("{}/system/state", self.base_url))
            .send()
            .await
            .with_context(|| format!("Failed to reach Telemetron API at {}", self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to get system state ({}): {}", status, error_text);
        }

        response
            .json()
            .await
            .context("Failed to parse system state response")
    }

    /// `/agents/{name}` with `name` escaped as a single path segment.
    fn agent_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid API address {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("API address {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .push("agents")
            .push(name);
        Ok(url)
    }

    pub async fn agent(&self, name: &str) -> Result<Option<Agent>> {
        let response = self
            .client
            .get(self.agent_url(name)?)
            .send()
            .await
            .with_context(|| format!("Failed to reach Telemetron API at {}", self.base_url))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json()
                .await
                .map(Some)
                .context("Failed to parse agent response"),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                anyhow::bail!("Failed to get agent {} ({}): {}", name, status, error_text)
            }
        }
    }
}

pub async fn handle_command(args: StateArgs, host: Option<&str>, port: u16) -> Result<()> {
    let client = StateClient::new(host.unwrap_or(DEFAULT_CONNECT_HOST), port)?;

    if let Some(name) = &args.agent {
        let agent = client
            .agent(name)
            .await?
            .with_context(|| format!("Agent not found: {}", name))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&agent)?);
        } else {
            print!("{}", render_agent(&agent));
        }
        return Ok(());
    }

    let state = client.system_state().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render_summary(&state));
    }
    Ok(())
}

fn colored_state(state: TaskState) -> colored::ColoredString {
    match state {
        TaskState::Running => state.as_str().green(),
        TaskState::Pending => state.as_str().yellow(),
        TaskState::Completed => state.as_str().blue(),
        TaskState::Failed => state.as_str().red(),
    }
}

fn render_agent(agent: &Agent) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {} ({}) - {}",
        agent.name.bold(),
        agent.deployment_name,
        agent.description
    );
    let _ = writeln!(
        out,
        "    Models: {}  Max parallel: {}",
        agent.models.join(", "),
        agent.max_parallel_invocations
    );
    let _ = writeln!(out, "    Updated: {}", agent.activity.updated_at.to_rfc3339());
    for task in &agent.activity.active_task_ids {
        let _ = writeln!(out, "      - {} [{}]", task.id, colored_state(task.status));
    }
    out
}

/// Human-readable fleet summary
pub fn render_summary(state: &SystemState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "System:".bold(), state.id);
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", format!("Agents ({}):", state.agents.len()).bold());
    for agent in &state.agents {
        out.push_str(&render_agent(agent));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", format!("Workloads ({}):", state.workload.len()).bold());
    for workload in &state.workload {
        let _ = writeln!(
            out,
            "  {}  pods {}/{}  (ram {}, cpu {})",
            workload.deployment_name.bold(),
            workload.live.active_pods,
            workload.max_pods,
            workload.pod_max_ram,
            workload.pod_max_cpu
        );
    }
    let orphaned = state.orphaned_workloads();
    if !orphaned.is_empty() {
        let _ = writeln!(
            out,
            "  {} {}",
            "No agent for:".yellow(),
            orphaned.join(", ")
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", format!("Queues ({}):", state.queues.len()).bold());
    for queue in &state.queues {
        let _ = writeln!(out, "  {}  {} task(s)", queue.name.bold(), queue.tasks.len());
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", format!("Models ({}):", state.litellm.len()).bold());
    for model in &state.litellm {
        let tpm = model
            .tpm_utilization()
            .map(|u| format!("{:.0}%", u * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            out,
            "  {} ({})  tpm {}/{} [{}]  rpm {}/{}",
            model.model.bold(),
            model.provider,
            model.tpm,
            model.tpm_max,
            tpm,
            model.rpm,
            model.rpm_max
        );
    }
    out
}
