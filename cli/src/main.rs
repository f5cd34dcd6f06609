// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Telemetron CLI
//!
//! The `telemetron` binary serves the fleet state API and inspects a running
//! server.
//!
//! ## Commands
//!
//! - `telemetron [serve]` - Run the HTTP API (default)
//! - `telemetron config show|validate|generate` - Configuration management
//! - `telemetron state` - Print the fleet snapshot of a running server

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use telemetron_cli::commands::{self, ConfigCommand, StateArgs};
use telemetron_cli::logging::{init_logging, with_bootstrap_logging};
use telemetron_cli::server;
use telemetron_core::domain::config::TelemetronConfig;

/// Telemetron - fleet state aggregation API
#[derive(Parser)]
#[command(name = "telemetron")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "TELEMETRON_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP API port (overrides config)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// HTTP API host (overrides config)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    #[command(name = "serve")]
    Serve,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show the fleet state of a running server
    #[command(name = "state")]
    State(StateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let bootstrap_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| "info".to_string());
    let mut config = with_bootstrap_logging(&bootstrap_level, || {
        TelemetronConfig::load_or_default(cli.config.as_deref())
    })?
    .context("Failed to load configuration")?;
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    init_logging(&config.logging.level, config.logging.format)?;

    match cli.command {
        None | Some(Commands::Serve) => {
            info!("Starting Telemetron API");
            server::start_server(config).await
        }
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config, config).await
        }
        Some(Commands::State(args)) => {
            commands::state::handle_command(args, cli.host.as_deref(), config.server.port).await
        }
    }
}
