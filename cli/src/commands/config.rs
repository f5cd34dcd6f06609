// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

use telemetron_core::domain::config::{TelemetronConfig, CONFIG_PATH_ENV};

const GENERATED_HEADER: &str = "\
# Telemetron configuration
#
# Every value can be overridden by environment variables:
#   TELEMETRON_HOST, SERVER_PORT, LOG_LEVEL, LOG_FORMAT, KUBECONFIG,
#   CACHE_TTL_SECONDS, ENABLE_MOCK_DATA, ACTIVITY_INTERVAL_SECONDS
";

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./telemetron.yaml")]
        output: PathBuf,
    },
}

/// Run a config subcommand against the effective configuration.
pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
    effective: TelemetronConfig,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, &effective, paths),
        ConfigCommand::Validate { file: Some(file) } => validate_file(&file).map(|_| ()),
        ConfigCommand::Validate { file: None } => validate(&effective),
        ConfigCommand::Generate { output } => generate(&output),
    }
}

fn show(config_override: Option<PathBuf>, config: &TelemetronConfig, show_paths: bool) -> Result<()> {
    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        match &config_override {
            Some(path) => println!("  1. --config flag: {}", path.display()),
            None => println!("  1. --config flag: {}", "(not set)".dimmed()),
        }
        if std::env::var(CONFIG_PATH_ENV).is_err() {
            println!("     {}: {}", CONFIG_PATH_ENV, "(not set)".dimmed());
        }
        for (i, path) in TelemetronConfig::search_paths().iter().enumerate() {
            let marker = if path.exists() { "found".green() } else { "missing".dimmed() };
            println!("  {}. {} ({})", i + 2, path.display(), marker);
        }
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Server:".bold());
    println!("  Bind address: {}", config.bind_address());
    println!();

    println!("{}", "Logging:".bold());
    println!("  Level: {}", config.logging.level);
    println!("  Format: {:?}", config.logging.format);
    println!();

    println!("{}", "Data sources:".bold());
    println!("  Mock data: {}", config.data_sources.mock_data);
    println!(
        "  Activity interval: {}s",
        config.data_sources.activity_interval_seconds
    );
    match &config.kubeconfig_path {
        Some(path) => println!("  Kubeconfig: {}", path.display()),
        None => println!("  Kubeconfig: {}", "(not set)".dimmed()),
    }
    println!();

    println!("{}", "Cache:".bold());
    if config.cache.ttl_seconds == 0 {
        println!("  TTL: {}", "disabled".dimmed());
    } else {
        println!("  TTL: {}s", config.cache.ttl_seconds);
    }
    println!();

    Ok(())
}

fn validate(config: &TelemetronConfig) -> Result<()> {
    println!("Validating configuration...");

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

fn validate_file(path: &Path) -> Result<TelemetronConfig> {
    let config = TelemetronConfig::load_or_default(Some(path))
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    validate(&config)?;
    Ok(config)
}

fn generate(output: &Path) -> Result<()> {
    let body = TelemetronConfig::default()
        .to_yaml_string()
        .context("Failed to render default configuration")?;

    std::fs::write(output, format!("{GENERATED_HEADER}{body}"))
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}
