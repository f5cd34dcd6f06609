// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration
//
// Defines the configuration schema for the Telemetron API server:
// - HTTP bind address and port
// - Log level and output format
// - Snapshot cache TTL
// - Data source backend selection and simulation cadence
//
// Values come from a YAML file (optional) and are then overridden by
// environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::repository::DataSourceBackend;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "TELEMETRON_CONFIG_PATH";

/// Longest accepted simulated activity period (one day)
pub const MAX_ACTIVITY_INTERVAL_SECONDS: u64 = 86_400;

/// Top-level service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetronConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Path to a kubeconfig for a future Kubernetes-backed workload source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig_path: Option<PathBuf>,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub data_sources: DataSourceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a snapshot may be reused; 0 disables caching
    #[serde(default)]
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Serve seeded in-memory data
    #[serde(default = "default_true")]
    pub mock_data: bool,

    /// Period of the simulated agent activity
    #[serde(default = "default_activity_interval")]
    pub activity_interval_seconds: u64,
}

/// Configuration load and validation failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_activity_interval() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            mock_data: true,
            activity_interval_seconds: default_activity_interval(),
        }
    }
}

impl TelemetronConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Candidate config paths in precedence order
    /// 1. TELEMETRON_CONFIG_PATH environment variable
    /// 2. ./telemetron.yaml (working directory)
    /// 3. ~/.telemetron/config.yaml (user home)
    /// 4. /etc/telemetron/config.yaml (system, Unix)
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(path));
        }
        paths.push(PathBuf::from("./telemetron.yaml"));
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".telemetron").join("config.yaml"));
        }
        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/telemetron/config.yaml"));
        paths
    }

    /// First existing file among [`Self::search_paths`]
    pub fn discover_config() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|p| p.exists())
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        // Explicit path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            return Ok(config);
        }

        let mut config = match Self::discover_config() {
            Some(path) => {
                tracing::info!("Loading configuration from discovered path: {:?}", path);
                Self::from_yaml_file(path)?
            }
            None => {
                tracing::debug!("No configuration file found, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment-style overrides.
    ///
    /// `lookup` resolves a variable name to its value; unparsable values are
    /// ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = get("TELEMETRON_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Invalid value for SERVER_PORT: '{}'. Ignoring.", port),
            }
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = get("LOG_FORMAT") {
            match format.to_lowercase().as_str() {
                "compact" => self.logging.format = LogFormat::Compact,
                "json" => self.logging.format = LogFormat::Json,
                _ => tracing::warn!("Invalid value for LOG_FORMAT: '{}'. Ignoring.", format),
            }
        }
        if let Some(path) = get("KUBECONFIG") {
            self.kubeconfig_path = Some(PathBuf::from(path));
        }
        if let Some(ttl) = get("CACHE_TTL_SECONDS") {
            match ttl.parse() {
                Ok(ttl) => self.cache.ttl_seconds = ttl,
                Err(_) => tracing::warn!("Invalid value for CACHE_TTL_SECONDS: '{}'. Ignoring.", ttl),
            }
        }
        if let Some(val) = get("ENABLE_MOCK_DATA") {
            match parse_bool(&val) {
                Some(enabled) => self.data_sources.mock_data = enabled,
                None => tracing::warn!(
                    "Invalid value for ENABLE_MOCK_DATA: '{}'. Expected true/false. Ignoring.",
                    val
                ),
            }
        }
        if let Some(secs) = get("ACTIVITY_INTERVAL_SECONDS") {
            match secs.parse() {
                Ok(secs) => self.data_sources.activity_interval_seconds = secs,
                Err(_) => tracing::warn!(
                    "Invalid value for ACTIVITY_INTERVAL_SECONDS: '{}'. Ignoring.",
                    secs
                ),
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port cannot be 0".to_string()));
        }
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid("server.host cannot be empty".to_string()));
        }
        if self.logging.level.is_empty() {
            return Err(ConfigError::Invalid("logging.level cannot be empty".to_string()));
        }
        if self.data_sources.activity_interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "data_sources.activity_interval_seconds must be positive".to_string(),
            ));
        }
        if self.data_sources.activity_interval_seconds > MAX_ACTIVITY_INTERVAL_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "data_sources.activity_interval_seconds cannot exceed {}",
                MAX_ACTIVITY_INTERVAL_SECONDS
            )));
        }
        self.backend().map(|_| ())
    }

    /// Data source backend implied by this configuration
    pub fn backend(&self) -> Result<DataSourceBackend, ConfigError> {
        if self.data_sources.mock_data {
            Ok(DataSourceBackend::Simulated)
        } else {
            Err(ConfigError::Invalid(
                "data_sources.mock_data is false but no live backend is available".to_string(),
            ))
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_seconds)
    }

    pub fn activity_interval(&self) -> Duration {
        Duration::from_secs(self.data_sources.activity_interval_seconds)
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" => Some(true),
        "false" | "0" | "no" | "off" | "f" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = TelemetronConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.cache.ttl_seconds, 0);
        assert!(config.data_sources.mock_data);
        assert_eq!(config.activity_interval(), Duration::from_secs(5));
        assert!(config.kubeconfig_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = TelemetronConfig::from_yaml_str(
            r#"
server:
  port: 9090
cache:
  ttl_seconds: 30
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cache_ttl(), Duration::from_secs(30));
        assert_eq!(config.logging.level, "info");
        assert!(config.data_sources.mock_data);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = TelemetronConfig::default();
        config.logging.format = LogFormat::Json;
        config.kubeconfig_path = Some(PathBuf::from("/home/ops/.kube/config"));

        let yaml = config.to_yaml_string().unwrap();
        let parsed = TelemetronConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("SERVER_PORT", "9999"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "json"),
            ("CACHE_TTL_SECONDS", "60"),
            ("ENABLE_MOCK_DATA", "true"),
            ("KUBECONFIG", "/tmp/kubeconfig"),
        ]);

        let mut config = TelemetronConfig::default();
        config.apply_overrides(|k| vars.get(k).cloned());

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.cache.ttl_seconds, 60);
        assert_eq!(config.kubeconfig_path, Some(PathBuf::from("/tmp/kubeconfig")));
        assert_eq!(config.bind_address(), "0.0.0.0:9999");
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let vars = env(&[
            ("SERVER_PORT", "not-a-port"),
            ("CACHE_TTL_SECONDS", "-5"),
            ("ENABLE_MOCK_DATA", "maybe"),
            ("LOG_FORMAT", "xml"),
        ]);

        let mut config = TelemetronConfig::default();
        config.apply_overrides(|k| vars.get(k).cloned());

        assert_eq!(config, TelemetronConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut config = TelemetronConfig::default();
        config.data_sources.mock_data = false;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = TelemetronConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = TelemetronConfig::default();
        config.data_sources.activity_interval_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_activity_interval_rejected() {
        let mut config = TelemetronConfig::default();
        config.apply_overrides(|key| {
            (key == "ACTIVITY_INTERVAL_SECONDS").then(|| u64::MAX.to_string())
        });
        assert_eq!(config.data_sources.activity_interval_seconds, u64::MAX);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.data_sources.activity_interval_seconds = MAX_ACTIVITY_INTERVAL_SECONDS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_log_format_rejected_in_yaml() {
        let result = TelemetronConfig::from_yaml_str("logging:\n  format: xml\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telemetron.yaml");
        std::fs::write(&path, "server:\n  port: 7070\n").unwrap();

        let config = TelemetronConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.server.port, 7070);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = TelemetronConfig::from_yaml_file(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
