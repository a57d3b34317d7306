//! Application configuration.

use crate::error::{AppError, AppResult};
use parkwx_dashboard::DashboardConfig;
use parkwx_generator::GeneratorConfig;
use parkwx_store::DEFAULT_RETENTION;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PARKWX_CONFIG";
/// Config file used when neither `--config` nor `PARKWX_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Readings kept before the oldest are evicted. Default: 1000.
    #[serde(default = "default_retention")]
    pub retention: usize,
}

fn default_retention() -> usize {
    DEFAULT_RETENTION
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            retention: default_retention(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is unset (e.g. "info,parkwx=debug").
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Top-level configuration, one section per component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Resolve the config path: CLI argument, then `PARKWX_CONFIG`, then the default.
    pub fn resolve_path(cli: Option<String>) -> String {
        cli.or_else(|| std::env::var(CONFIG_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    ///
    /// The flag is true when the file existed.
    pub fn load(path: &str) -> AppResult<(Self, bool)> {
        if Path::new(path).exists() {
            Ok((Self::from_file(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.store.retention == 0 {
            return Err(AppError::Config(
                "store.retention must be at least 1".to_string(),
            ));
        }
        if self.generator.interval_ms == 0 {
            return Err(AppError::Config(
                "generator.interval_ms must be positive".to_string(),
            ));
        }
        for (name, p) in [
            ("generator.alert_probability", self.generator.alert_probability),
            ("generator.watch_probability", self.generator.watch_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AppError::Config(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.generator.enabled);
        assert_eq!(config.generator.interval_ms, 4000);
        assert_eq!(config.store.retention, 1000);
        assert_eq!(config.dashboard.port, 5000);
        assert!(config.telemetry.log_level.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [generator]
            interval_ms = 1000
            alert_probability = 0.5

            [store]
            retention = 20

            [dashboard]
            host = "127.0.0.1"
            port = 8080

            [telemetry]
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.generator.interval_ms, 1000);
        assert_eq!(config.generator.alert_probability, 0.5);
        assert_eq!(config.generator.watch_probability, 0.1);
        assert_eq!(config.store.retention, 20);
        assert_eq!(config.dashboard.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.dashboard.default_logs_limit, 50);
        assert_eq!(config.telemetry.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        for bad in [
            "[store]\nretention = 0",
            "[generator]\ninterval_ms = 0",
            "[generator]\nalert_probability = 1.5",
            "[generator]\nwatch_probability = -0.1",
        ] {
            assert!(
                matches!(AppConfig::from_toml(bad), Err(AppError::Config(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[store\nretention = 1"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let (config, found) = AppConfig::load("does/not/exist.toml").unwrap();
        assert!(!found);
        assert_eq!(config.store.retention, 1000);
    }

    #[test]
    fn test_cli_path_wins() {
        assert_eq!(
            AppConfig::resolve_path(Some("custom.toml".to_string())),
            "custom.toml"
        );
    }

    #[test]
    fn test_shipped_default_config_parses() {
        let content = include_str!("../../../config/default.toml");
        let config = AppConfig::from_toml(content).unwrap();
        assert_eq!(config.store.retention, 1000);
        assert_eq!(config.generator.interval_ms, 4000);
    }
}
