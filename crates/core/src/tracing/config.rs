//! Configuration for tracing and instrumentation

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for the console layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Main instrumentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentationConfig {
    /// Service name, used as the default filter target
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter (e.g., "info", "debug", "notes=trace")
    pub log_level: String,
    /// Console output format
    #[serde(default)]
    pub format: LogFormat,
    /// Optional file that receives a copy of every event (no ANSI colours)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            service_name: "notes".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "warn".to_string(),
            format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

impl InstrumentationConfig {
    /// Create configuration from environment variables
    ///
    /// Supports the following environment variables:
    /// - `RUST_LOG`: Log level filter
    /// - `NOTES_LOG_FORMAT`: `pretty` or `json`
    /// - `NOTES_LOG_FILE`: path of an additional log file
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let log_level = std::env::var("RUST_LOG").unwrap_or(defaults.log_level);

        let format = match std::env::var("NOTES_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            log_level,
            format,
            log_file: std::env::var_os("NOTES_LOG_FILE").map(PathBuf::from),
            ..defaults
        }
    }

    /// Override the log level with a verbosity count from the command line
    ///
    /// `0` keeps the configured level, `1` is debug for the notes crates,
    /// anything higher turns on trace everywhere.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.log_level = match verbosity {
            0 => self.log_level,
            1 => "notes=debug,notes_http=debug,notes_frontend_common=debug".to_string(),
            _ => "trace".to_string(),
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InstrumentationConfig::default();
        assert_eq!(config.service_name, "notes");
        assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_verbosity_zero_keeps_level() {
        let config = InstrumentationConfig {
            log_level: "error".to_string(),
            ..InstrumentationConfig::default()
        }
        .with_verbosity(0);
        assert_eq!(config.log_level, "error");
    }

    #[test]
    fn test_verbosity_levels() {
        let debug = InstrumentationConfig::default().with_verbosity(1);
        assert!(debug.log_level.contains("notes_http=debug"));

        let trace = InstrumentationConfig::default().with_verbosity(3);
        assert_eq!(trace.log_level, "trace");
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        let config: InstrumentationConfig = serde_json::from_str(
            r#"{"service_name":"notes","service_version":"0","log_level":"info","format":"json"}"#,
        )
        .unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.log_file.is_none());
    }
}
