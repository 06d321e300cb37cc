//! Logging setup shared by the library's consumers
//!
//! Output always goes to stderr so stdout stays free for results.
//!
//! # Examples
//!
//! ```no_run
//! use libsocialhub::logging::{LoggingConfig, LogFormat};
//!
//! LoggingConfig::new(LogFormat::Json, "info".to_string(), false).init();
//!
//! // Or read SOCIALHUB_LOG_FORMAT / SOCIALHUB_LOG_LEVEL
//! libsocialhub::logging::init_default();
//! ```

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_ENV: &str = "SOCIALHUB_LOG_FORMAT";
pub const LOG_LEVEL_ENV: &str = "SOCIALHUB_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text, no colors
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line with colors
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
}

impl LoggingConfig {
    /// * `level` - minimum level or a full `EnvFilter` directive
    /// * `verbose` - forces `debug` regardless of `level`
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
        }
    }

    /// The filter directive actually applied
    pub fn directive(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.level
        }
    }

    /// Install the global subscriber
    ///
    /// `RUST_LOG` wins over the configured level when set. Calling this a
    /// second time in the same process is a no-op.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.directive()));

        let installed = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .flatten_event(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .try_init(),
        };

        if installed.is_err() {
            tracing::debug!("Logging already initialized");
        }
    }
}

/// Initialize logging from `SOCIALHUB_LOG_FORMAT` and `SOCIALHUB_LOG_LEVEL`
///
/// Falls back to text at `info`.
///
/// ```bash
/// export SOCIALHUB_LOG_FORMAT=json
/// export SOCIALHUB_LOG_LEVEL=debug
/// hub-post "Hello world"
/// ```
pub fn init_default() {
    config_from_env(false, "info").init();
}

/// Configuration from `SOCIALHUB_LOG_FORMAT` and `SOCIALHUB_LOG_LEVEL`
///
/// `default_level` applies when the level variable is unset. An unparsable
/// format falls back to text.
pub fn config_from_env(verbose: bool, default_level: &str) -> LoggingConfig {
    let format = std::env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_level.to_string());

    LoggingConfig::new(format, level, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("PRETTY".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        let err = "yaml".parse::<LogFormat>().unwrap_err();
        assert!(err.contains("Invalid log format: 'yaml'"));
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Text.to_string(), "text");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
    }

    #[test]
    fn test_verbose_forces_debug() {
        let config = LoggingConfig::new(LogFormat::Text, "warn".to_string(), true);
        assert_eq!(config.directive(), "debug");

        let config = LoggingConfig::new(LogFormat::Text, "warn".to_string(), false);
        assert_eq!(config.directive(), "warn");
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var(LOG_FORMAT_ENV, "json");
        std::env::set_var(LOG_LEVEL_ENV, "trace");
        let config = config_from_env(false, "info");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "trace");

        std::env::set_var(LOG_FORMAT_ENV, "bogus");
        std::env::remove_var(LOG_LEVEL_ENV);
        let config = config_from_env(false, "info");
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level, "info");

        let config = config_from_env(true, "error");
        assert_eq!(config.level, "error");
        assert_eq!(config.directive(), "debug");

        std::env::remove_var(LOG_FORMAT_ENV);
    }
}
