//! Logger configuration
//!
//! Every field has a default, so a configuration file only needs the keys it
//! wants to change:
//!
//! ```
//! use custom_logger::core::{LoggerConfig, LogLevel};
//!
//! let config = LoggerConfig::from_json_str(r#"{ "min_level": "ALERT" }"#).unwrap();
//! assert_eq!(config.min_level, LogLevel::ALERT);
//! assert_eq!(config.log_path.to_str(), Some("logs/app.log"));
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::style::StyleTable;
use crate::sinks::{ConsoleTarget, DEFAULT_LOG_PATH};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Logger name used when none is given.
pub const DEFAULT_LOGGER_NAME: &str = "custom_logger";

/// What to do when a sink fails to write a record after construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteErrorPolicy {
    /// Print one diagnostic to stderr and carry on
    #[default]
    Warn,
    /// Drop the failure silently (still counted in metrics)
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub logger_name: String,
    pub log_path: PathBuf,
    pub min_level: LogLevel,
    /// Extra floor applied by the console sink only
    pub console_threshold: Option<LogLevel>,
    /// Extra floor applied by the file sink only
    pub file_threshold: Option<LogLevel>,
    pub console_target: ConsoleTarget,
    pub use_colors: bool,
    /// Overrides merged over the built-in console styles
    pub styles: Option<StyleTable>,
    pub write_error_policy: WriteErrorPolicy,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            min_level: LogLevel::DEBUG,
            console_threshold: None,
            file_threshold: None,
            console_target: ConsoleTarget::Stderr,
            use_colors: true,
            styles: None,
            write_error_policy: WriteErrorPolicy::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(format!("reading logger config '{}'", path.display()), e)
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.logger_name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "logger_name must not be empty"));
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "log_path must not be empty"));
        }
        Ok(())
    }
}
