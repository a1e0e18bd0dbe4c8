//! Core logger types and traits

pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod style;

pub use config::{LoggerConfig, WriteErrorPolicy, DEFAULT_LOGGER_NAME};
pub use error::{LoggerError, Result};
pub use formatter::{ColoredFormatter, PlainFormatter, RecordFormatter, DATE_FORMAT};
pub use log_level::{level_for_name, level_name, register_default_levels, register_level, LogLevel};
pub use log_record::{shorten_path, CallSite, CaptureException, ExceptionInfo, LogRecord};
pub use logger::{EmitOptions, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use style::{Field, StyleTable, TextStyle};
