//! # Custom Logger
//!
//! A leveled logging facade that writes every record to two places at once:
//! a colorized console stream and a plain-text log file.
//!
//! ## Features
//!
//! - **Extra Levels**: USER (15), ALERT (35) and EXCEPTION (90) alongside
//!   DEBUG, INFO, WARNING, ERROR and CRITICAL
//! - **Call-Site Capture**: macros record file, line and function; lines show
//!   a short `parent/file` path
//! - **Best-Effort Writes**: a failing sink never breaks the caller or the
//!   other sink
//! - **Thread Safe**: one lock per sink, so concurrent lines never interleave

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, CaptureException, EmitOptions, ExceptionInfo, LogLevel, LogRecord, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink, StyleTable,
        TextStyle, WriteErrorPolicy,
    };
    pub use crate::sinks::{ConsoleSink, ConsoleTarget, FileSink};
}

pub use crate::core::{
    register_level, shorten_path, CallSite, EmitOptions, ExceptionInfo, LogLevel, LogRecord,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, WriteErrorPolicy,
};
pub use crate::sinks::{ConsoleSink, ConsoleTarget, FileSink};
