//! Logger facade
//!
//! A [`Logger`] owns one console sink and one file sink for its whole life.
//! Each level method filters on the minimum level, builds a single
//! [`LogRecord`] and hands it to both sinks. Sink failures are reported
//! according to the [`WriteErrorPolicy`] and never reach the caller.

use super::{
    config::{LoggerConfig, WriteErrorPolicy},
    error::{LoggerError, Result},
    log_level::{register_default_levels, LogLevel},
    log_record::{CallSite, ExceptionInfo, LogRecord},
    metrics::LoggerMetrics,
    sink::Sink,
    style::StyleTable,
};
use crate::sinks::{ConsoleSink, ConsoleTarget, FileSink};
use parking_lot::{Mutex, RwLock};
use std::fmt::{self, Write as _};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Per-call options for [`Logger::exception_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Attach the supplied error's type, message and cause chain
    pub capture_exception: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            capture_exception: true,
        }
    }
}

pub struct Logger {
    name: String,
    min_level: RwLock<LogLevel>,
    console: Mutex<ConsoleSink>,
    file: Mutex<FileSink>,
    file_path: PathBuf,
    write_error_policy: WriteErrorPolicy,
    /// Metrics for observability (emitted, filtered, failed writes)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with every default: name `custom_logger`, file `logs/app.log`,
    /// all levels enabled, colored output on stderr.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config.clone()).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```no_run
    /// use custom_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("billing")
    ///     .log_path("/var/log/billing.log")
    ///     .min_level(LogLevel::INFO)
    ///     .build()?;
    /// # Ok::<(), custom_logger::LoggerError>(())
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log `message` at `level`.
    ///
    /// # Panics
    ///
    /// Panics if `message`'s `Display` implementation returns an error, the
    /// same way `format!` does. Use [`Logger::try_log`] to get that as an
    /// error value instead.
    pub fn log(&self, level: LogLevel, site: CallSite, message: impl fmt::Display) {
        if let Err(err) = self.emit(level, &site, &message, None) {
            panic!("{}", err);
        }
    }

    /// Like [`Logger::log`], but a failing `Display` implementation is
    /// returned as [`LoggerError::FormatterError`].
    ///
    /// Sink write failures are still handled internally and do not show up
    /// here.
    pub fn try_log(
        &self,
        level: LogLevel,
        site: CallSite,
        message: impl fmt::Display,
    ) -> Result<()> {
        self.emit(level, &site, &message, None)
    }

    #[inline]
    pub fn debug(&self, site: CallSite, message: impl fmt::Display) {
        self.log(LogLevel::DEBUG, site, message);
    }

    #[inline]
    pub fn user(&self, site: CallSite, message: impl fmt::Display) {
        self.log(LogLevel::USER, site, message);
    }

    #[inline]
    pub fn info(&self, site: CallSite, message: impl fmt::Display) {
        self.log(LogLevel::INFO, site, message);
    }

    #[inline]
    pub fn alert(&self, site: CallSite, message: impl fmt::Display) {
        self.log(LogLevel::ALERT, site, message);
    }

    #[inline]
    pub fn warning(&self, site: CallSite, message: impl fmt::Display) {
        self.log(LogLevel::WARNING, site, message);
    }

    #[inline]
    pub fn error(&self, site: CallSite, message: impl fmt::Display) {
        self.log(LogLevel::ERROR, site, message);
    }

    #[inline]
    pub fn critical(&self, site: CallSite, message: impl fmt::Display) {
        self.log(LogLevel::CRITICAL, site, message);
    }

    /// Log at EXCEPTION level, attaching `error` when given.
    pub fn exception(
        &self,
        site: CallSite,
        message: impl fmt::Display,
        error: Option<ExceptionInfo>,
    ) {
        self.exception_with_options(site, message, error, EmitOptions::default());
    }

    pub fn exception_with_options(
        &self,
        site: CallSite,
        message: impl fmt::Display,
        error: Option<ExceptionInfo>,
        options: EmitOptions,
    ) {
        let error = error.filter(|_| options.capture_exception);
        if let Err(err) = self.emit(LogLevel::EXCEPTION, &site, &message, error) {
            panic!("{}", err);
        }
    }

    fn emit(
        &self,
        level: LogLevel,
        site: &CallSite,
        message: &dyn fmt::Display,
        exception: Option<ExceptionInfo>,
    ) -> Result<()> {
        if !self.is_enabled_for(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let mut text = String::new();
        if write!(text, "{}", message).is_err() {
            return Err(LoggerError::formatter(
                format!("{}:{}", site.file, site.line),
                "a Display implementation returned an error",
            ));
        }

        let record = LogRecord::build(&self.name, level, site, &text, exception);
        self.metrics.record_emitted();

        self.write_to(&self.console, &record);
        self.write_to(&self.file, &record);
        Ok(())
    }

    /// Write one record to one sink, isolating failures and panics from the
    /// other sink and from the caller.
    fn write_to<S: Sink>(&self, sink: &Mutex<S>, record: &LogRecord) {
        let mut sink = sink.lock();
        if record.level < sink.threshold() {
            return;
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.emit(record)));
        let failure = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(panic_info) => {
                if let Some(s) = panic_info.downcast_ref::<&str>() {
                    format!("panicked: {}", s)
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    format!("panicked: {}", s)
                } else {
                    "panicked".to_string()
                }
            }
        };

        self.metrics.record_write_failure();
        if self.write_error_policy == WriteErrorPolicy::Warn {
            let _ = writeln!(
                std::io::stderr(),
                "[LOGGER ERROR] Sink '{}' failed to write record from {}:{}: {}",
                sink.name(),
                record.pathname,
                record.line,
                failure
            );
        }
    }

    /// Flush both sinks, returning the first failure.
    pub fn flush(&self) -> Result<()> {
        let console = self.console.lock().flush();
        let file = self.file.lock().flush();
        console.and(file)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level())
            .field("file_path", &self.file_path)
            .field("write_error_policy", &self.write_error_policy)
            .finish_non_exhaustive()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            if self.write_error_policy == WriteErrorPolicy::Warn {
                let _ = writeln!(std::io::stderr(), "[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            }
        }

        let failures = self.metrics.write_failures();
        if failures > 0 && self.write_error_policy == WriteErrorPolicy::Warn {
            let _ = writeln!(
                std::io::stderr(),
                "[LOGGER WARNING] Logger '{}' shutting down with {} failed sink writes",
                self.name,
                failures
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use custom_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .name("worker")
///     .min_level(LogLevel::USER)
///     .console_target(ConsoleTarget::Stdout)
///     .write_error_policy(WriteErrorPolicy::Ignore)
///     .build()?;
/// # Ok::<(), custom_logger::LoggerError>(())
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    console_writer: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            console_writer: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.logger_name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Only records at or above `level` reach the console
    #[must_use = "builder methods return a new value"]
    pub fn console_threshold(mut self, level: LogLevel) -> Self {
        self.config.console_threshold = Some(level);
        self
    }

    /// Only records at or above `level` reach the log file
    #[must_use = "builder methods return a new value"]
    pub fn file_threshold(mut self, level: LogLevel) -> Self {
        self.config.file_threshold = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_target(mut self, target: ConsoleTarget) -> Self {
        self.config.console_target = target;
        self
    }

    /// Send console output to `writer` instead of the configured target
    #[must_use = "builder methods return a new value"]
    pub fn console_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.console_writer = Some(writer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.config.use_colors = use_colors;
        self
    }

    /// Styles merged over the built-in console styles
    #[must_use = "builder methods return a new value"]
    pub fn styles(mut self, styles: StyleTable) -> Self {
        self.config.styles = Some(styles);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn write_error_policy(mut self, policy: WriteErrorPolicy) -> Self {
        self.config.write_error_policy = policy;
        self
    }

    /// Build the Logger
    ///
    /// Fails if the log file cannot be opened for appending.
    pub fn build(self) -> Result<Logger> {
        let LoggerBuilder {
            config,
            console_writer,
        } = self;

        register_default_levels();

        let styles = match config.styles {
            Some(overrides) => StyleTable::default().merged(overrides),
            None => StyleTable::default(),
        };
        let mut console = match console_writer {
            Some(writer) => ConsoleSink::from_writer(writer),
            None => ConsoleSink::new(config.console_target),
        }
        .with_colors(config.use_colors)
        .with_styles(styles);
        if let Some(threshold) = config.console_threshold {
            console = console.with_threshold(threshold);
        }

        let mut file = FileSink::new(&config.log_path)?;
        if let Some(threshold) = config.file_threshold {
            file = file.with_threshold(threshold);
        }

        Ok(Logger {
            name: config.logger_name,
            min_level: RwLock::new(config.min_level),
            console: Mutex::new(console),
            file: Mutex::new(file),
            file_path: config.log_path,
            write_error_policy: config.write_error_policy,
            metrics: LoggerMetrics::new(),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
