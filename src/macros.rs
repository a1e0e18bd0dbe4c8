//! Logging macros for ergonomic log message formatting.
//!
//! Each level macro captures the caller's file, line, module and function
//! and forwards a `format_args!` message, so nothing is formatted when the
//! level is disabled.
//!
//! # Examples
//!
//! ```no_run
//! use custom_logger::prelude::*;
//! use custom_logger::{alert, exception, info};
//!
//! let logger = Logger::new()?;
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! alert!(logger, "Port {} is already bound, retrying", port);
//!
//! if let Err(err) = "eighty".parse::<u16>() {
//!     exception!(logger, error = err, "Invalid port setting");
//! }
//! # Ok::<(), custom_logger::LoggerError>(())
//! ```

/// Name of the enclosing function, skipping closure frames.
///
/// # Examples
///
/// ```
/// fn handle_request() -> &'static str {
///     custom_logger::function_name!()
/// }
///
/// assert_eq!(handle_request(), "handle_request");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        let name = name.strip_suffix("::__here").unwrap_or(name);
        name.rsplit("::")
            .find(|segment| *segment != "{{closure}}")
            .unwrap_or(name)
    }};
}

/// [`CallSite`](crate::core::CallSite) for the place the macro is expanded.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::core::CallSite::new(
            ::std::file!(),
            ::std::line!(),
            $crate::function_name!(),
            ::std::module_path!(),
        )
    };
}

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```no_run
/// # use custom_logger::prelude::*;
/// # let logger = Logger::new()?;
/// use custom_logger::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel::from_rank(55), "Custom rank, code {}", 500);
/// # Ok::<(), custom_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, $crate::call_site!(), ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level (10) message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug($crate::call_site!(), ::std::format_args!($($arg)+))
    };
}

/// Log a user-level (15) message.
#[macro_export]
macro_rules! user {
    ($logger:expr, $($arg:tt)+) => {
        $logger.user($crate::call_site!(), ::std::format_args!($($arg)+))
    };
}

/// Log an info-level (30) message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info($crate::call_site!(), ::std::format_args!($($arg)+))
    };
}

/// Log an alert-level (35) message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $logger.alert($crate::call_site!(), ::std::format_args!($($arg)+))
    };
}

/// Log a warning-level (40) message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning($crate::call_site!(), ::std::format_args!($($arg)+))
    };
}

/// Log an error-level (70) message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error($crate::call_site!(), ::std::format_args!($($arg)+))
    };
}

/// Log a critical-level (80) message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $logger.critical($crate::call_site!(), ::std::format_args!($($arg)+))
    };
}

/// Log an exception-level (90) message, optionally with an error attached.
///
/// `error = ..` takes any error value, including a `Box<dyn Error>`.
///
/// ```no_run
/// # use custom_logger::prelude::*;
/// # let logger = Logger::new()?;
/// use custom_logger::exception;
/// exception!(logger, "No error at hand");
///
/// let err = std::fs::read("missing.cfg").unwrap_err();
/// exception!(logger, error = err, "Could not load {}", "missing.cfg");
/// # Ok::<(), custom_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! exception {
    ($logger:expr, error = $err:expr, $($arg:tt)+) => {
        $logger.exception(
            $crate::call_site!(),
            ::std::format_args!($($arg)+),
            ::std::option::Option::Some({
                use $crate::core::CaptureException as _;
                ($err).capture_exception()
            }),
        )
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.exception(
            $crate::call_site!(),
            ::std::format_args!($($arg)+),
            ::std::option::Option::None,
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use parking_lot::Mutex;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logger() -> (TempDir, Captured, Logger) {
        let dir = TempDir::new().expect("temp dir");
        let console = Captured::default();
        let logger = Logger::builder()
            .name("macros")
            .log_path(dir.path().join("app.log"))
            .console_writer(Box::new(console.clone()))
            .use_colors(false)
            .build()
            .expect("build logger");
        (dir, console, logger)
    }

    fn output(console: &Captured) -> String {
        String::from_utf8_lossy(&console.0.lock()).into_owned()
    }

    #[test]
    fn test_function_name() {
        assert_eq!(function_name!(), "test_function_name");

        let from_closure = || function_name!();
        assert_eq!(from_closure(), "test_function_name");
    }

    #[test]
    fn test_call_site() {
        let site = call_site!();
        assert!(site.file.ends_with("macros.rs"));
        assert_eq!(site.function, "test_call_site");
        assert_eq!(site.module_path, "custom_logger::macros::tests");
        assert!(site.line > 0);
    }

    #[test]
    fn test_level_macros() {
        let (_dir, console, logger) = logger();

        debug!(logger, "debug {}", 1);
        user!(logger, "user {}", 2);
        info!(logger, "info {}", 3);
        alert!(logger, "alert {}", 4);
        warning!(logger, "warning {}", 5);
        error!(logger, "error {}", 6);
        critical!(logger, "critical {}", 7);
        exception!(logger, "exception {}", 8);
        log!(logger, LogLevel::INFO, "log {}", 9);

        let text = output(&console);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        for (line, level) in lines.iter().zip([
            "DEBUG", "USER", "INFO", "ALERT", "WARNING", "ERROR", "CRITICAL", "EXCEPTION", "INFO",
        ]) {
            assert!(line.starts_with(&format!("{} ", level)), "line was {:?}", line);
            assert!(line.contains(" test_level_macros "), "line was {:?}", line);
        }
    }

    #[test]
    fn test_exception_macro_with_error() {
        let (_dir, console, logger) = logger();

        let err = "x1".parse::<u8>().unwrap_err();
        exception!(logger, error = err, "bad byte in {}", "header");

        let text = output(&console);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("bad byte in header"));
        assert_eq!(lines[1], "ParseIntError: invalid digit found in string");
    }

    #[test]
    fn test_exception_macro_with_boxed_error() {
        let (_dir, console, logger) = logger();

        let boxed: Box<dyn std::error::Error> = Box::new("x".parse::<i32>().unwrap_err());
        exception!(logger, error = boxed, "failed");

        let text = output(&console);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("failed"));
        assert_eq!(lines[1], "ParseIntError: invalid digit found in string");
    }
}
