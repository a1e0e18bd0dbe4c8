//! Log record structure and call-site metadata

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::error::Error;
use std::path::{Path, MAIN_SEPARATOR};

// Thread-local cache for the thread id to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get cached thread id, computing and caching it on first access.
///
/// `ThreadId` only exposes its number through `Debug` (`ThreadId(7)`), so the
/// digits are pulled out of that rendering.
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let debug = format!("{:?}", std::thread::current().id());
                let digits: String = debug.chars().filter(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    debug
                } else {
                    digits
                }
            })
            .clone()
    })
}

/// Source location of a logging call, captured by the logging macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
    pub module_path: &'static str,
}

impl CallSite {
    pub const fn new(
        file: &'static str,
        line: u32,
        function: &'static str,
        module_path: &'static str,
    ) -> Self {
        Self {
            file,
            line,
            function,
            module_path,
        }
    }
}

/// Error details attached to EXCEPTION records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionInfo {
    /// Short type name of the error, e.g. `ParseIntError`
    pub kind: String,
    pub message: String,
    /// Messages of the `source()` chain, outermost first
    pub causes: Vec<String>,
}

impl ExceptionInfo {
    pub fn capture<E: Error + ?Sized>(error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            kind: kind_of(error),
            message: error.to_string(),
            causes,
        }
    }

    /// Traceback-style rendering appended under the record's line.
    ///
    /// Each rendered line is escaped, so an error message cannot add lines
    /// of its own.
    pub fn render(&self) -> String {
        let mut out = format!("{}: {}", self.kind, escape_control(&self.message));
        for cause in &self.causes {
            out.push_str("\n  caused by: ");
            out.push_str(&escape_control(cause));
        }
        out
    }
}

/// Errors that can be attached to an EXCEPTION record.
///
/// Implemented for every sized `Error` and for the boxed trait objects that
/// `?` usually produces, so `exception!(logger, error = err, ..)` accepts a
/// `Box<dyn Error>` as well as a concrete error.
pub trait CaptureException {
    fn capture_exception(&self) -> ExceptionInfo;
}

impl<E: Error> CaptureException for E {
    fn capture_exception(&self) -> ExceptionInfo {
        ExceptionInfo::capture(self)
    }
}

macro_rules! impl_capture_for_dyn {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl CaptureException for $ty {
                fn capture_exception(&self) -> ExceptionInfo {
                    ExceptionInfo::capture(self)
                }
            }
        )+
    };
}

impl_capture_for_dyn!(dyn Error, dyn Error + Send, dyn Error + Send + Sync);

/// Type name shown for an error.
///
/// A trait object only knows its trait statically, so the concrete name is
/// taken from the leading identifier of its `Debug` output when there is one.
fn kind_of<E: Error + ?Sized>(error: &E) -> String {
    let static_name = std::any::type_name::<E>();
    if static_name.contains("dyn ") {
        if let Some(name) = debug_type_name(&format!("{:?}", error)) {
            return name;
        }
    }
    short_type_name(static_name).to_string()
}

/// `ParseIntError { kind: InvalidDigit }` → `ParseIntError`
fn debug_type_name(debug: &str) -> Option<String> {
    let ident: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    let is_type = ident.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    is_type.then_some(ident)
}

/// Replace newlines, carriage returns and tabs with escape sequences.
fn escape_control(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Strip module paths and generic arguments: `std::num::ParseIntError` → `ParseIntError`.
///
/// Trait objects report their trait, e.g. `Box<dyn Error + Send>` → `Error`.
fn short_type_name(full: &str) -> &str {
    let full = full.trim_start_matches('&');
    let base = match full.rfind("dyn ") {
        Some(pos) => full[pos + 4..].split(" + ").next().unwrap_or(full),
        None => full.split('<').next().unwrap_or(full),
    };
    let base = base.trim_end_matches('>');
    base.rsplit("::").next().unwrap_or(base)
}

/// Last two segments of `path` joined with the platform separator.
///
/// A path with a single segment comes back unchanged.
pub fn shorten_path(path: &str) -> String {
    let as_path = Path::new(path);
    match (as_path.file_name(), as_path.parent().and_then(Path::file_name)) {
        (Some(file), Some(parent)) => format!(
            "{}{}{}",
            parent.to_string_lossy(),
            MAIN_SEPARATOR,
            file.to_string_lossy()
        ),
        (Some(file), None) => file.to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub logger_name: String,
    pub pathname: String,
    pub shortened_path: String,
    pub function: String,
    pub line: u32,
    pub module_path: String,
    pub process_id: u32,
    pub thread_id: String,
    pub message: String,
    pub exception: Option<ExceptionInfo>,
}

impl LogRecord {
    /// Build a record for the calling thread.
    ///
    /// The message is escaped to prevent log injection: one call always
    /// yields one line per sink.
    pub fn build(
        logger_name: &str,
        level: LogLevel,
        site: &CallSite,
        message: &str,
        exception: Option<ExceptionInfo>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            logger_name: logger_name.to_string(),
            pathname: site.file.to_string(),
            shortened_path: shorten_path(site.file),
            function: site.function.to_string(),
            line: site.line,
            module_path: site.module_path.to_string(),
            process_id: std::process::id(),
            thread_id: get_thread_id(),
            message: escape_control(message),
            exception,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(std::num::ParseIntError);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "could not read port")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_shorten_path() {
        assert_eq!(shorten_path("/a/b/c/file.py"), format!("c{}file.py", MAIN_SEPARATOR));
        assert_eq!(shorten_path("file.py"), "file.py");
        assert_eq!(shorten_path("src/main.rs"), format!("src{}main.rs", MAIN_SEPARATOR));
        assert_eq!(shorten_path("/main.rs"), "main.rs");
    }

    #[test]
    fn test_build_captures_call_site() {
        let site = CallSite::new("src/core/logger.rs", 42, "emit", "custom_logger::core");
        let record = LogRecord::build("app", LogLevel::INFO, &site, "hello", None);

        assert_eq!(record.logger_name, "app");
        assert_eq!(record.pathname, "src/core/logger.rs");
        assert_eq!(record.shortened_path, format!("core{}logger.rs", MAIN_SEPARATOR));
        assert_eq!(record.function, "emit");
        assert_eq!(record.line, 42);
        assert_eq!(record.process_id, std::process::id());
        assert!(record.thread_id.chars().all(|c| c.is_ascii_digit()));
        assert!(record.exception.is_none());
    }

    #[test]
    fn test_message_is_single_line() {
        let site = CallSite::new("main.rs", 1, "main", "app");
        let record = LogRecord::build("app", LogLevel::INFO, &site, "a\nb\tc", None);
        assert_eq!(record.message, "a\\nb\\tc");
    }

    #[test]
    fn test_exception_capture() {
        let inner = "x".parse::<u16>().unwrap_err();
        let info = ExceptionInfo::capture(&Outer(inner));

        assert_eq!(info.kind, "Outer");
        assert_eq!(info.message, "could not read port");
        assert_eq!(info.causes, vec!["invalid digit found in string".to_string()]);
        assert_eq!(
            info.render(),
            "Outer: could not read port\n  caused by: invalid digit found in string"
        );
    }

    #[test]
    fn test_boxed_error_keeps_concrete_type() {
        fn parse_port(raw: &str) -> std::result::Result<u16, Box<dyn Error + Send + Sync>> {
            Ok(raw.parse::<u16>()?)
        }

        let boxed = parse_port("http").unwrap_err();
        let info = boxed.capture_exception();
        assert_eq!(info.kind, "ParseIntError");
        assert_eq!(info.message, "invalid digit found in string");

        let plain: Box<dyn Error> = Box::new(Outer("x".parse::<u16>().unwrap_err()));
        let info = plain.capture_exception();
        assert_eq!(info.kind, "Outer");
        assert_eq!(info.causes.len(), 1);
    }

    #[test]
    fn test_boxed_string_error_falls_back_to_trait_name() {
        let boxed: Box<dyn Error> = "plain text failure".into();
        let info = boxed.capture_exception();
        assert_eq!(info.kind, "Error");
        assert_eq!(info.message, "plain text failure");
    }

    #[test]
    fn test_exception_render_is_escaped() {
        let info = ExceptionInfo {
            kind: "ConfigError".to_string(),
            message: "bad value\nINFO forged line".to_string(),
            causes: vec!["line one\r\nline two".to_string()],
        };

        let rendered = info.render();
        assert_eq!(rendered.lines().count(), 2);
        assert_eq!(
            rendered,
            "ConfigError: bad value\\nINFO forged line\n  caused by: line one\\r\\nline two"
        );
    }

    #[test]
    fn test_debug_type_name() {
        assert_eq!(
            debug_type_name("ParseIntError { kind: InvalidDigit }"),
            Some("ParseIntError".to_string())
        );
        assert_eq!(debug_type_name("\"quoted\""), None);
        assert_eq!(debug_type_name("lowercase"), None);
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("std::num::ParseIntError"), "ParseIntError");
        assert_eq!(short_type_name("&core::num::error::ParseIntError"), "ParseIntError");
        assert_eq!(short_type_name("alloc::boxed::Box<dyn core::error::Error>"), "Error");
        assert_eq!(
            short_type_name("alloc::boxed::Box<dyn core::error::Error + core::marker::Send>"),
            "Error"
        );
        assert_eq!(short_type_name("alloc::vec::Vec<u8>"), "Vec");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
