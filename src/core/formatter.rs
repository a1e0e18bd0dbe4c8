//! Line formatters for log records
//!
//! Both formatters produce the same field layout:
//!
//! ```text
//! <LEVEL> <YYYY-MM-DD HH:MM:SS>.<ms> <name> <parent/file> <function> <line> |<pid>:<tid>| <message>
//! ```
//!
//! The colored variant wraps each field in its own style and colors the
//! message with the style of the record's level. Exception details, when
//! present, follow on the next lines without color.

use super::log_record::LogRecord;
use super::style::{Field, StyleTable};

/// Timestamp layout shared by both sinks; milliseconds are appended after a `.`
/// without padding, so 7ms renders as `10:30:45.7`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait RecordFormatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
}

/// Raw field values of a record, in layout order.
fn fields(record: &LogRecord) -> [(Field, String); 10] {
    [
        (Field::LevelName, record.level.name()),
        (Field::Asctime, record.timestamp.format(DATE_FORMAT).to_string()),
        (
            Field::Msecs,
            record.timestamp.timestamp_subsec_millis().min(999).to_string(),
        ),
        (Field::Name, record.logger_name.clone()),
        (Field::ShortenedPath, record.shortened_path.clone()),
        (Field::Function, record.function.clone()),
        (Field::Line, record.line.to_string()),
        (Field::Process, record.process_id.to_string()),
        (Field::Thread, record.thread_id.clone()),
        (Field::Message, record.message.clone()),
    ]
}

/// Join rendered fields into the fixed layout.
fn layout(rendered: [String; 10], record: &LogRecord) -> String {
    let [level, asctime, msecs, name, path, function, line, process, thread, message] = rendered;
    let mut out = format!(
        "{} {}.{} {} {} {} {} |{}:{}| {}",
        level, asctime, msecs, name, path, function, line, process, thread, message
    );

    if let Some(ref exception) = record.exception {
        out.push('\n');
        out.push_str(&exception.render());
    }

    out
}

/// Plain text, used by the file sink.
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl RecordFormatter for PlainFormatter {
    fn format(&self, record: &LogRecord) -> String {
        layout(fields(record).map(|(_, value)| value), record)
    }
}

/// ANSI-colored text, used by the console sink.
#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter {
    styles: StyleTable,
}

impl ColoredFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_styles(styles: StyleTable) -> Self {
        Self { styles }
    }

    fn paint(&self, field: Field, value: &str, level_name: &str) -> String {
        let style = match field {
            Field::Message => self
                .styles
                .level(level_name)
                .or_else(|| self.styles.field(Field::Message)),
            other => self.styles.field(other),
        };

        match style {
            Some(style) => style.apply(value).to_string(),
            None => value.to_string(),
        }
    }
}

impl RecordFormatter for ColoredFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let fields = fields(record);
        let level_name = fields[0].1.clone();
        let rendered = fields.map(|(field, value)| self.paint(field, &value, &level_name));
        layout(rendered, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::{register_default_levels, LogLevel};
    use crate::core::log_record::{CallSite, ExceptionInfo};
    use crate::core::style::TextStyle;
    use chrono::{Local, TimeZone};

    fn record(level: LogLevel, message: &str) -> LogRecord {
        register_default_levels();
        let site = CallSite::new("/srv/app/handlers/orders.rs", 88, "place_order", "app::handlers");
        let mut record = LogRecord::build("shop", level, &site, message, None);
        record.timestamp = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(7);
        record.process_id = 4242;
        record.thread_id = "3".to_string();
        record
    }

    #[test]
    fn test_plain_layout() {
        let line = PlainFormatter::new().format(&record(LogLevel::INFO, "order placed"));
        assert_eq!(
            line,
            format!(
                "INFO 2025-01-08 10:30:45.7 shop handlers{}orders.rs place_order 88 |4242:3| order placed",
                std::path::MAIN_SEPARATOR
            )
        );
    }

    #[test]
    fn test_milliseconds_are_not_padded() {
        let mut rec = record(LogLevel::INFO, "timing");
        rec.timestamp = rec.timestamp + chrono::Duration::milliseconds(116);
        let line = PlainFormatter::new().format(&rec);
        assert!(line.contains(" 10:30:45.123 "), "line was {:?}", line);

        rec.timestamp = rec.timestamp - chrono::Duration::milliseconds(123);
        let line = PlainFormatter::new().format(&rec);
        assert!(line.contains(" 10:30:45.0 "), "line was {:?}", line);
    }

    #[test]
    fn test_plain_has_no_escape_codes() {
        let line = PlainFormatter::new().format(&record(LogLevel::CRITICAL, "disk full"));
        assert!(!line.contains('\u{1b}'));
        assert!(line.starts_with("CRITICAL "));
    }

    #[test]
    fn test_exception_follows_line() {
        let mut rec = record(LogLevel::EXCEPTION, "request failed");
        rec.exception = Some(ExceptionInfo {
            kind: "ParseIntError".to_string(),
            message: "invalid digit found in string".to_string(),
            causes: Vec::new(),
        });

        let text = PlainFormatter::new().format(&rec);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("request failed"));
        assert_eq!(lines[1], "ParseIntError: invalid digit found in string");
    }

    #[test]
    fn test_colored_styles_fields() {
        colored::control::set_override(true);

        let formatter = ColoredFormatter::new();
        let line = formatter.format(&record(LogLevel::ALERT, "low stock"));

        let level = TextStyle::color("214").bold().apply("ALERT").to_string();
        let message = TextStyle::color("166").bold().apply("low stock").to_string();
        assert!(line.starts_with(&level), "line was {:?}", line);
        assert!(line.ends_with(&message), "line was {:?}", line);
        // thread id has no style of its own
        assert!(line.contains(":3|"));
    }

    #[test]
    fn test_unstyled_level_uses_message_style() {
        colored::control::set_override(true);

        let formatter = ColoredFormatter::with_styles(StyleTable::default());
        let line = formatter.format(&record(LogLevel::from_rank(5000), "odd level"));

        let message = TextStyle::color("white").apply("odd level").to_string();
        assert!(line.ends_with(&message), "line was {:?}", line);
    }
}
