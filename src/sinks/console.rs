//! Console sink implementation

use crate::core::{
    ColoredFormatter, LogLevel, LogRecord, PlainFormatter, RecordFormatter, Result, Sink,
    StyleTable,
};
use serde::Deserialize;
use std::io::Write;

/// Standard stream the console sink writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

pub struct ConsoleSink {
    writer: Box<dyn Write + Send>,
    use_colors: bool,
    colored: ColoredFormatter,
    threshold: LogLevel,
}

impl ConsoleSink {
    pub fn new(target: ConsoleTarget) -> Self {
        let writer: Box<dyn Write + Send> = match target {
            ConsoleTarget::Stderr => Box::new(std::io::stderr()),
            ConsoleTarget::Stdout => Box::new(std::io::stdout()),
        };
        Self::from_writer(writer)
    }

    /// Write to an arbitrary stream instead of stderr/stdout.
    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            use_colors: true,
            colored: ColoredFormatter::new(),
            threshold: LogLevel::from_rank(0),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Replace the style table used when colors are enabled
    ///
    /// # Example
    ///
    /// ```
    /// use custom_logger::sinks::{ConsoleSink, ConsoleTarget};
    /// use custom_logger::core::{StyleTable, TextStyle};
    ///
    /// let mut styles = StyleTable::default();
    /// styles.levels.insert("alert".to_string(), TextStyle::color("green").bold());
    ///
    /// let sink = ConsoleSink::new(ConsoleTarget::Stdout).with_styles(styles);
    /// ```
    #[must_use]
    pub fn with_styles(mut self, styles: StyleTable) -> Self {
        self.colored = ColoredFormatter::with_styles(styles);
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    fn render(&self, record: &LogRecord) -> String {
        if self.use_colors {
            self.colored.format(record)
        } else {
            PlainFormatter.format(record)
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(ConsoleTarget::default())
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.render(record);
        writeln!(self.writer, "{}", output)?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CallSite;
    use parking_lot::Mutex;
    use std::sync::Arc;

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

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn record(message: &str) -> LogRecord {
        crate::core::register_default_levels();
        let site = CallSite::new("src/bin/server.rs", 10, "main", "server");
        LogRecord::build("console-test", LogLevel::WARNING, &site, message, None)
    }

    #[test]
    fn test_one_line_per_record() {
        let captured = Captured::default();
        let mut sink = ConsoleSink::from_writer(Box::new(captured.clone())).with_colors(false);

        sink.emit(&record("first")).expect("emit");
        sink.emit(&record("second")).expect("emit");

        let text = captured.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("WARNING "));
        assert!(lines[0].ends_with(" first"));
        assert!(lines[1].ends_with(" second"));
    }

    #[test]
    fn test_colors_disabled_writes_plain() {
        colored::control::set_override(true);

        let captured = Captured::default();
        let mut sink = ConsoleSink::from_writer(Box::new(captured.clone())).with_colors(false);
        sink.emit(&record("plain")).expect("emit");

        assert!(!captured.text().contains('\u{1b}'));
    }

    #[test]
    fn test_colors_enabled_writes_escapes() {
        colored::control::set_override(true);

        let captured = Captured::default();
        let mut sink = ConsoleSink::from_writer(Box::new(captured.clone()));
        sink.emit(&record("colored")).expect("emit");

        assert!(captured.text().contains('\u{1b}'));
        assert!(captured.text().contains("colored"));
    }

    #[test]
    fn test_threshold() {
        let sink = ConsoleSink::default().with_threshold(LogLevel::ERROR);
        assert_eq!(sink.threshold(), LogLevel::ERROR);
        assert_eq!(sink.name(), "console");
    }
}
