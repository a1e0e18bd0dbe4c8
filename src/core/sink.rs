//! Sink trait for log output destinations

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};

pub trait Sink: Send {
    /// Render `record` with this sink's formatter and write it out.
    fn emit(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Records below this level are skipped by the logger.
    fn threshold(&self) -> LogLevel {
        LogLevel::from_rank(0)
    }
}
