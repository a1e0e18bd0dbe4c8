//! File sink implementation

use crate::core::{LogLevel, LogRecord, LoggerError, PlainFormatter, RecordFormatter, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Default location of the persisted log.
pub const DEFAULT_LOG_PATH: &str = "logs/app.log";

pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    formatter: PlainFormatter,
    threshold: LogLevel,
}

impl FileSink {
    /// Open `path` for appending, creating the file if needed.
    ///
    /// The parent directory must already exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(&path, e))?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            formatter: PlainFormatter::new(),
            threshold: LogLevel::from_rank(0),
        })
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    /// Flush and release the file handle. Later writes fail.
    pub fn close(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush().map_err(LoggerError::from),
            None => Ok(()),
        }
    }
}

impl Sink for FileSink {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            LoggerError::writer(format!("file sink '{}' is closed", self.path.display()))
        })?;

        let mut output = self.formatter.format(record);
        output.push('\n');

        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
