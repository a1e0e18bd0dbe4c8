//! Sink implementations

pub mod console;
pub mod file;

pub use console::{ConsoleSink, ConsoleTarget};
pub use file::{FileSink, DEFAULT_LOG_PATH};

pub use crate::core::Sink;
