//! Basic logger usage example
//!
//! Logs one message at every level to stderr and `logs/app.log`, then an
//! EXCEPTION record carrying a captured error.
//!
//! Run with: cargo run --example basic_usage

use custom_logger::prelude::*;
use custom_logger::{alert, critical, debug, error, exception, info, user, warning};

fn main() -> Result<()> {
    std::fs::create_dir_all("logs")?;

    let logger = Logger::new()?;

    debug!(logger, "debug message");
    info!(logger, "info message");
    warning!(logger, "warning message");
    error!(logger, "error message");
    critical!(logger, "critical message");
    exception!(logger, "exception message");
    alert!(logger, "alert message");
    user!(logger, "user message");

    match "1/0".parse::<i32>() {
        Ok(value) => info!(logger, "parsed {}", value),
        Err(err) => exception!(logger, error = err, "could not evaluate {:?}", "1/0"),
    }

    Ok(())
}
