//! Configured logging example
//!
//! Builds a logger from a JSON configuration with a stricter floor for the
//! file, raises the minimum level at runtime and prints what ended up in the
//! log file.
//!
//! Run with: cargo run --example file_logging

use custom_logger::prelude::*;
use custom_logger::{alert, info, user, warning};

fn main() -> Result<()> {
    let dir = std::env::temp_dir().join("custom_logger_demo");
    std::fs::create_dir_all(&dir)?;
    let log_path = dir.join("demo.log");

    let json = format!(
        r#"{{
            "logger_name": "demo",
            "log_path": {},
            "min_level": "USER",
            "file_threshold": "INFO",
            "console_target": "stdout",
            "styles": {{ "levels": {{ "user": {{ "color": "51", "bold": true }} }} }}
        }}"#,
        serde_json::to_string(&log_path)?
    );
    let config = LoggerConfig::from_json_str(&json)?;
    let logger = Logger::from_config(&config)?;

    user!(logger, "console only, the file keeps INFO and above");
    info!(logger, "log file: {}", logger.file_path().display());

    logger.set_min_level(LogLevel::ALERT);
    info!(logger, "hidden after raising the minimum level");
    alert!(logger, "still visible");
    warning!(logger, "also visible");

    logger.flush()?;

    println!("\n--- {} ---", log_path.display());
    print!("{}", std::fs::read_to_string(&log_path)?);
    println!(
        "emitted: {}, filtered: {}",
        logger.metrics().emitted_count(),
        logger.metrics().filtered_count()
    );

    Ok(())
}
