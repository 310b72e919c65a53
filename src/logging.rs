//! Logging initialization.
//!
//! Logs go to stderr; stdout is reserved for the transcript.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize logging to stderr, plus the configured log file if any.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let Some(path) = config.file.as_deref() else {
        init_console_only(&config.level);
        return Ok(());
    };

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let log_file = Arc::new(File::create(path)?);
    install(
        BoxMakeWriter::new(std::io::stderr.and(log_file)),
        false,
        &config.level,
    );
    Ok(())
}

/// Initialize stderr-only logging.
pub fn init_console_only(level: &str) {
    install(BoxMakeWriter::new(std::io::stderr), true, level);
}

fn install(writer: BoxMakeWriter, ansi: bool, level: &str) {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(level).into());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true),
        )
        .with(filter)
        .init();
}
