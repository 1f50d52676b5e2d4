//! Structured Logger
//!
//! Wraps `tracing` to provide JSON-formatted file output with daily rotation
//! and environment-based level control. The terminal UI owns stdout, so the
//! console layer is opt-in and writes to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix; rotated files are `textlens.log.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "textlens.log";

/// Initialize the global structured logger.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_logger(log_dir: &Path, level: &str, console: bool) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    Ok(())
}
