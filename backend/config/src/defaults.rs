//! Default configuration values.

use std::path::PathBuf;

/// Model used for extraction calls.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `<data_local_dir>/textlens/logs`, or the temp dir when there is no home.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("textlens")
        .join("logs")
}
