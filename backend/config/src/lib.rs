//! `textlens-config`: configuration read once at process start.
//!
//! Provides:
//! - Typed [`Config`] with a redacting [`ApiKey`] wrapper
//! - Environment loading (`Config::from_env` / `Config::from_vars`)
//! - Default values for model, endpoint and log location

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;

pub use defaults::{default_log_dir, DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_MODEL};
pub use env::{ConfigError, CREDENTIAL_VARS};
pub use redact::mask_secret;
pub use schema::{ApiKey, Config};
