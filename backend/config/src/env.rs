//! Loading [`Config`] from environment variables.
//!
//! The credential is read exactly once here and then travels as a plain
//! value; nothing downstream looks at the process environment again.

use std::collections::HashMap;
use std::path::PathBuf;

use textlens_core::Locale;
use thiserror::Error;
use tracing::debug;

use crate::defaults::{default_log_dir, DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_MODEL};
use crate::schema::{ApiKey, Config};

/// Variables checked for the credential, in order.
pub const CREDENTIAL_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API credential is not set; export GEMINI_API_KEY (or API_KEY)")]
    MissingCredential,

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_vars(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            env.get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let (var, key) = CREDENTIAL_VARS
            .iter()
            .find_map(|&var| get(var).map(|key| (var, key)))
            .ok_or(ConfigError::MissingCredential)?;
        debug!(source = var, "Loaded API credential");

        let locale = match get("TEXTLENS_LOCALE") {
            Some(raw) => raw.parse::<Locale>().map_err(|e| ConfigError::InvalidValue {
                var: "TEXTLENS_LOCALE".to_string(),
                reason: e.to_string(),
            })?,
            None => Locale::default(),
        };

        let base_url = get("TEXTLENS_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "TEXTLENS_BASE_URL".to_string(),
                reason: format!("expected an http(s) URL, got {base_url:?}"),
            });
        }

        Ok(Self {
            api_key: ApiKey::new(key),
            model: get("TEXTLENS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
            locale,
            log_dir: get("TEXTLENS_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_log_dir),
            log_level: get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn missing_credential_is_fatal() {
        let err = Config::from_vars(&env(&[("TEXTLENS_MODEL", "x")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let err = Config::from_vars(&env(&[("GEMINI_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));
    }

    #[test]
    fn falls_back_to_api_key_var() {
        let config = Config::from_vars(&env(&[("API_KEY", "AIza-fallback-123")])).unwrap();
        assert_eq!(config.api_key.expose(), "AIza-fallback-123");
    }

    #[test]
    fn gemini_key_takes_precedence() {
        let config = Config::from_vars(&env(&[
            ("GEMINI_API_KEY", "primary-key-0001"),
            ("API_KEY", "secondary-key-0002"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.expose(), "primary-key-0001");
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_vars(&env(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.ends_with("textlens/logs"));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_vars(&env(&[
            ("GEMINI_API_KEY", "k"),
            ("TEXTLENS_MODEL", "gemini-2.0-flash"),
            ("TEXTLENS_BASE_URL", "http://127.0.0.1:9000/"),
            ("TEXTLENS_LOCALE", "ko"),
            ("TEXTLENS_LOG_DIR", "/tmp/tl"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.locale, Locale::Ko);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/tl"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn rejects_bad_locale_and_url() {
        let err = Config::from_vars(&env(&[("GEMINI_API_KEY", "k"), ("TEXTLENS_LOCALE", "fr")]))
            .unwrap_err();
        assert!(err.to_string().contains("TEXTLENS_LOCALE"));

        let err = Config::from_vars(&env(&[("GEMINI_API_KEY", "k"), ("TEXTLENS_BASE_URL", "ftp://x")]))
            .unwrap_err();
        assert!(err.to_string().contains("TEXTLENS_BASE_URL"));
    }

    #[test]
    fn debug_output_masks_credential() {
        let config = Config::from_vars(&env(&[("GEMINI_API_KEY", "AIzaSyD-very-secret-value")])).unwrap();
        let shown = format!("{config:?}");
        assert!(!shown.contains("very-secret"));
        assert!(shown.contains("AIza***"));
    }
}
