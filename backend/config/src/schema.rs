use std::fmt;
use std::path::PathBuf;

use textlens_core::Locale;

use crate::redact::mask_secret;

/// Credential for the extraction service. `Debug` and `Display` never
/// print the full value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw secret, for handing to the HTTP client.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", mask_secret(&self.0))
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_secret(&self.0))
    }
}

/// textlens runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub api_key: ApiKey,
    /// Model name used in `models/{model}:generateContent`
    pub model: String,
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Language of user-facing messages
    pub locale: Locale,
    /// Directory for the rolling log file
    pub log_dir: PathBuf,
    /// Log level / `EnvFilter` directive
    pub log_level: String,
}
