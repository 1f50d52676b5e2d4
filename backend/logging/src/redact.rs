//! Log Redaction Layer
//!
//! Scrubs API keys and access tokens from strings prior to logging.
//! Transport errors can echo request URLs and headers, so every diagnostic
//! that may carry one goes through here first.

use regex::Regex;
use std::sync::LazyLock;

static GOOGLE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z\-_]{35}").unwrap());
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9]{32,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)((?:[?&]key=)|(?:x-goog-api-key[:=]\s*))[^&\s]+").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let mut redacted = GOOGLE_KEY_RE.replace_all(input, "[REDACTED_TOKEN]").to_string();
    redacted = API_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]").to_string();
    redacted = KEY_PARAM_RE
        .replace_all(&redacted, "${1}[REDACTED_TOKEN]")
        .to_string();
    redacted
}
