//! Transport encoding for inline image data (standard base64 with padding).

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_payload(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .context("Invalid base64 payload")
}
