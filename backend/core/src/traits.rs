use async_trait::async_trait;

use crate::error::ExtractError;
use crate::types::ImageMime;

/// Turns one image into the text visible in it.
///
/// Implementations log the cause of a failure themselves and return the
/// opaque [`ExtractError`]; callers only ever see that a call failed.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extractor name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Run a single extraction round trip. The returned text is verbatim.
    async fn extract(&self, payload: &[u8], mime: ImageMime) -> Result<String, ExtractError>;
}
