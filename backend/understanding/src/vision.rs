//! Vision extraction: transcribe the text in an image using Gemini.
//!
//! One request per image, no retry, no streaming. Failures are logged here
//! with the credential scrubbed and handed to callers as an opaque
//! [`ExtractError`].

use std::fmt;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use textlens_core::{ExtractError, ImageMime, TextExtractor};
use textlens_logging::redact_sensitive_data;

use crate::gemini::{GenerateContentRequest, GenerateContentResponse};

/// Fixed instruction sent alongside every image.
pub const EXTRACTION_PROMPT: &str = "Extract every character and digit visible in this image, \
exactly and in reading order. Do not add any other explanation.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini `generateContent` client.
pub struct GeminiExtractor {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiExtractor {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, payload: &[u8], mime: ImageMime) -> Result<String> {
        let body = GenerateContentRequest::image_with_prompt(payload, mime, EXTRACTION_PROMPT);

        debug!(model = %self.model, mime = %mime, bytes = payload.len(), "Sending request to Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .context("Gemini HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            bail!("Gemini returned {}: {}", status, error_body);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        match parsed.text() {
            Some(text) => Ok(text),
            None => bail!(
                "Gemini response carried no text (finish reason: {})",
                parsed.finish_reason().unwrap_or("unknown")
            ),
        }
    }
}

impl fmt::Debug for GeminiExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiExtractor")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

#[async_trait]
impl TextExtractor for GeminiExtractor {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn extract(&self, payload: &[u8], mime: ImageMime) -> Result<String, ExtractError> {
        let start = Instant::now();
        match self.generate(payload, mime).await {
            Ok(text) => {
                info!(
                    model = %self.model,
                    chars = text.chars().count(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Extracted text from image"
                );
                Ok(text)
            }
            Err(err) => {
                let cause = redact_sensitive_data(&format!("{err:#}"));
                error!(model = %self.model, error = %cause, "Error generating content from Gemini");
                Err(ExtractError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Seen {
        path: String,
        api_key: Option<String>,
        body: Value,
    }

    #[derive(Clone)]
    struct MockGemini {
        status: StatusCode,
        reply: Value,
        seen: Arc<Mutex<Vec<Seen>>>,
    }

    async fn record(
        State(mock): State<MockGemini>,
        uri: Uri,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        mock.seen.lock().unwrap().push(Seen {
            path: uri.path().to_string(),
            api_key: headers
                .get("x-goog-api-key")
                .and_then(|v| v.to_str().ok())
                .map(String::from),
            body,
        });
        (mock.status, Json(mock.reply.clone()))
    }

    /// Serve `reply` with `status` on a random local port.
    async fn spawn_mock(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Seen>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(record).with_state(MockGemini {
            status,
            reply,
            seen: Arc::clone(&seen),
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), seen)
    }

    fn reply_with(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn returns_text_verbatim() {
        let (url, seen) = spawn_mock(StatusCode::OK, reply_with("  AB12\n가나 ")).await;
        let extractor = GeminiExtractor::new("test-key", "gemini-2.5-flash").with_base_url(&url);

        let text = extractor.extract(b"AB12", ImageMime::Png).await.unwrap();
        assert_eq!(text, "  AB12\n가나 ");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/v1beta/models/gemini-2.5-flash:generateContent");
        assert_eq!(seen[0].api_key.as_deref(), Some("test-key"));

        let parts = &seen[0].body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "QUIxMg==");
        assert_eq!(parts[1]["text"], EXTRACTION_PROMPT);
    }

    #[tokio::test]
    async fn empty_text_is_a_valid_result() {
        let (url, _) = spawn_mock(StatusCode::OK, reply_with("")).await;
        let extractor = GeminiExtractor::new("k", "m").with_base_url(url);
        assert_eq!(extractor.extract(b"x", ImageMime::Jpeg).await.unwrap(), "");
    }

    #[tokio::test]
    async fn http_error_becomes_opaque_failure() {
        let (url, _) = spawn_mock(
            StatusCode::FORBIDDEN,
            json!({ "error": { "code": 403, "message": "API key not valid" } }),
        )
        .await;
        let extractor = GeminiExtractor::new("bad-key", "m").with_base_url(url);

        let err = extractor.extract(b"x", ImageMime::Png).await.unwrap_err();
        assert_eq!(err, ExtractError);
        let shown = err.to_string();
        assert!(!shown.contains("403"));
        assert!(!shown.contains("API key"));
    }

    #[tokio::test]
    async fn missing_text_is_a_failure() {
        let (url, _) = spawn_mock(
            StatusCode::OK,
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
        )
        .await;
        let extractor = GeminiExtractor::new("k", "m").with_base_url(url);
        assert!(extractor.extract(b"x", ImageMime::Webp).await.is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let extractor = GeminiExtractor::new("k", "m").with_base_url(format!("http://{addr}"));
        assert_eq!(extractor.extract(b"x", ImageMime::Png).await, Err(ExtractError));
    }

    #[test]
    fn debug_hides_the_key() {
        let extractor = GeminiExtractor::new("AIza-super-secret", "m");
        assert!(!format!("{extractor:?}").contains("super-secret"));
        assert_eq!(
            extractor.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/m:generateContent"
        );
    }
}
