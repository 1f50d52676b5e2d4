//! Wire types for the Gemini `generateContent` REST call.

use serde::{Deserialize, Serialize};

use crate::encoding::encode_payload;
use textlens_core::ImageMime;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning parts, which are not part of the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentRequest {
    /// One user turn: the image first, then the instruction.
    pub fn image_with_prompt(payload: &[u8], mime: ImageMime, prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: mime.as_str().to_string(),
                            data: encode_payload(payload),
                        }),
                        ..Default::default()
                    },
                    Part {
                        text: Some(prompt.to_string()),
                        ..Default::default()
                    },
                ],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate: its non-thought text parts joined in order.
    ///
    /// `None` when there is no candidate or it carries no text part at all;
    /// an empty text part yields `Some("")`.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts
            .iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}
