pub mod encoding;
pub mod gemini;
pub mod vision;

pub use encoding::{decode_payload, encode_payload};
pub use gemini::{GenerateContentRequest, GenerateContentResponse};
pub use vision::{GeminiExtractor, EXTRACTION_PROMPT};
