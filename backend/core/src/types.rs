use std::fmt;

use bytes::Bytes;

use crate::preview::PreviewHandle;

/// Advisory size limit shown in the picker. Larger files are still accepted.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image formats the extractor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMime {
    Png,
    Jpeg,
    Webp,
}

impl ImageMime {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The image currently chosen for analysis.
///
/// Never mutated: a new pick builds a new selection and the old one is
/// dropped, which releases its preview handle.
pub struct ImageSelection {
    source: String,
    mime: ImageMime,
    payload: Bytes,
    preview: PreviewHandle,
}

impl ImageSelection {
    pub fn new(source: impl Into<String>, mime: ImageMime, payload: Bytes, preview: PreviewHandle) -> Self {
        Self {
            source: source.into(),
            mime,
            payload,
            preview,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }

    pub fn byte_len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_oversized(&self) -> bool {
        self.payload.len() > MAX_IMAGE_BYTES
    }
}

impl fmt::Debug for ImageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSelection")
            .field("source", &self.source)
            .field("mime", &self.mime)
            .field("bytes", &self.payload.len())
            .field("preview", &self.preview.id())
            .finish()
    }
}

/// Visible state of the output pane. Exactly one variant holds at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(String),
    Failure(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            UiState::Success(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Failure(message) => Some(message),
            _ => None,
        }
    }
}
