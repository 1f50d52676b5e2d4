pub mod error;
pub mod messages;
pub mod mime;
pub mod preview;
pub mod traits;
pub mod types;

pub use error::{ExtractError, SelectError, UserError};
pub use messages::{Locale, Messages, UnknownLocale};
pub use mime::{detect_mime, mime_from_extension, sniff_mime};
pub use preview::{PreviewHandle, PreviewRegistry, Thumbnail};
pub use traits::TextExtractor;
pub use types::{ImageMime, ImageSelection, UiState, MAX_IMAGE_BYTES};
