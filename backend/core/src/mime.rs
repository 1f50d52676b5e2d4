//! MIME type detection for picked images.
//!
//! Content sniffing wins over the file extension; the extension is only
//! consulted when the magic bytes are not recognised at all.

use std::path::Path;

use image::ImageFormat;

use crate::types::ImageMime;

/// Detect the MIME type of an image from its leading bytes.
///
/// Returns `None` for formats outside the accepted set.
pub fn sniff_mime(bytes: &[u8]) -> Option<ImageMime> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Png => Some(ImageMime::Png),
        ImageFormat::Jpeg => Some(ImageMime::Jpeg),
        ImageFormat::WebP => Some(ImageMime::Webp),
        _ => None,
    }
}

/// Detect MIME type by file extension.
pub fn mime_from_extension(path: &Path) -> Option<ImageMime> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "png" => Some(ImageMime::Png),
        "jpg" | "jpeg" => Some(ImageMime::Jpeg),
        "webp" => Some(ImageMime::Webp),
        _ => None,
    }
}

/// Resolve the MIME type for a picked file.
pub fn detect_mime(path: &Path, bytes: &[u8]) -> Option<ImageMime> {
    match image::guess_format(bytes) {
        Ok(_) => sniff_mime(bytes),
        Err(_) => mime_from_extension(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_MAGIC: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";
    const WEBP_MAGIC: &[u8] = b"RIFF\x24\0\0\0WEBPVP8 ";
    const GIF_MAGIC: &[u8] = b"GIF89a\x01\0\x01\0";

    #[test]
    fn sniffs_accepted_formats() {
        assert_eq!(sniff_mime(PNG_MAGIC), Some(ImageMime::Png));
        assert_eq!(sniff_mime(JPEG_MAGIC), Some(ImageMime::Jpeg));
        assert_eq!(sniff_mime(WEBP_MAGIC), Some(ImageMime::Webp));
    }

    #[test]
    fn rejects_recognised_but_unaccepted_format() {
        // A GIF renamed to .png is still a GIF.
        assert_eq!(detect_mime(&PathBuf::from("cat.png"), GIF_MAGIC), None);
    }

    #[test]
    fn content_beats_extension() {
        assert_eq!(
            detect_mime(&PathBuf::from("scan.webp"), JPEG_MAGIC),
            Some(ImageMime::Jpeg)
        );
    }

    #[test]
    fn falls_back_to_extension() {
        assert_eq!(detect_mime(&PathBuf::from("photo.JPG"), b"??"), Some(ImageMime::Jpeg));
        assert_eq!(detect_mime(&PathBuf::from("notes.txt"), b"hello"), None);
    }
}
