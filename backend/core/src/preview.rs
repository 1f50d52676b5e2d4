//! Preview handles for the selected image.
//!
//! Each selection owns exactly one [`PreviewHandle`]. Handles are counted by
//! their [`PreviewRegistry`] and released on drop, so replacing or tearing
//! down a selection never leaks decoded pixels.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

/// Longest edge of the cached thumbnail, in pixels.
const THUMBNAIL_EDGE: u32 = 96;

/// Downscaled RGB pixels kept for terminal rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Thumbnail {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, clamped to the image bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.pixels
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or([0, 0, 0])
    }
}

#[derive(Default)]
struct RegistryInner {
    live: AtomicUsize,
    next_id: AtomicU64,
}

/// Allocates preview handles and tracks how many are alive.
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<RegistryInner>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `payload` into a preview. Undecodable images still get a
    /// handle, just without a thumbnail.
    pub fn acquire(&self, payload: &[u8]) -> PreviewHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.live.fetch_add(1, Ordering::SeqCst);

        let (dimensions, thumbnail) = match image::load_from_memory(payload) {
            Ok(img) => {
                let dimensions = Some((img.width(), img.height()));
                let small = if img.width() > THUMBNAIL_EDGE || img.height() > THUMBNAIL_EDGE {
                    img.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE)
                } else {
                    img
                };
                let small = small.to_rgb8();
                let thumbnail = Thumbnail {
                    width: small.width(),
                    height: small.height(),
                    pixels: small.pixels().map(|p| p.0).collect(),
                };
                (dimensions, Some(thumbnail))
            }
            Err(err) => {
                debug!(id, error = %err, "Preview decode failed; showing metadata only");
                (None, None)
            }
        };

        trace!(id, bytes = payload.len(), "Preview acquired");
        PreviewHandle {
            id,
            byte_len: payload.len(),
            dimensions,
            thumbnail,
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of handles not yet released.
    pub fn live(&self) -> usize {
        self.inner.live.load(Ordering::SeqCst)
    }
}

/// Display-only preview of a selection. Released when dropped.
pub struct PreviewHandle {
    id: u64,
    byte_len: usize,
    dimensions: Option<(u32, u32)>,
    thumbnail: Option<Thumbnail>,
    registry: Arc<RegistryInner>,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Original image dimensions, if the image could be decoded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.live.fetch_sub(1, Ordering::SeqCst);
        trace!(id = self.id, "Preview released");
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("id", &self.id)
            .field("byte_len", &self.byte_len)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 10, 30]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_thumbnail_within_bounds() {
        let registry = PreviewRegistry::new();
        let handle = registry.acquire(&png(400, 200));

        assert_eq!(handle.dimensions(), Some((400, 200)));
        let thumb = handle.thumbnail().unwrap();
        assert!(thumb.width() <= THUMBNAIL_EDGE && thumb.height() <= THUMBNAIL_EDGE);
        assert_eq!(thumb.pixel(0, 0), [200, 10, 30]);
        // Out-of-range reads clamp instead of panicking.
        assert_eq!(thumb.pixel(10_000, 10_000), [200, 10, 30]);
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let registry = PreviewRegistry::new();
        let handle = registry.acquire(&png(4, 2));
        let thumb = handle.thumbnail().unwrap();
        assert_eq!((thumb.width(), thumb.height()), (4, 2));
    }

    #[test]
    fn undecodable_payload_still_gets_a_handle() {
        let registry = PreviewRegistry::new();
        let handle = registry.acquire(b"\xFF\xD8\xFF truncated");
        assert!(handle.thumbnail().is_none());
        assert_eq!(handle.dimensions(), None);
        assert_eq!(handle.byte_len(), 13);
    }

    #[test]
    fn handles_are_released_on_drop() {
        let registry = PreviewRegistry::new();
        let first = registry.acquire(&png(2, 2));
        let second = registry.acquire(&png(2, 2));
        assert_eq!(registry.live(), 2);
        assert_ne!(first.id(), second.id());

        drop(first);
        assert_eq!(registry.live(), 1);
        drop(second);
        assert_eq!(registry.live(), 0);
    }
}
