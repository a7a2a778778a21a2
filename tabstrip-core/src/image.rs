//! Sticker/image loading seam.
//!
//! Sticker artwork is fetched asynchronously by the host, keyed by an opaque
//! [`StickerId`]. The engine requests a [`StickerHandle`] up front and draws
//! nothing for that slot until the handle resolves; resolution flips the
//! handle's state and the next recorded frame picks the image up.

use std::sync::Arc;

use parking_lot::Mutex;

/// Decoded RGBA8 image data shared with the host renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Raw RGBA8 pixel buffer, `width * height * 4` bytes.
    pub data: Arc<Vec<u8>>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Opaque identifier of a sticker or reaction asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StickerId(pub i64);

/// A resolved sticker: decoded image plus the scale it should be displayed at.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSticker {
    /// Decoded artwork.
    pub image: Arc<ImageData>,
    /// Display scale applied when drawing into the sticker slot.
    pub display_scale: f32,
}

/// Late-binding slot for an asynchronously loaded sticker.
///
/// Created unresolved by [`StickerLoader::request`]; the loader fills it in
/// whenever decoding completes. Reads never block the frame.
#[derive(Debug, Default)]
pub struct StickerHandle {
    slot: Mutex<Option<ResolvedSticker>>,
}

impl StickerHandle {
    /// Creates an unresolved handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the decoded image and display scale. Idempotent; the latest call
    /// wins.
    pub fn resolve(&self, image: Arc<ImageData>, display_scale: f32) {
        *self.slot.lock() = Some(ResolvedSticker {
            image,
            display_scale,
        });
    }

    /// Returns the resolved sticker, if loading has completed.
    pub fn resolved(&self) -> Option<ResolvedSticker> {
        self.slot.lock().clone()
    }

    /// Whether the artwork has arrived.
    pub fn is_resolved(&self) -> bool {
        self.slot.lock().is_some()
    }
}

/// Host-provided asynchronous sticker loader.
pub trait StickerLoader: Send + Sync {
    /// Requests the artwork for `id`, returning a handle that resolves later.
    /// Repeated requests for the same id may return the same handle.
    fn request(&self, id: StickerId) -> Arc<StickerHandle>;

    /// Releases any association held for `id`. Called when the owning item is
    /// removed or the widget is torn down.
    fn release(&self, _id: StickerId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> Arc<ImageData> {
        Arc::new(ImageData {
            data: Arc::new(vec![0; 4]),
            width: 1,
            height: 1,
        })
    }

    #[test]
    fn test_handle_starts_unresolved() {
        let handle = StickerHandle::new();
        assert!(!handle.is_resolved());
        assert!(handle.resolved().is_none());
    }

    #[test]
    fn test_resolve_latest_wins() {
        let handle = StickerHandle::new();
        handle.resolve(test_image(), 1.0);
        handle.resolve(test_image(), 0.75);
        let resolved = handle.resolved().expect("handle was resolved");
        assert_eq!(resolved.display_scale, 0.75);
    }
}
