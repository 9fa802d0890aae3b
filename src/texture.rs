use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::canvas::StrokeCanvas;
use crate::renderer::color_image;

/// Keeps a canvas raster uploaded as an egui texture.
///
/// The texture is refreshed only when a different canvas is shown or the
/// canvas's raster revision changes, so strokes in progress (which live in
/// the vector path) never cause an upload.
pub struct RasterTextures {
    name: String,
    options: TextureOptions,
    handle: Option<TextureHandle>,
    /// Canvas id and raster revision the handle was last synced with
    synced: Option<(u64, u64)>,
    upload_count: u64,
}

// Custom Debug implementation since TextureHandle doesn't implement Debug
impl std::fmt::Debug for RasterTextures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterTextures")
            .field("name", &self.name)
            .field("has_texture", &self.handle.is_some())
            .field("synced", &self.synced)
            .field("upload_count", &self.upload_count)
            .finish()
    }
}

impl RasterTextures {
    /// Creates a cache whose texture is registered under `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            // Nearest keeps the raster pixel exact when shown 1:1
            options: TextureOptions::NEAREST,
            handle: None,
            synced: None,
            upload_count: 0,
        }
    }

    /// Gets the texture for the canvas raster, uploading it if stale.
    ///
    /// Returns `None` when the canvas has no raster (transient mode, or no
    /// size assigned yet).
    pub fn texture_for(&mut self, ctx: &Context, canvas: &StrokeCanvas) -> Option<TextureId> {
        let key = (canvas.id(), canvas.raster_revision());
        if self.synced == Some(key) {
            return self.handle.as_ref().map(TextureHandle::id);
        }
        self.synced = Some(key);

        let Some(image) = canvas.get_image() else {
            self.handle = None;
            return None;
        };

        let color = color_image(&image);
        match &mut self.handle {
            Some(handle) => handle.set(color, self.options),
            None => self.handle = Some(ctx.load_texture(&self.name, color, self.options)),
        }
        self.upload_count += 1;
        log::debug!("Uploaded raster texture {} (canvas {}, revision {})", self.name, key.0, key.1);

        self.handle.as_ref().map(TextureHandle::id)
    }

    /// Forget the synced revision so the next call re-uploads
    pub fn invalidate(&mut self) {
        self.synced = None;
    }

    /// Number of uploads performed so far
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }
}

impl Default for RasterTextures {
    fn default() -> Self {
        Self::new("stroke_canvas_raster")
    }
}
