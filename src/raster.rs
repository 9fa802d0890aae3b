use egui::Color32;
use image::{Rgba, RgbaImage};
use tiny_skia::{Pixmap, Transform};

use crate::path::StrokePath;
use crate::style::StrokeStyle;

/// A fixed-size RGBA pixel buffer that strokes are composited onto.
///
/// Backed by a tiny-skia pixmap (premultiplied alpha). Pixels handed out
/// through [`RasterSurface::to_rgba_image`] are straight alpha.
#[derive(Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl RasterSurface {
    /// Allocate a surface filled with `background`.
    ///
    /// Returns `None` when either dimension is zero.
    pub fn new(width: u32, height: u32, background: Color32) -> Option<Self> {
        let pixmap = Pixmap::new(width, height)?;
        let mut surface = Self { pixmap };
        surface.fill(background);
        Some(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Color32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Composite `path` onto the surface using `style`.
    ///
    /// Returns false if the path had no segments to draw or the style has no
    /// usable width. tiny-skia would draw a zero width as a hairline.
    pub fn stroke_path(&mut self, path: &StrokePath, style: &StrokeStyle) -> bool {
        if let Err(err) = style.validate() {
            log::warn!("Not stroking path: {}", err);
            return false;
        }
        let Some(skia_path) = path.to_skia_path() else {
            return false;
        };
        self.pixmap.stroke_path(
            &skia_path,
            &style.skia_paint(),
            &style.skia_stroke(),
            Transform::identity(),
            None,
        );
        true
    }

    /// Straight-alpha color of a single pixel, `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        // Pixmap::pixel only checks the flat index, so x past the edge wraps
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    /// Copy the pixels out as an `image` buffer
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            match self.pixmap.pixel(x, y) {
                Some(pixel) => {
                    let color = pixel.demultiply();
                    Rgba([color.red(), color.green(), color.blue(), color.alpha()])
                }
                None => Rgba([0, 0, 0, 0]),
            }
        })
    }
}
