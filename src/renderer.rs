use egui::{Color32, ColorImage, Context, Painter, Pos2, Rect, Shape, pos2, vec2};
use image::RgbaImage;

use crate::canvas::StrokeCanvas;
use crate::path::StrokePath;
use crate::style::StrokeStyle;
use crate::texture::RasterTextures;

/// Convert a raster image into an egui image
pub fn color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Line shapes for every drawable subpath, offset so that canvas coordinate
/// (0, 0) lands on `origin`
pub fn path_shapes(path: &StrokePath, style: &StrokeStyle, origin: Pos2) -> Vec<Shape> {
    let offset = origin.to_vec2();
    path.subpaths()
        .filter(|subpath| subpath.len() >= 2)
        .map(|subpath| {
            let points = subpath.iter().map(|p| *p + offset).collect();
            Shape::line(points, style.egui_stroke())
        })
        .collect()
}

/// Paints a [`StrokeCanvas`] with an egui painter.
///
/// The raster goes first (as a cached texture), then the live path on top,
/// matching what [`StrokeCanvas::render`] composites in software.
#[derive(Debug, Default)]
pub struct CanvasPainter {
    textures: RasterTextures,
}

impl CanvasPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn textures(&self) -> &RasterTextures {
        &self.textures
    }

    /// Paint the canvas into `rect`
    ///
    /// Args:
    ///     ctx (egui::Context): used to upload the raster texture
    ///     painter (egui::Painter): the painter to draw with
    ///     rect (egui::Rect): screen area the canvas occupies
    pub fn paint(&mut self, ctx: &Context, painter: &Painter, rect: Rect, canvas: &StrokeCanvas) {
        painter.rect_filled(rect, 0.0, canvas.background());

        if let (Some(texture), Some([width, height])) =
            (self.textures.texture_for(ctx, canvas), canvas.size())
        {
            let image_rect = Rect::from_min_size(rect.min, vec2(width as f32, height as f32));
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture, image_rect, uv, Color32::WHITE);
        }

        for shape in path_shapes(canvas.path(), canvas.style(), rect.min) {
            painter.add(shape);
        }
    }
}
