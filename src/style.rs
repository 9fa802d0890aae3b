use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Shape drawn at the open ends of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Shape drawn where two segments of a stroke meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Paint applied uniformly to every stroke of a canvas.
///
/// Strokes are always outlines; there is no fill mode. The defaults are a
/// black, 10px wide, aliased pen with butt caps and miter joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub anti_alias: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 10.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            anti_alias: false,
        }
    }
}

impl StrokeStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Reject widths that cannot be rasterised
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stroke width must be a positive number, got {}",
                self.width
            )));
        }
        Ok(())
    }

    /// The equivalent egui stroke, for hosts painting the live path themselves
    pub fn egui_stroke(&self) -> egui::Stroke {
        egui::Stroke::new(self.width, self.color)
    }

    pub(crate) fn skia_paint(&self) -> tiny_skia::Paint<'static> {
        let [r, g, b, a] = self.color.to_srgba_unmultiplied();
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = self.anti_alias;
        paint
    }

    pub(crate) fn skia_stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.width,
            line_cap: match self.cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match self.join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..tiny_skia::Stroke::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pen() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color32::BLACK);
        assert_eq!(style.width, 10.0);
        assert_eq!(style.cap, LineCap::Butt);
        assert!(!style.anti_alias);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_invalid_widths() {
        for width in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let style = StrokeStyle::new(Color32::RED, width);
            let err = style.validate().unwrap_err();
            assert!(err.to_string().contains("stroke width"));
        }
    }

    #[test]
    fn test_skia_stroke_mapping() {
        let style = StrokeStyle::new(Color32::BLUE, 4.0)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Bevel);
        let stroke = style.skia_stroke();

        assert_eq!(stroke.width, 4.0);
        assert_eq!(stroke.line_cap, tiny_skia::LineCap::Round);
        assert_eq!(stroke.line_join, tiny_skia::LineJoin::Bevel);
    }
}
