use std::sync::atomic::{AtomicU64, Ordering};

use egui::{Color32, Pos2};
use image::RgbaImage;

use crate::config::{CanvasConfig, CanvasMode};
use crate::path::StrokePath;
use crate::raster::RasterSurface;
use crate::style::StrokeStyle;

static NEXT_CANVAS_ID: AtomicU64 = AtomicU64::new(1);

/// Generates a process-unique canvas id
fn next_canvas_id() -> u64 {
    NEXT_CANVAS_ID.fetch_add(1, Ordering::SeqCst)
}

/// Freehand drawing surface driven by touch input.
///
/// The canvas owns the live path of the gesture in progress and, in
/// [`CanvasMode::Persistent`], a raster surface sized to the host's display
/// area. The host feeds it touch and size events and paints whatever
/// [`StrokeCanvas::path`] and [`StrokeCanvas::get_image`] expose each frame.
///
/// All operations are synchronous and in-memory. Malformed gesture sequences
/// (a move without a begin) are ignored rather than reported.
#[derive(Debug)]
pub struct StrokeCanvas {
    id: u64,
    mode: CanvasMode,
    style: StrokeStyle,
    background: Color32,

    path: StrokePath,
    raster: Option<RasterSurface>,
    size: Option<[u32; 2]>,

    gesture_open: bool,
    redraw_requested: bool,

    // Bumped on any visible change / only when raster pixels change
    revision: u64,
    raster_revision: u64,
}

impl StrokeCanvas {
    /// Creates a canvas from `config`.
    ///
    /// A stroke width that is not a positive finite number is replaced with
    /// the default pen width.
    pub fn new(config: CanvasConfig) -> Self {
        let mut style = config.style;
        if let Err(err) = style.validate() {
            log::warn!("{}, using width {}", err, StrokeStyle::default().width);
            style.width = StrokeStyle::default().width;
        }
        Self {
            id: next_canvas_id(),
            mode: config.mode,
            style,
            background: config.background,
            path: StrokePath::new(),
            raster: None,
            size: None,
            gesture_open: false,
            redraw_requested: false,
            revision: 0,
            raster_revision: 0,
        }
    }

    /// Vector-only canvas: gestures accumulate into one path
    pub fn transient(style: StrokeStyle) -> Self {
        Self::new(CanvasConfig {
            mode: CanvasMode::Transient,
            style,
            ..CanvasConfig::default()
        })
    }

    /// Raster-backed canvas: finished gestures are committed to pixels
    pub fn persistent(style: StrokeStyle, background: Color32) -> Self {
        Self::new(CanvasConfig {
            mode: CanvasMode::Persistent,
            style,
            background,
        })
    }

    /// Process-unique identity. Clones get a fresh id.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mode(&self) -> CanvasMode {
        self.mode
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// The live path. In persistent mode this only holds the gesture in
    /// progress; in transient mode it holds every gesture since the last clear.
    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    /// The last display size assigned with [`StrokeCanvas::on_size_changed`]
    pub fn size(&self) -> Option<[u32; 2]> {
        self.size
    }

    pub fn is_gesture_open(&self) -> bool {
        self.gesture_open
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Changes only when the raster surface's pixels change
    pub fn raster_revision(&self) -> u64 {
        self.raster_revision
    }

    /// The display area changed size.
    ///
    /// In persistent mode a fresh raster surface filled with the background
    /// color replaces the old one, whose content is lost. The live path is
    /// kept. Zero dimensions are a host error: the size and raster become
    /// unavailable until a valid size arrives.
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring invalid canvas size {}x{}", width, height);
            self.size = None;
            self.raster = None;
        } else {
            log::debug!("Canvas resized to {}x{}", width, height);
            self.size = Some([width, height]);
            if self.mode == CanvasMode::Persistent {
                self.raster = RasterSurface::new(width, height, self.background);
            }
        }
        self.raster_revision += 1;
        self.touched();
    }

    /// A finger went down: open a gesture and start a new subpath at `pos`
    pub fn on_touch_begin(&mut self, pos: Pos2) {
        self.path.move_to(pos);
        self.gesture_open = true;
        self.touched();
    }

    /// The finger moved: extend the open gesture with a segment to `pos`
    pub fn on_touch_move(&mut self, pos: Pos2) {
        if self.gesture_open && self.path.line_to(pos) {
            self.touched();
        } else {
            log::debug!("Ignoring touch move to {:?} outside of a gesture", pos);
            self.request_redraw();
        }
    }

    /// The finger lifted.
    ///
    /// Persistent mode composites the live path onto the raster surface and
    /// resets it. Transient mode keeps the path.
    pub fn on_touch_end(&mut self) {
        self.gesture_open = false;
        if self.mode == CanvasMode::Persistent {
            self.commit_path();
        }
        self.touched();
    }

    fn commit_path(&mut self) {
        match &mut self.raster {
            Some(raster) => {
                if raster.stroke_path(&self.path, &self.style) {
                    log::debug!("Committed stroke of {} points", self.path.point_count());
                    self.raster_revision += 1;
                }
            }
            None if !self.path.is_empty() => {
                log::warn!("No raster surface allocated yet, discarding stroke");
            }
            None => {}
        }
        self.path.reset();
    }

    /// Ask the host to repaint. Idempotent.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Consume a pending redraw request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// A copy of the raster surface's pixels.
    ///
    /// `None` until the first size assignment, and always `None` in transient
    /// mode, which has no raster.
    pub fn get_image(&self) -> Option<RgbaImage> {
        self.raster.as_ref().map(RasterSurface::to_rgba_image)
    }

    /// Return to a blank drawing: empty path, no open gesture, and in
    /// persistent mode a raster wiped to the background color.
    pub fn clear(&mut self) {
        self.path.reset();
        self.gesture_open = false;
        if let Some(raster) = &mut self.raster {
            raster.fill(self.background);
            self.raster_revision += 1;
        }
        self.touched();
    }

    /// Software composite of a frame at the current display size: the
    /// background, the raster surface if any, and the live path on top.
    ///
    /// `None` until a size is known.
    pub fn render(&self) -> Option<RgbaImage> {
        let [width, height] = self.size?;
        let mut frame = match &self.raster {
            Some(raster) => raster.clone(),
            None => RasterSurface::new(width, height, self.background)?,
        };
        frame.stroke_path(&self.path, &self.style);
        Some(frame.to_rgba_image())
    }

    fn touched(&mut self) {
        self.revision += 1;
        self.request_redraw();
    }
}

// A clone diverges from its source, so it must not share texture caches
impl Clone for StrokeCanvas {
    fn clone(&self) -> Self {
        Self {
            id: next_canvas_id(),
            mode: self.mode,
            style: self.style.clone(),
            background: self.background,
            path: self.path.clone(),
            raster: self.raster.clone(),
            size: self.size,
            gesture_open: self.gesture_open,
            redraw_requested: self.redraw_requested,
            revision: self.revision,
            raster_revision: self.raster_revision,
        }
    }
}

impl Default for StrokeCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}
