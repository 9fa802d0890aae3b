use egui::Pos2;

/// The live vector path of a canvas: connected line segments grouped into
/// subpaths, one subpath per touch gesture.
///
/// `move_to` opens a new subpath and `line_to` extends the open one. A
/// `move_to` that directly follows another `move_to` replaces it, so taps
/// that never moved do not pile up as empty subpaths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokePath {
    subpaths: Vec<Vec<Pos2>>,
}

impl StrokePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subpath at `pos`
    pub fn move_to(&mut self, pos: Pos2) {
        match self.subpaths.last_mut() {
            Some(last) if last.len() == 1 => last[0] = pos,
            _ => self.subpaths.push(vec![pos]),
        }
    }

    /// Append a segment from the current end point to `pos`.
    ///
    /// Returns false (and leaves the path untouched) when there is no subpath
    /// to extend.
    pub fn line_to(&mut self, pos: Pos2) -> bool {
        match self.subpaths.last_mut() {
            Some(last) => {
                last.push(pos);
                true
            }
            None => false,
        }
    }

    /// Drop every subpath
    pub fn reset(&mut self) {
        self.subpaths.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// True if at least one subpath has a segment to draw
    pub fn has_segments(&self) -> bool {
        self.subpaths.iter().any(|s| s.len() >= 2)
    }

    pub fn subpaths(&self) -> impl Iterator<Item = &[Pos2]> {
        self.subpaths.iter().map(Vec::as_slice)
    }

    pub fn subpath_count(&self) -> usize {
        self.subpaths.len()
    }

    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    /// The last point of the open subpath
    pub fn current_point(&self) -> Option<Pos2> {
        self.subpaths.last().and_then(|s| s.last()).copied()
    }

    /// Build the tiny-skia path used for rasterisation.
    ///
    /// Single-point subpaths are skipped; `None` means nothing to draw.
    pub(crate) fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = tiny_skia::PathBuilder::new();
        for subpath in self.subpaths.iter().filter(|s| s.len() >= 2) {
            let (first, rest) = subpath.split_first()?;
            builder.move_to(first.x, first.y);
            for point in rest {
                builder.line_to(point.x, point.y);
            }
        }
        builder.finish()
    }
}
