//! Drawing bounds: stroke → covered canvas rectangle.
//!
//! Paths are lifted into `kurbo` beziers so curve extrema are accounted
//! for exactly, then inflated by half the line width (plus shadow blur).
//! Used to crop exports to the drawn region.

use crate::surface::{LineStyle, RenderSurface};
use kurbo::{BezPath, Rect, Shape};
use sk_core::model::{PathCmd, Stroke};

/// Convert path commands into a `kurbo` path.
pub fn to_bez_path(cmds: &[PathCmd]) -> BezPath {
    let mut path = BezPath::new();
    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(x, y) => path.move_to((x as f64, y as f64)),
            PathCmd::LineTo(x, y) => path.line_to((x as f64, y as f64)),
            PathCmd::QuadTo(cx, cy, ex, ey) => {
                path.quad_to((cx as f64, cy as f64), (ex as f64, ey as f64))
            }
        }
    }
    path
}

/// A surface that accumulates the area painted onto it.
#[derive(Debug, Clone, Default)]
pub struct BoundsSurface {
    bounds: Option<Rect>,
}

impl BoundsSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

impl RenderSurface for BoundsSurface {
    fn clear(&mut self) {
        self.bounds = None;
    }

    fn stroke_path(&mut self, path: &[PathCmd], style: &LineStyle) {
        if path.is_empty() {
            return;
        }
        let pad = (style.width / 2.0 + style.shadow_blur) as f64;
        let rect = to_bez_path(path).bounding_box().inflate(pad, pad);
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(rect),
            None => rect,
        });
    }
}

/// Area covered by one stroke, or `None` if it paints nothing.
pub fn stroke_bounds(stroke: &Stroke) -> Option<Rect> {
    let mut surface = BoundsSurface::new();
    crate::paint::paint_stroke(&mut surface, stroke);
    surface.bounds()
}

/// Area covered by all strokes, or `None` for an empty drawing.
pub fn drawing_bounds<'a>(strokes: impl IntoIterator<Item = &'a Stroke>) -> Option<Rect> {
    strokes
        .into_iter()
        .filter_map(stroke_bounds)
        .reduce(|a, b| a.union(b))
}
