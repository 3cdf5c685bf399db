//! Render-target abstraction.
//!
//! Painters only ever clear the target and stroke simple paths, so any
//! backend (browser Canvas2D, SVG text, a test recorder) can implement
//! [`RenderSurface`] in a few lines.

use sk_core::model::{Color, PathCmd};

/// How a path is stroked. Caps and joins are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    /// Blur radius of a same-colored shadow. `0.0` = no shadow.
    pub shadow_blur: f32,
}

impl LineStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            shadow_blur: 0.0,
        }
    }
}

/// A stateless render target.
pub trait RenderSurface {
    /// Erase everything.
    fn clear(&mut self);

    /// Stroke one open path.
    fn stroke_path(&mut self, path: &[PathCmd], style: &LineStyle);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear,
    Stroke { path: Vec<PathCmd>, style: LineStyle },
}

/// A surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations issued since the most recent clear. This is what is
    /// currently visible.
    pub fn visible(&self) -> &[SurfaceOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::Clear))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }

    /// Number of clears issued.
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Clear))
            .count()
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn stroke_path(&mut self, path: &[PathCmd], style: &LineStyle) {
        self.ops.push(SurfaceOp::Stroke {
            path: path.to_vec(),
            style: *style,
        });
    }
}
