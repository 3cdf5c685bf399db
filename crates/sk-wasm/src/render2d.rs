//! Canvas2D render surface.
//!
//! Draws straight to an HTML `<canvas>` via `CanvasRenderingContext2d`.
//! The canvas is never read back: undo and redo clear it and replay the
//! stroke history.

use sk_core::model::PathCmd;
use sk_render::{LineStyle, RenderSurface};
use web_sys::CanvasRenderingContext2d;

pub struct Canvas2dSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl<'a> Canvas2dSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }
}

impl RenderSurface for Canvas2dSurface<'_> {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn stroke_path(&mut self, path: &[PathCmd], style: &LineStyle) {
        if path.is_empty() {
            return;
        }
        let ctx = self.ctx;
        let color = style.color.to_css();

        ctx.save();
        ctx.set_stroke_style_str(&color);
        ctx.set_line_width(style.width as f64);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        if style.shadow_blur > 0.0 {
            ctx.set_shadow_color(&color);
            ctx.set_shadow_blur(style.shadow_blur as f64);
        }

        ctx.begin_path();
        for cmd in path {
            match *cmd {
                PathCmd::MoveTo(x, y) => ctx.move_to(x as f64, y as f64),
                PathCmd::LineTo(x, y) => ctx.line_to(x as f64, y as f64),
                PathCmd::QuadTo(cx, cy, ex, ey) => {
                    ctx.quadratic_curve_to(cx as f64, cy as f64, ex as f64, ey as f64)
                }
            }
        }
        ctx.stroke();
        ctx.restore();
    }
}
