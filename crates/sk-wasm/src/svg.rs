use sk_core::model::{PathCmd, Stroke};
use sk_render::{LineStyle, Rect, RenderSurface, drawing_bounds, repaint};
use std::fmt::Write;

/// Margin kept around the drawing when an export is cropped.
const CROP_MARGIN: f64 = 8.0;

/// Collects strokes as SVG `<path>` elements.
#[derive(Debug, Default)]
pub struct SvgSurface {
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

fn path_data(path: &[PathCmd]) -> String {
    let mut d = String::new();
    for cmd in path {
        if !d.is_empty() {
            d.push(' ');
        }
        let _ = match *cmd {
            PathCmd::MoveTo(x, y) => write!(d, "M{x:.2} {y:.2}"),
            PathCmd::LineTo(x, y) => write!(d, "L{x:.2} {y:.2}"),
            PathCmd::QuadTo(cx, cy, ex, ey) => write!(d, "Q{cx:.2} {cy:.2} {ex:.2} {ey:.2}"),
        };
    }
    d
}

impl RenderSurface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
    }

    fn stroke_path(&mut self, path: &[PathCmd], style: &LineStyle) {
        if path.is_empty() {
            return;
        }
        let color = style.color.to_css();
        let _ = write!(
            self.body,
            r#"  <path d="{}" fill="none" stroke="{color}" stroke-width="{:.2}" stroke-linecap="round" stroke-linejoin="round""#,
            path_data(path),
            style.width,
        );
        if style.shadow_blur > 0.0 {
            let _ = write!(
                self.body,
                r#" style="filter:drop-shadow(0 0 {:.2}px {color})""#,
                style.shadow_blur
            );
        }
        self.body.push_str("/>\n");
    }
}

/// Render the stroke history as a standalone SVG document.
///
/// With `crop`, the view box is fitted to the drawn area plus a margin;
/// otherwise it spans the whole canvas. A blank drawing always spans the
/// whole canvas.
pub fn render_svg(strokes: &[Stroke], canvas_width: f64, canvas_height: f64, crop: bool) -> String {
    let full = Rect::new(0.0, 0.0, canvas_width, canvas_height);
    let view = if crop {
        drawing_bounds(strokes)
            .map(|b| b.inflate(CROP_MARGIN, CROP_MARGIN))
            .unwrap_or(full)
    } else {
        full
    };

    let mut surface = SvgSurface::new();
    repaint(&mut surface, strokes);

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\" width=\"{:.0}\" height=\"{:.0}\">\n{}</svg>\n",
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height(),
        surface.into_body()
    )
}
