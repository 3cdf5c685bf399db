//! Strokes → surface drawing calls.
//!
//! Pen strokes are smoothed with midpoint quadratics: segment `k` runs from
//! the midpoint before sample `k−1` to the midpoint after it, with sample
//! `k−1` as the control point. A dot marks the press and a straight tail
//! closes the stroke. The painter is incremental so a live stroke
//! can be drawn one sample at a time, and replaying a committed stroke
//! issues exactly the calls the live drawing issued.

use crate::surface::{LineStyle, RenderSurface};
use sk_core::geometry::bristle_path;
use sk_core::model::{BristleDab, Color, PathCmd, PenPoint, Stroke, StrokeBody};

/// The smoothed segment ending just after sample `k` was appended.
/// `None` for `k == 0` or out of range.
pub fn pen_segment(points: &[PenPoint], k: usize) -> Option<([PathCmd; 2], f32)> {
    if k == 0 || k >= points.len() {
        return None;
    }
    let control = points[k - 1];
    let start = if k == 1 {
        control.position()
    } else {
        points[k - 2].position().midpoint(control.position())
    };
    let end = control.position().midpoint(points[k].position());
    Some((
        [
            PathCmd::MoveTo(start.x, start.y),
            PathCmd::QuadTo(control.x, control.y, end.x, end.y),
        ],
        control.line_width,
    ))
}

/// The dot laid down when the pen touches the canvas.
pub fn pen_dot(point: &PenPoint) -> ([PathCmd; 2], f32) {
    (
        [
            PathCmd::MoveTo(point.x, point.y),
            PathCmd::LineTo(point.x, point.y),
        ],
        point.line_width,
    )
}

/// The closing piece of a pen stroke: a straight run from the last
/// midpoint to the final sample. `None` for fewer than two samples, where
/// the press dot already covers the stroke.
pub fn pen_tail(points: &[PenPoint]) -> Option<([PathCmd; 2], f32)> {
    let [.., prev, last] = points else {
        return None;
    };
    let start = prev.position().midpoint(last.position());
    Some((
        [
            PathCmd::MoveTo(start.x, start.y),
            PathCmd::LineTo(last.x, last.y),
        ],
        last.line_width,
    ))
}

pub fn paint_pen_dot(surface: &mut dyn RenderSurface, point: &PenPoint, color: Color) {
    let (path, width) = pen_dot(point);
    surface.stroke_path(&path, &LineStyle::solid(color, width));
}

pub fn paint_pen_segment(
    surface: &mut dyn RenderSurface,
    points: &[PenPoint],
    k: usize,
    color: Color,
) {
    if let Some((path, width)) = pen_segment(points, k) {
        surface.stroke_path(&path, &LineStyle::solid(color, width));
    }
}

pub fn paint_pen_tail(surface: &mut dyn RenderSurface, points: &[PenPoint], color: Color) {
    if let Some((path, width)) = pen_tail(points) {
        surface.stroke_path(&path, &LineStyle::solid(color, width));
    }
}

/// Paint every bristle of one dab.
pub fn paint_bristle_dab(surface: &mut dyn RenderSurface, dab: &BristleDab) {
    for bristle in &dab.bristles {
        let path = bristle_path(dab, bristle.distance);
        let style = LineStyle {
            color: bristle.color,
            width: bristle.thickness,
            shadow_blur: bristle.thickness / 2.0,
        };
        surface.stroke_path(&path, &style);
    }
}

/// Paint a committed stroke from scratch.
pub fn paint_stroke(surface: &mut dyn RenderSurface, stroke: &Stroke) {
    match &stroke.body {
        StrokeBody::Pen(points) => {
            if let Some(first) = points.first() {
                paint_pen_dot(surface, first, stroke.color);
            }
            for k in 1..points.len() {
                paint_pen_segment(surface, points, k, stroke.color);
            }
            paint_pen_tail(surface, points, stroke.color);
        }
        StrokeBody::Bristle(dabs) => {
            for dab in dabs {
                paint_bristle_dab(surface, dab);
            }
        }
    }
}

/// Clear the surface and replay every stroke in order.
pub fn repaint<'a>(surface: &mut dyn RenderSurface, strokes: impl IntoIterator<Item = &'a Stroke>) {
    surface.clear();
    let mut count = 0usize;
    for stroke in strokes {
        paint_stroke(surface, stroke);
        count += 1;
    }
    log::debug!("repainted {count} strokes");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceOp};
    use pretty_assertions::assert_eq;
    use sk_core::model::{Bristle, Bristles, Point};

    fn pt(x: f32, y: f32, w: f32) -> PenPoint {
        PenPoint {
            x,
            y,
            line_width: w,
        }
    }

    #[test]
    fn first_segment_starts_at_first_sample() {
        let points = [pt(0.0, 0.0, 2.0), pt(10.0, 0.0, 3.0)];
        let (path, width) = pen_segment(&points, 1).unwrap();
        assert_eq!(
            path,
            [PathCmd::MoveTo(0.0, 0.0), PathCmd::QuadTo(0.0, 0.0, 5.0, 0.0)]
        );
        assert_eq!(width, 2.0);
    }

    #[test]
    fn later_segments_run_midpoint_to_midpoint() {
        let points = [pt(0.0, 0.0, 1.0), pt(10.0, 0.0, 2.0), pt(10.0, 10.0, 3.0)];
        let (path, width) = pen_segment(&points, 2).unwrap();
        assert_eq!(
            path,
            [
                PathCmd::MoveTo(5.0, 0.0),
                PathCmd::QuadTo(10.0, 0.0, 10.0, 5.0)
            ]
        );
        assert_eq!(width, 2.0);
    }

    #[test]
    fn segment_out_of_range_is_none() {
        let points = [pt(0.0, 0.0, 1.0)];
        assert!(pen_segment(&points, 0).is_none());
        assert!(pen_segment(&points, 1).is_none());
    }

    #[test]
    fn dot_sits_on_the_sample() {
        let (path, width) = pen_dot(&pt(4.0, 4.0, 6.0));
        assert_eq!(path, [PathCmd::MoveTo(4.0, 4.0), PathCmd::LineTo(4.0, 4.0)]);
        assert_eq!(width, 6.0);
    }

    #[test]
    fn tail_needs_two_samples() {
        assert!(pen_tail(&[]).is_none());
        assert!(pen_tail(&[pt(4.0, 4.0, 6.0)]).is_none());
        let (path, width) = pen_tail(&[pt(0.0, 0.0, 1.0), pt(8.0, 0.0, 2.0)]).unwrap();
        assert_eq!(path, [PathCmd::MoveTo(4.0, 0.0), PathCmd::LineTo(8.0, 0.0)]);
        assert_eq!(width, 2.0);
    }

    #[test]
    fn pen_stroke_paints_dot_segments_then_tail() {
        let stroke = Stroke::new(
            Color::BLACK,
            StrokeBody::Pen(vec![pt(0.0, 0.0, 1.0), pt(4.0, 0.0, 1.0), pt(8.0, 0.0, 1.0)]),
        );
        let mut s = RecordingSurface::new();
        paint_stroke(&mut s, &stroke);
        assert_eq!(s.ops.len(), 4);
        match &s.ops[0] {
            SurfaceOp::Stroke { path, .. } => {
                assert_eq!(path, &vec![PathCmd::MoveTo(0.0, 0.0), PathCmd::LineTo(0.0, 0.0)]);
            }
            SurfaceOp::Clear => panic!("expected a stroke"),
        }
    }

    #[test]
    fn single_sample_pen_stroke_is_one_dot() {
        let stroke = Stroke::new(Color::BLACK, StrokeBody::Pen(vec![pt(4.0, 4.0, 6.0)]));
        let mut s = RecordingSurface::new();
        paint_stroke(&mut s, &stroke);
        assert_eq!(s.ops.len(), 1);
    }

    #[test]
    fn bristle_dab_paints_one_path_per_bristle() {
        let color = Color::from_hex("#AA3300").unwrap();
        let bristles: Bristles = (0..4)
            .map(|i| Bristle {
                distance: i as f32 * 3.0,
                thickness: 2.0,
                color,
            })
            .collect();
        let dab = BristleDab {
            origin: Point::new(0.0, 0.0),
            destination: Point::new(0.0, 10.0),
            from_angle: 0.0,
            to_angle: 0.0,
            width: 12.0,
            bristles,
        };
        let mut s = RecordingSurface::new();
        paint_bristle_dab(&mut s, &dab);
        assert_eq!(s.ops.len(), 4);
        match &s.ops[0] {
            SurfaceOp::Stroke { style, path } => {
                assert_eq!(style.shadow_blur, 1.0);
                assert_eq!(style.color, color);
                // offset = 0 − 6 along heading 0
                assert_eq!(path[0], PathCmd::MoveTo(-6.0, 0.0));
            }
            other => panic!("expected stroke, got {other:?}"),
        }
    }

    #[test]
    fn repaint_clears_first() {
        let stroke = Stroke::new(Color::BLACK, StrokeBody::Pen(vec![pt(1.0, 1.0, 1.0)]));
        let mut s = RecordingSurface::new();
        repaint(&mut s, [&stroke, &stroke]);
        assert_eq!(s.ops[0], SurfaceOp::Clear);
        assert_eq!(s.visible().len(), 2);
    }
}
