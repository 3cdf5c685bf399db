//! Brush system for freehand strokes.
//!
//! Each brush turns a press → moves → release sequence into surface
//! drawing calls as the samples arrive, and hands back the finished
//! [`Stroke`] on release so it can be committed to history.
//!
//! | Brush | Width from | Rendering |
//! |-------|------------|-----------|
//! | **Pen** | `ln(1 + p)`, EMA-smoothed | midpoint-quadratic polyline |
//! | **Bristle** | `p × multiplier` | offset bristles, re-synthesized per sample |

use sk_core::brush::synthesize;
use sk_core::geometry::{next_heading, wrap_heading};
use sk_core::model::{BristleDab, BrushKind, Color, PenPoint, Point, Stroke, StrokeBody};
use sk_core::pressure::{PressureMapping, WidthSmoother};
use sk_core::Rng;
use sk_render::RenderSurface;
use sk_render::paint::{paint_bristle_dab, paint_pen_dot, paint_pen_segment, paint_pen_tail};

/// Trait for brushes that turn input samples into painted strokes.
pub trait Brush {
    fn kind(&self) -> BrushKind;

    /// Whether a stroke is in progress.
    fn is_active(&self) -> bool;

    /// Start a stroke, painting whatever marks the press. Returns whether
    /// anything was painted.
    fn begin(
        &mut self,
        at: Point,
        force: Option<f32>,
        color: Color,
        surface: &mut dyn RenderSurface,
    ) -> bool;

    /// Extend the active stroke to `to`, painting the new piece.
    /// Returns whether anything was painted.
    fn extend(&mut self, to: Point, force: Option<f32>, surface: &mut dyn RenderSurface) -> bool;

    /// Finish the active stroke, painting any closing piece. Returns the
    /// stroke to commit, or `None` when nothing was drawn.
    fn finish(&mut self, surface: &mut dyn RenderSurface) -> Option<Stroke>;

    /// Abandon the active stroke without committing it.
    fn cancel(&mut self);
}

// ─── Pen ─────────────────────────────────────────────────────────────────

pub struct PenBrush {
    mapping: PressureMapping,
    smoother: WidthSmoother,
    color: Color,
    points: Vec<PenPoint>,
    active: bool,
}

impl PenBrush {
    pub fn new(mapping: PressureMapping) -> Self {
        Self {
            mapping,
            smoother: mapping.smoother(),
            color: Color::BLACK,
            points: Vec::new(),
            active: false,
        }
    }

    /// Samples of the stroke in progress.
    pub fn points(&self) -> &[PenPoint] {
        &self.points
    }

    fn sample(&mut self, at: Point, force: Option<f32>) {
        let line_width = self.smoother.push(self.mapping.resolve(force));
        self.points.push(PenPoint {
            x: at.x,
            y: at.y,
            line_width,
        });
    }
}

impl Default for PenBrush {
    fn default() -> Self {
        Self::new(PressureMapping::PEN)
    }
}

impl Brush for PenBrush {
    fn kind(&self) -> BrushKind {
        BrushKind::Pen
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn begin(
        &mut self,
        at: Point,
        force: Option<f32>,
        color: Color,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        self.active = true;
        self.color = color;
        self.points.clear();
        self.smoother.reset();
        self.sample(at, force);
        match self.points.last() {
            Some(first) => {
                paint_pen_dot(surface, first, color);
                true
            }
            None => false,
        }
    }

    fn extend(&mut self, to: Point, force: Option<f32>, surface: &mut dyn RenderSurface) -> bool {
        if !self.active {
            return false;
        }
        self.sample(to, force);
        paint_pen_segment(surface, &self.points, self.points.len() - 1, self.color);
        true
    }

    fn finish(&mut self, surface: &mut dyn RenderSurface) -> Option<Stroke> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.smoother.reset();
        if self.points.is_empty() {
            return None;
        }
        paint_pen_tail(surface, &self.points, self.color);
        let points = std::mem::take(&mut self.points);
        Some(Stroke::new(self.color, StrokeBody::Pen(points)))
    }

    fn cancel(&mut self) {
        self.active = false;
        self.points.clear();
        self.smoother.reset();
    }
}

// ─── Bristle ─────────────────────────────────────────────────────────────

pub struct BristleBrush {
    mapping: PressureMapping,
    smoother: WidthSmoother,
    vary_brightness: f32,
    rng: Rng,
    color: Color,
    latest: Option<Point>,
    heading: Option<f32>,
    dabs: Vec<BristleDab>,
}

impl BristleBrush {
    pub fn new(mapping: PressureMapping, vary_brightness: f32, rng: Rng) -> Self {
        Self {
            mapping,
            smoother: mapping.smoother(),
            vary_brightness,
            rng,
            color: Color::BLACK,
            latest: None,
            heading: None,
            dabs: Vec::new(),
        }
    }

    /// Current heading, `None` before the first segment of a stroke.
    pub fn heading(&self) -> Option<f32> {
        self.heading
    }

    /// Dabs of the stroke in progress.
    pub fn dabs(&self) -> &[BristleDab] {
        &self.dabs
    }
}

impl Brush for BristleBrush {
    fn kind(&self) -> BrushKind {
        BrushKind::Bristle
    }

    fn is_active(&self) -> bool {
        self.latest.is_some()
    }

    fn begin(
        &mut self,
        at: Point,
        force: Option<f32>,
        color: Color,
        _surface: &mut dyn RenderSurface,
    ) -> bool {
        self.color = color;
        self.latest = Some(at);
        self.heading = None;
        self.dabs.clear();
        self.smoother.reset();
        self.smoother.push(self.mapping.resolve(force));
        false
    }

    fn extend(&mut self, to: Point, force: Option<f32>, surface: &mut dyn RenderSurface) -> bool {
        let Some(origin) = self.latest else {
            return false;
        };
        let new_heading = next_heading(origin, to, self.heading);
        let width = self.smoother.push(self.mapping.resolve(force));
        let bristles = synthesize(width, self.color, self.vary_brightness, &mut self.rng);
        let dab = BristleDab {
            origin,
            destination: to,
            // The first segment has no previous heading; use the new one
            // on both ends.
            from_angle: self.heading.unwrap_or(new_heading),
            to_angle: new_heading,
            width,
            bristles,
        };
        paint_bristle_dab(surface, &dab);
        let painted = !dab.bristles.is_empty();
        self.dabs.push(dab);
        self.heading = Some(wrap_heading(new_heading));
        self.latest = Some(to);
        painted
    }

    fn finish(&mut self, _surface: &mut dyn RenderSurface) -> Option<Stroke> {
        self.latest.take()?;
        self.heading = None;
        self.smoother.reset();
        if self.dabs.is_empty() {
            return None;
        }
        let dabs = std::mem::take(&mut self.dabs);
        Some(Stroke::new(self.color, StrokeBody::Bristle(dabs)))
    }

    fn cancel(&mut self) {
        self.latest = None;
        self.heading = None;
        self.dabs.clear();
        self.smoother.reset();
    }
}
