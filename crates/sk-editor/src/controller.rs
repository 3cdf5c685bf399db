//! The drawing-surface controller.
//!
//! `DrawingSurface` owns every piece of drawing state: the committed stroke
//! history, both brushes, the active brush and color, and the blank flag.
//! Hosts feed it [`InputEvent`]s and pass in whatever [`RenderSurface`]
//! should receive the drawing calls, which keeps the controller free of
//! any platform event wiring.

use crate::brushes::{BristleBrush, Brush, PenBrush};
use crate::history::StrokeHistory;
use crate::input::InputEvent;
use sk_core::config::SurfaceConfig;
use sk_core::model::{BrushKind, Color, Point, Stroke};
use sk_core::{Rng, StrokeId};
use sk_render::{RenderSurface, repaint};

pub struct DrawingSurface {
    config: SurfaceConfig,
    history: StrokeHistory,
    active: BrushKind,
    pen: PenBrush,
    bristle: BristleBrush,
    color: Color,
    blank: bool,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

impl DrawingSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self {
            history: StrokeHistory::new(),
            active: config.brush,
            pen: PenBrush::new(config.pen),
            bristle: BristleBrush::new(config.bristle, config.vary_brightness, rng),
            color: config.color,
            blank: true,
            config,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    fn brush_mut(&mut self) -> &mut dyn Brush {
        match self.active {
            BrushKind::Pen => &mut self.pen,
            BrushKind::Bristle => &mut self.bristle,
        }
    }

    fn brush(&self) -> &dyn Brush {
        match self.active {
            BrushKind::Pen => &self.pen,
            BrushKind::Bristle => &self.bristle,
        }
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Dispatch one input event. Returns whether the canvas or the
    /// drawing state changed.
    pub fn handle(&mut self, event: &InputEvent, surface: &mut dyn RenderSurface) -> bool {
        match *event {
            InputEvent::PointerDown { x, y, force } => {
                self.start_stroke(Point::new(x, y), force, surface)
            }
            InputEvent::PointerMove { x, y, force } => {
                self.continue_stroke(Point::new(x, y), force, surface)
            }
            InputEvent::PointerUp { .. } | InputEvent::Cancel => {
                let was_drawing = self.is_drawing();
                self.end_stroke(surface);
                was_drawing
            }
        }
    }

    /// Begin a stroke with the current brush and color. A press while a
    /// stroke is already in progress is ignored.
    pub fn start_stroke(
        &mut self,
        at: Point,
        force: Option<f32>,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        if self.is_drawing() {
            return false;
        }
        let color = self.color;
        if self.brush_mut().begin(at, force, color, surface) {
            self.blank = false;
        }
        log::trace!("start {} stroke at ({}, {})", self.active.name(), at.x, at.y);
        true
    }

    /// Extend the stroke in progress. Moves while idle are ignored.
    pub fn continue_stroke(
        &mut self,
        to: Point,
        force: Option<f32>,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        if !self.is_drawing() {
            return false;
        }
        let painted = self.brush_mut().extend(to, force, surface);
        if painted {
            self.blank = false;
        }
        painted
    }

    /// Finish the stroke in progress and commit it to history.
    pub fn end_stroke(&mut self, surface: &mut dyn RenderSurface) -> Option<StrokeId> {
        if !self.is_drawing() {
            return None;
        }
        let stroke = self.brush_mut().finish(surface)?;
        let id = stroke.id;
        log::debug!("commit {id} ({} samples)", stroke.len());
        self.history.push(stroke);
        self.blank = false;
        Some(id)
    }

    pub fn is_drawing(&self) -> bool {
        self.brush().is_active()
    }

    /// Drop the stroke in progress without committing it. Whatever it
    /// already painted stays on the surface until the next repaint.
    pub fn abandon_stroke(&mut self) -> bool {
        if !self.is_drawing() {
            return false;
        }
        self.brush_mut().cancel();
        log::debug!("abandoned {} stroke", self.active.name());
        true
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Remove the most recent stroke and repaint from the remaining
    /// history. No-op (returns `false`) on empty history or mid-stroke.
    pub fn undo(&mut self, surface: &mut dyn RenderSurface) -> bool {
        if self.is_drawing() {
            return false;
        }
        let Some(id) = self.history.undo() else {
            return false;
        };
        log::debug!("undo {id}");
        self.repaint(surface);
        true
    }

    /// Restore the most recently undone stroke.
    pub fn redo(&mut self, surface: &mut dyn RenderSurface) -> bool {
        if self.is_drawing() {
            return false;
        }
        let Some(id) = self.history.redo() else {
            return false;
        };
        log::debug!("redo {id}");
        self.repaint(surface);
        true
    }

    /// Discard all history, abandon any stroke in progress, and blank the
    /// canvas.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) {
        self.pen.cancel();
        self.bristle.cancel();
        self.history.clear();
        surface.clear();
        self.blank = true;
        log::debug!("cleared canvas");
    }

    /// Clear the surface and replay the committed history from scratch.
    pub fn repaint(&mut self, surface: &mut dyn RenderSurface) {
        repaint(surface, self.history.strokes());
        self.blank = self.history.is_empty();
    }

    pub fn can_undo(&self) -> bool {
        !self.is_drawing() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_drawing() && self.history.can_redo()
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.history.strokes()
    }

    /// Whether nothing has been drawn since creation or the last clear.
    pub fn is_blank(&self) -> bool {
        self.blank
    }

    // ─── Brush settings ──────────────────────────────────────────────────

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the color used by the next stroke.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Set the color from a hex string. Leaves the color unchanged and
    /// returns `false` if the string does not parse.
    pub fn set_color_hex(&mut self, hex: &str) -> bool {
        match Color::from_hex(hex) {
            Some(color) => {
                self.color = color;
                true
            }
            None => {
                log::warn!("ignoring invalid color `{hex}`");
                false
            }
        }
    }

    pub fn brush_kind(&self) -> BrushKind {
        self.active
    }

    /// Switch brushes. Refused while a stroke is in progress.
    pub fn set_brush(&mut self, kind: BrushKind) -> bool {
        if self.is_drawing() {
            return false;
        }
        self.active = kind;
        true
    }
}
