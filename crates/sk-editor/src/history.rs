//! Stroke history with undo/redo.
//!
//! Committed strokes are kept in drawing order. Undo moves the most recent
//! stroke onto the redo stack; committing a new stroke discards anything
//! that was undone. The canvas is rebuilt from `strokes()` after every
//! undo or redo, so the history is the single source of truth for what is
//! on screen.

use sk_core::StrokeId;
use sk_core::model::Stroke;

#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    undo_stack: Vec<Stroke>,
    redo_stack: Vec<Stroke>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a finished stroke. Clears the redo stack.
    pub fn push(&mut self, stroke: Stroke) {
        self.undo_stack.push(stroke);
        self.redo_stack.clear();
    }

    /// Remove the most recent stroke. Returns its ID, or `None` when the
    /// history is empty.
    pub fn undo(&mut self) -> Option<StrokeId> {
        let stroke = self.undo_stack.pop()?;
        let id = stroke.id;
        self.redo_stack.push(stroke);
        Some(id)
    }

    /// Restore the most recently undone stroke.
    pub fn redo(&mut self) -> Option<StrokeId> {
        let stroke = self.redo_stack.pop()?;
        let id = stroke.id;
        self.undo_stack.push(stroke);
        Some(id)
    }

    /// Drop everything, including undone strokes.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Committed strokes in drawing order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.undo_stack
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.undo_stack.last()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_core::model::{Color, PenPoint, StrokeBody};

    fn stroke() -> Stroke {
        Stroke::new(
            Color::BLACK,
            StrokeBody::Pen(vec![PenPoint {
                x: 0.0,
                y: 0.0,
                line_width: 1.0,
            }]),
        )
    }

    #[test]
    fn undo_on_empty_is_noop() {
        let mut h = StrokeHistory::new();
        assert_eq!(h.undo(), None);
        assert!(h.is_empty());
        assert!(!h.can_redo());
    }

    #[test]
    fn undo_removes_exactly_the_last_stroke() {
        let mut h = StrokeHistory::new();
        let a = stroke();
        let b = stroke();
        let (ida, idb) = (a.id, b.id);
        h.push(a);
        h.push(b);
        assert_eq!(h.undo(), Some(idb));
        assert_eq!(h.len(), 1);
        assert_eq!(h.last().map(|s| s.id), Some(ida));
    }

    #[test]
    fn redo_restores_in_reverse_undo_order() {
        let mut h = StrokeHistory::new();
        let a = stroke();
        let b = stroke();
        let (ida, idb) = (a.id, b.id);
        h.push(a);
        h.push(b);
        h.undo();
        h.undo();
        assert_eq!(h.redo(), Some(ida));
        assert_eq!(h.redo(), Some(idb));
        assert_eq!(h.redo(), None);
    }

    #[test]
    fn push_discards_redo() {
        let mut h = StrokeHistory::new();
        h.push(stroke());
        h.undo();
        assert!(h.can_redo());
        h.push(stroke());
        assert!(!h.can_redo());
    }

    #[test]
    fn clear_drops_both_stacks() {
        let mut h = StrokeHistory::new();
        h.push(stroke());
        h.push(stroke());
        h.undo();
        h.clear();
        assert!(h.is_empty());
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }
}
