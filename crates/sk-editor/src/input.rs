//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and stylus events into a unified `InputEvent`
//! consumed by the drawing surface. Coordinates are already in canvas
//! space; see `sk_core::viewport` for the translation from client space.

use sk_core::model::Point;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pencil contact), or a
    /// pointer entering the canvas with its button held.
    PointerDown {
        x: f32,
        y: f32,
        /// Device force from 0.0 to 1.0. `None` when the device reports
        /// none (mouse, or touch hardware without force sensing).
        force: Option<f32>,
    },

    /// Pointer moved (mouse move, touch move, pencil move).
    PointerMove { x: f32, y: f32, force: Option<f32> },

    /// Pointer released.
    PointerUp { x: f32, y: f32 },

    /// Gesture aborted by the platform (touch cancel, pointer leaving the
    /// canvas). Ends the stroke like a release.
    Cancel,
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32, force: Option<f32>) -> Self {
        Self::PointerDown { x, y, force }
    }

    pub fn from_pointer_move(x: f32, y: f32, force: Option<f32>) -> Self {
        Self::PointerMove { x, y, force }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y } => Some(Point::new(x, y)),
            Self::Cancel => None,
        }
    }

    /// Device force, if this event carries one.
    pub fn force(&self) -> Option<f32> {
        match *self {
            Self::PointerDown { force, .. } | Self::PointerMove { force, .. } => force,
            _ => None,
        }
    }
}

/// Mouse `buttons` bitmask bit for the primary button.
const PRIMARY_BUTTON: u16 = 0b01;

/// Whether the primary button is held in a mouse `buttons` bitmask.
pub fn primary_button_down(buttons: u16) -> bool {
    buttons & PRIMARY_BUTTON == PRIMARY_BUTTON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_of_pointer_events() {
        assert_eq!(
            InputEvent::from_pointer_down(1.0, 2.0, None).position(),
            Some(Point::new(1.0, 2.0))
        );
        assert_eq!(
            InputEvent::from_pointer_up(3.0, 4.0).position(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(InputEvent::Cancel.position(), None);
    }

    #[test]
    fn force_only_on_down_and_move() {
        assert_eq!(
            InputEvent::from_pointer_move(0.0, 0.0, Some(0.4)).force(),
            Some(0.4)
        );
        assert_eq!(InputEvent::from_pointer_up(0.0, 0.0).force(), None);
    }

    #[test]
    fn primary_button_mask() {
        assert!(primary_button_down(1));
        assert!(primary_button_down(3));
        assert!(!primary_button_down(2));
        assert!(!primary_button_down(0));
    }
}
