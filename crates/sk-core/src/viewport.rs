//! Screen → canvas coordinate translation.
//!
//! The canvas backing store is rendered at a multiple of its displayed
//! size for sharper lines, so client (CSS pixel) coordinates must be offset
//! by the element's bounding rectangle and scaled into backing-store pixels.

use crate::model::Point;
use serde::{Deserialize, Serialize};

/// The canvas element's on-page bounding rectangle, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Maps client coordinates into canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasViewport {
    pub rect: ClientRect,
    /// Backing-store size in canvas pixels.
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl CanvasViewport {
    /// A viewport for a canvas displayed at `width × height` CSS pixels
    /// at the page origin, with a backing store `scale` times larger.
    pub fn for_display(width: f32, height: f32, scale: f32) -> Self {
        Self {
            rect: ClientRect {
                left: 0.0,
                top: 0.0,
                width,
                height,
            },
            canvas_width: width * scale,
            canvas_height: height * scale,
        }
    }

    /// Update the on-page rectangle (after layout, scroll, or resize).
    pub fn set_rect(&mut self, rect: ClientRect) {
        self.rect = rect;
    }

    /// Horizontal and vertical CSS → canvas scale factors. A degenerate
    /// rectangle maps through unscaled.
    pub fn scale(&self) -> (f32, f32) {
        let sx = if self.rect.width > 0.0 {
            self.canvas_width / self.rect.width
        } else {
            1.0
        };
        let sy = if self.rect.height > 0.0 {
            self.canvas_height / self.rect.height
        } else {
            1.0
        };
        (sx, sy)
    }

    /// Translate a client-space position into canvas pixels.
    pub fn to_canvas(&self, client_x: f32, client_y: f32) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            (client_x - self.rect.left) * sx,
            (client_y - self.rect.top) * sy,
        )
    }

    /// Whether a canvas-space point lies on the backing store.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.canvas_width && p.y <= self.canvas_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_coordinates_at_scale_two() {
        let vp = CanvasViewport::for_display(400.0, 300.0, 2.0);
        assert_eq!(vp.canvas_width, 800.0);
        assert_eq!(vp.to_canvas(100.0, 50.0), Point::new(200.0, 100.0));
    }

    #[test]
    fn offsets_by_bounding_rect() {
        let mut vp = CanvasViewport::for_display(400.0, 300.0, 2.0);
        vp.set_rect(ClientRect {
            left: 20.0,
            top: 10.0,
            width: 400.0,
            height: 300.0,
        });
        assert_eq!(vp.to_canvas(20.0, 10.0), Point::new(0.0, 0.0));
        assert_eq!(vp.to_canvas(420.0, 310.0), Point::new(800.0, 600.0));
    }

    #[test]
    fn css_resized_element_rescales() {
        // Element squeezed to half its layout width by CSS.
        let mut vp = CanvasViewport::for_display(400.0, 300.0, 2.0);
        vp.set_rect(ClientRect {
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 300.0,
        });
        assert_eq!(vp.to_canvas(100.0, 150.0), Point::new(400.0, 300.0));
    }

    #[test]
    fn degenerate_rect_maps_unscaled() {
        let mut vp = CanvasViewport::for_display(400.0, 300.0, 2.0);
        vp.set_rect(ClientRect::default());
        assert_eq!(vp.to_canvas(7.0, 9.0), Point::new(7.0, 9.0));
    }

    #[test]
    fn contains_checks_backing_store() {
        let vp = CanvasViewport::for_display(10.0, 10.0, 2.0);
        assert!(vp.contains(Point::new(20.0, 0.0)));
        assert!(!vp.contains(Point::new(-1.0, 5.0)));
        assert!(!vp.contains(Point::new(5.0, 21.0)));
    }
}
