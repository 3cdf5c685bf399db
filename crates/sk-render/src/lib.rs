pub mod bounds;
pub mod paint;
pub mod surface;

pub use bounds::{drawing_bounds, stroke_bounds};
pub use paint::{paint_stroke, repaint};
pub use surface::{LineStyle, RecordingSurface, RenderSurface, SurfaceOp};

// Re-export so downstream crates don't need a direct kurbo dependency.
pub use kurbo::Rect;
