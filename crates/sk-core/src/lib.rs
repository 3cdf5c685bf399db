pub mod brush;
pub mod config;
pub mod geometry;
pub mod id;
pub mod model;
pub mod pressure;
pub mod viewport;

pub use config::{ConfigError, SurfaceConfig};
pub use id::StrokeId;
pub use model::*;
pub use pressure::{PressureMapping, ResponseCurve, WidthSmoother};
pub use viewport::{CanvasViewport, ClientRect};

// Re-export so downstream crates can build seeded generators without a
// direct dependency.
pub use fastrand::Rng;
