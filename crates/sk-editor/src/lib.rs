pub mod brushes;
pub mod controller;
pub mod generate;
pub mod history;
pub mod input;
pub mod shortcuts;

pub use controller::DrawingSurface;
pub use input::InputEvent;
