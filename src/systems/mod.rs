//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod motion;
mod render;
mod viewport;
mod window;

pub use motion::MotionSystem;
pub use render::{RenderError, RenderSystem};
pub use viewport::ViewportAdapter;
pub use window::{WindowError, WindowSystem};
