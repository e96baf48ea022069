//! Keepsake - an animated greeting card
//!
//! A particle backdrop fills the window, and a click reveals a layered
//! birthday cake that hands off to a beating extruded heart with confetti.

pub mod config;
pub mod scene;
pub mod systems;
