//! Scene construction
//!
//! Builds the card's three scenes and the rig of node handles the
//! sequencer animates.

mod scene_builder;

pub use scene_builder::SceneBuilder;
