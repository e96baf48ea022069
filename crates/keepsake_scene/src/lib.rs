//! Scene types for the Keepsake card renderer
//!
//! This crate provides everything headless about the card: the scene graph,
//! cameras, the shared clock, overlay visibility state, the animation
//! registry, and the reveal sequencer. Nothing here touches the GPU, so all
//! of the card's sequencing behavior is unit-testable.
//!
//! - [`Transform`] - Position, rotation, and scale of a node
//! - [`Node`] / [`Scene`] - Slotmap-backed scene graph with one camera per scene
//! - [`SceneStage`] - The three scenes (backdrop, cake, heart) plus overlay state
//! - [`Clock`] - Process-wide elapsed time, never reset
//! - [`Tween`] / [`AnimationRegistry`] - Time-bounded eased interpolations with expiry
//! - [`RevealSequencer`] - The scripted cake-to-heart narrative state machine

mod transform;
mod node;
mod light;
mod camera;
mod scene;
mod clock;
mod overlay;
mod stage;
mod animation;
mod rig;
mod sequencer;

pub use transform::Transform;
pub use node::{Material, MeshShape, PointCloud, Node, NodeKind};
pub use light::{AmbientLight, PointLight};
pub use camera::PerspectiveCamera;
pub use scene::{Scene, NodeKey};
pub use clock::Clock;
pub use overlay::{DrawSet, OverlayState, Phase};
pub use stage::{SceneId, SceneStage};
pub use animation::{AnimationRegistry, Tween, TweenKey, TweenTarget};
pub use rig::{CakeRig, CardRig};
pub use sequencer::{RevealSequencer, SequencerState, ViewportRefresh};

// Re-export the math types scenes are built from
pub use keepsake_math::{Easing, Mat4, Vec3};
