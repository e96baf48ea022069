//! The card's three scenes plus overlay state
//!
//! Grouping them lets the animation registry and sequencer take one mutable
//! borrow instead of four.

use crate::overlay::OverlayState;
use crate::scene::Scene;

/// Identifies one of the three concurrently-live scenes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneId {
    /// Full-window particle field
    Backdrop,
    /// The cake panel scene
    Cake,
    /// The heart panel scene
    Heart,
}

/// The three scenes and the overlay visibility state driving their drawing
pub struct SceneStage {
    pub backdrop: Scene,
    pub cake: Scene,
    pub heart: Scene,
    pub overlay: OverlayState,
}

impl SceneStage {
    /// Assemble a stage from three freshly built scenes; the overlay starts
    /// closed
    pub fn new(backdrop: Scene, cake: Scene, heart: Scene) -> Self {
        Self {
            backdrop,
            cake,
            heart,
            overlay: OverlayState::new(),
        }
    }

    /// The scene for an id
    pub fn scene(&self, id: SceneId) -> &Scene {
        match id {
            SceneId::Backdrop => &self.backdrop,
            SceneId::Cake => &self.cake,
            SceneId::Heart => &self.heart,
        }
    }

    /// Mutable scene for an id
    pub fn scene_mut(&mut self, id: SceneId) -> &mut Scene {
        match id {
            SceneId::Backdrop => &mut self.backdrop,
            SceneId::Cake => &mut self.cake,
            SceneId::Heart => &mut self.heart,
        }
    }
}
