//! Per-frame procedural motion
//!
//! The card's idle motion is a closed-form function of elapsed time: the
//! particle field and cake spin at fixed rates, the heart spins faster and
//! bobs on a sine. Absolute functions of t, not increments, so a dropped
//! frame never accumulates drift.

use keepsake_scene::{CardRig, SceneStage};

/// Backdrop particle rotation rate (radians per second)
const PARTICLE_SPIN: f32 = 0.05;
/// Cake group rotation rate
const CAKE_SPIN: f32 = 0.5;
/// Heart rotation rate
const HEART_SPIN: f32 = 1.5;
/// Heart bob frequency multiplier
const HEART_BOB_RATE: f32 = 2.0;
/// Heart bob amplitude in world units
const HEART_BOB_AMPLITUDE: f32 = 0.2;

/// Applies the card's procedural transforms each frame
pub struct MotionSystem {
    rig: CardRig,
}

impl MotionSystem {
    pub fn new(rig: CardRig) -> Self {
        Self { rig }
    }

    /// Set every animated transform for elapsed time `t`
    pub fn apply(&self, t: f32, stage: &mut SceneStage) {
        if let Some(particles) = stage.backdrop.node_mut(self.rig.particles) {
            particles.transform.rotation.y = t * PARTICLE_SPIN;
        }
        if let Some(group) = stage.cake.node_mut(self.rig.cake.group) {
            group.transform.rotation.y = t * CAKE_SPIN;
        }
        if let Some(heart) = stage.heart.node_mut(self.rig.heart) {
            heart.transform.rotation.y = t * HEART_SPIN;
            heart.transform.position.y = (t * HEART_BOB_RATE).sin() * HEART_BOB_AMPLITUDE;
        }
    }
}
