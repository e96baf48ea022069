//! Reveal sequencer
//!
//! The scripted cake-to-heart narrative, expressed as a state machine that
//! is polled each frame with the shared clock. All timing constants live
//! here so the whole script reads in one place.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use keepsake_math::{Easing, Vec3};

use crate::animation::{AnimationRegistry, Tween, TweenTarget};
use crate::node::{Node, PointCloud};
use crate::overlay::Phase;
use crate::rig::CardRig;
use crate::scene::NodeKey;
use crate::stage::{SceneId, SceneStage};

/// Height the cake parts drop in from
pub const DROP_START_Y: f32 = 10.0;
/// Duration of each part's bounce-in
pub const DROP_DURATION: f32 = 0.8;
/// Stagger delays for tier0, tier1, tier2, candle, flame
pub const DROP_DELAYS: [f32; 5] = [0.0, 0.1, 0.2, 0.3, 0.3];
/// How long the cake phase holds before the transition begins
pub const CAKE_HOLD: f32 = 4.0;
/// Duration of the cake opacity fade
pub const FADE_DURATION: f32 = 0.5;
/// Duration of the heart's elastic spring-in
pub const HEART_SPRING_DURATION: f32 = 1.0;
/// Final uniform scale of the heart
pub const HEART_SCALE: f32 = 0.8;
/// Number of confetti points
pub const CONFETTI_COUNT: usize = 100;
/// Confetti scatter half-extent per axis
pub const CONFETTI_HALF_EXTENT: f32 = 5.0;
/// Duration of each confetti point's outward flight
pub const CONFETTI_DURATION: f32 = 2.0;
/// Seconds after spawn at which the confetti cloud is reclaimed
pub const CONFETTI_LIFETIME: f32 = 3.0;

/// Recomputes camera aspects and viewport rects from the current layout
///
/// The panel layout box is zero-sized while the overlay is closed, so the
/// sequencer invokes this at trigger time, inside the brief window where
/// both phases are visible, to give both panel cameras a valid aspect.
pub trait ViewportRefresh {
    fn refresh(&mut self, stage: &mut SceneStage);
}

/// Where the reveal script currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// Nothing revealed; a trigger starts the script
    Idle,
    /// Cake parts dropping in, then holding
    RevealingCake,
    /// Cake fading out
    Transitioning,
    /// Heart shown; stays here until the overlay is closed
    RevealingHeart,
}

/// A spawned confetti cloud awaiting reclamation
#[derive(Clone, Copy, Debug)]
struct ConfettiBatch {
    node: NodeKey,
    spawned_at: f32,
}

/// Drives the one-shot reveal script against the stage and registry
pub struct RevealSequencer {
    rig: CardRig,
    state: SequencerState,
    /// Clock time of the accepted trigger
    t0: f32,
    confetti: Option<ConfettiBatch>,
    rng: StdRng,
}

impl RevealSequencer {
    /// Sequencer with entropy-seeded confetti scatter
    pub fn new(rig: CardRig) -> Self {
        Self::with_rng(rig, StdRng::from_entropy())
    }

    /// Sequencer with a fixed seed, for deterministic tests
    pub fn with_seed(rig: CardRig, seed: u64) -> Self {
        Self::with_rng(rig, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rig: CardRig, rng: StdRng) -> Self {
        Self {
            rig,
            state: SequencerState::Idle,
            t0: 0.0,
            confetti: None,
            rng,
        }
    }

    /// Current state of the script
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Begin the reveal at clock time `now`; returns whether it was accepted
    ///
    /// Ignored unless Idle, so mashing the trigger mid-sequence does not
    /// restart or double-schedule anything. Both phases are made visible
    /// before the viewport refresh so both panel cameras measure a real
    /// layout box, then the heart is hidden again.
    pub fn trigger(
        &mut self,
        now: f32,
        stage: &mut SceneStage,
        registry: &mut AnimationRegistry,
        viewports: &mut dyn ViewportRefresh,
    ) -> bool {
        if self.state != SequencerState::Idle {
            debug!("reveal trigger ignored in state {:?}", self.state);
            return false;
        }
        // A cloud from the previous run may still be in flight
        self.reclaim_confetti(stage, registry);

        stage.overlay.open = true;
        stage.overlay.set_phase_visible(Phase::Cake, true);
        stage.overlay.set_phase_visible(Phase::Heart, true);
        viewports.refresh(stage);
        stage.overlay.set_phase_visible(Phase::Heart, false);
        *stage.overlay.opacity_mut(Phase::Cake) = 1.0;

        for (i, (node, rest_y)) in self.rig.cake.drop_parts().into_iter().enumerate() {
            registry.insert(Tween::scalar(
                TweenTarget::NodePositionY {
                    scene: SceneId::Cake,
                    node,
                },
                DROP_START_Y,
                rest_y,
                now + DROP_DELAYS[i],
                DROP_DURATION,
                Easing::BounceOut,
            ));
        }

        self.t0 = now;
        self.state = SequencerState::RevealingCake;
        true
    }

    /// Poll the script at clock time `now`
    pub fn update(
        &mut self,
        now: f32,
        stage: &mut SceneStage,
        registry: &mut AnimationRegistry,
    ) {
        // Reclamation runs regardless of state so a close mid-flight still
        // removes the cloud on schedule
        if let Some(batch) = self.confetti {
            if now >= batch.spawned_at + CONFETTI_LIFETIME {
                self.reclaim_confetti(stage, registry);
            }
        }

        match self.state {
            SequencerState::Idle | SequencerState::RevealingHeart => {}
            SequencerState::RevealingCake => {
                if now >= self.t0 + CAKE_HOLD {
                    registry.insert(Tween::scalar(
                        TweenTarget::PhaseOpacity(Phase::Cake),
                        1.0,
                        0.0,
                        self.t0 + CAKE_HOLD,
                        FADE_DURATION,
                        Easing::Linear,
                    ));
                    self.state = SequencerState::Transitioning;
                }
            }
            SequencerState::Transitioning => {
                if now >= self.t0 + CAKE_HOLD + FADE_DURATION {
                    stage.overlay.set_phase_visible(Phase::Cake, false);
                    *stage.overlay.opacity_mut(Phase::Cake) = 1.0;
                    stage.overlay.set_phase_visible(Phase::Heart, true);
                    registry.insert(Tween::scalar(
                        TweenTarget::NodeUniformScale {
                            scene: SceneId::Heart,
                            node: self.rig.heart,
                        },
                        0.0,
                        HEART_SCALE,
                        now,
                        HEART_SPRING_DURATION,
                        Easing::ElasticOut,
                    ));
                    self.spawn_confetti(now, stage, registry);
                    self.state = SequencerState::RevealingHeart;
                }
            }
        }
    }

    /// Close the overlay and return to Idle
    ///
    /// In-flight tweens keep settling against the hidden scenes; only the
    /// confetti cloud is reclaimed on its own schedule.
    pub fn close(&mut self, stage: &mut SceneStage) {
        stage.overlay.close();
        self.state = SequencerState::Idle;
    }

    /// Spawn the confetti cloud and one outward tween per point
    fn spawn_confetti(
        &mut self,
        now: f32,
        stage: &mut SceneStage,
        registry: &mut AnimationRegistry,
    ) {
        let cloud = PointCloud {
            positions: vec![Vec3::ZERO; CONFETTI_COUNT],
            size: 0.1,
            color: [1.0, 1.0, 1.0, 1.0],
        };
        let node = stage.heart.add_node(Node::points(cloud).with_name("confetti"));
        for index in 0..CONFETTI_COUNT {
            let e = CONFETTI_HALF_EXTENT;
            let to = Vec3::new(
                self.rng.gen_range(-e..=e),
                self.rng.gen_range(-e..=e),
                self.rng.gen_range(-e..=e),
            );
            registry.insert(Tween::vector(
                TweenTarget::CloudPoint {
                    scene: SceneId::Heart,
                    node,
                    index,
                },
                Vec3::ZERO,
                to,
                now,
                CONFETTI_DURATION,
                Easing::Power2Out,
            ));
        }
        self.confetti = Some(ConfettiBatch {
            node,
            spawned_at: now,
        });
    }

    /// Remove the confetti node and cancel its remaining tweens
    fn reclaim_confetti(&mut self, stage: &mut SceneStage, registry: &mut AnimationRegistry) {
        if let Some(batch) = self.confetti.take() {
            stage.heart.remove_node(batch.node);
            let cancelled = registry.cancel_for_node(SceneId::Heart, batch.node);
            debug!("confetti reclaimed, {} tweens cancelled", cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::node::MeshShape;
    use crate::node::Material;
    use crate::rig::CakeRig;
    use crate::scene::Scene;

    struct NoopRefresh;
    struct CountingRefresh {
        calls: usize,
        both_visible: bool,
    }

    impl ViewportRefresh for NoopRefresh {
        fn refresh(&mut self, _stage: &mut SceneStage) {}
    }

    impl ViewportRefresh for CountingRefresh {
        fn refresh(&mut self, stage: &mut SceneStage) {
            self.calls += 1;
            self.both_visible = stage.overlay.cake_visible && stage.overlay.heart_visible;
        }
    }

    fn test_rig() -> (SceneStage, CardRig) {
        let cam = || PerspectiveCamera::new(75.0, 0.1, 100.0, 5.0);
        let mut backdrop = Scene::new(cam());
        let particles = backdrop.add_node(Node::points(PointCloud {
            positions: vec![Vec3::ZERO; 4],
            size: 0.05,
            color: [1.0, 0.3, 0.43, 0.4],
        }));

        let mut cake = Scene::new(cam());
        let group = cake.add_node(Node::group());
        let rest_heights = [-0.4, 0.35, 1.0, 1.5, 1.75];
        let mut parts = [NodeKey::default(); 5];
        for (i, part) in parts.iter_mut().enumerate() {
            *part = cake.add_node(
                Node::mesh(
                    MeshShape::Sphere {
                        radius: 0.1,
                        segments: 8,
                        rings: 8,
                    },
                    Material::from_hex(0xffffff),
                )
                .with_parent(group)
                .with_position(Vec3::new(0.0, rest_heights[i], 0.0)),
            );
        }

        let mut heart = Scene::new(cam());
        let heart_node = heart.add_node(Node::group());

        let rig = CardRig {
            particles,
            cake: CakeRig {
                group,
                tier0: parts[0],
                tier1: parts[1],
                tier2: parts[2],
                candle: parts[3],
                flame: parts[4],
                rest_heights,
            },
            heart: heart_node,
        };
        (SceneStage::new(backdrop, cake, heart), rig)
    }

    #[test]
    fn test_trigger_opens_cake_phase_only() {
        let (mut stage, rig) = test_rig();
        let mut reg = AnimationRegistry::new();
        let mut seq = RevealSequencer::with_seed(rig, 7);

        assert!(seq.trigger(0.0, &mut stage, &mut reg, &mut NoopRefresh));
        assert!(stage.overlay.open);
        assert!(stage.overlay.cake_visible);
        assert!(!stage.overlay.heart_visible);
        assert_eq!(seq.state(), SequencerState::RevealingCake);
        // One drop tween per cake part
        assert_eq!(reg.len(), 5);
    }

    #[test]
    fn test_refresh_sees_both_phases_visible() {
        let (mut stage, rig) = test_rig();
        let mut reg = AnimationRegistry::new();
        let mut seq = RevealSequencer::with_seed(rig, 7);
        let mut refresh = CountingRefresh {
            calls: 0,
            both_visible: false,
        };

        seq.trigger(0.0, &mut stage, &mut reg, &mut refresh);
        assert_eq!(refresh.calls, 1);
        assert!(refresh.both_visible);
    }

    #[test]
    fn test_retrigger_mid_sequence_is_ignored() {
        let (mut stage, rig) = test_rig();
        let mut reg = AnimationRegistry::new();
        let mut seq = RevealSequencer::with_seed(rig, 7);

        seq.trigger(0.0, &mut stage, &mut reg, &mut NoopRefresh);
        assert!(!seq.trigger(1.0, &mut stage, &mut reg, &mut NoopRefresh));
        assert_eq!(reg.len(), 5);
        assert_eq!(seq.state(), SequencerState::RevealingCake);
    }

    #[test]
    fn test_phase_transition_timeline() {
        let (mut stage, rig) = test_rig();
        let mut reg = AnimationRegistry::new();
        let mut seq = RevealSequencer::with_seed(rig, 7);
        seq.trigger(0.0, &mut stage, &mut reg, &mut NoopRefresh);

        // Just before the hold expires, still cake
        seq.update(3.9, &mut stage, &mut reg);
        assert_eq!(seq.state(), SequencerState::RevealingCake);
        assert!(stage.overlay.cake_visible);

        // Fade begins at 4.0
        seq.update(4.0, &mut stage, &mut reg);
        assert_eq!(seq.state(), SequencerState::Transitioning);
        reg.update(4.25, &mut stage);
        assert!((stage.overlay.cake_opacity - 0.5).abs() < 1e-4);

        // Handoff at 4.5: cake hidden with opacity reset, heart revealed
        seq.update(4.5, &mut stage, &mut reg);
        assert_eq!(seq.state(), SequencerState::RevealingHeart);
        assert!(!stage.overlay.cake_visible);
        assert!(stage.overlay.heart_visible);
        assert_eq!(stage.overlay.cake_opacity, 1.0);
    }

    #[test]
    fn test_confetti_spawn_and_reclaim() {
        let (mut stage, rig) = test_rig();
        let mut reg = AnimationRegistry::new();
        let mut seq = RevealSequencer::with_seed(rig, 42);
        seq.trigger(0.0, &mut stage, &mut reg, &mut NoopRefresh);
        seq.update(4.0, &mut stage, &mut reg);
        seq.update(4.5, &mut stage, &mut reg);
        // Drop and fade tweens are finished by now and expire here, leaving
        // one tween per confetti point plus the heart scale
        reg.update(4.5, &mut stage);
        assert_eq!(stage.heart.node_count(), 2);
        assert_eq!(reg.len(), CONFETTI_COUNT + 1);

        // Fully dispersed points stay inside the scatter extent
        reg.update(6.5, &mut stage);
        let (_, cloud_node) = stage
            .heart
            .iter()
            .find(|(_, n)| n.name.as_deref() == Some("confetti"))
            .unwrap();
        if let crate::node::NodeKind::Points(cloud) = &cloud_node.kind {
            assert_eq!(cloud.positions.len(), CONFETTI_COUNT);
            for p in &cloud.positions {
                assert!(p.abs().x <= CONFETTI_HALF_EXTENT);
                assert!(p.abs().y <= CONFETTI_HALF_EXTENT);
                assert!(p.abs().z <= CONFETTI_HALF_EXTENT);
            }
        } else {
            panic!("confetti node is not a point cloud");
        }

        // Reclaimed 3 s after spawn
        seq.update(7.5, &mut stage, &mut reg);
        assert_eq!(stage.heart.node_count(), 1);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_close_returns_to_idle_and_allows_retrigger() {
        let (mut stage, rig) = test_rig();
        let mut reg = AnimationRegistry::new();
        let mut seq = RevealSequencer::with_seed(rig, 7);
        seq.trigger(0.0, &mut stage, &mut reg, &mut NoopRefresh);
        seq.update(4.0, &mut stage, &mut reg);
        seq.update(4.5, &mut stage, &mut reg);

        seq.close(&mut stage);
        assert!(!stage.overlay.open);
        assert_eq!(seq.state(), SequencerState::Idle);

        // Retrigger before the old confetti expires reclaims it up front
        assert!(seq.trigger(5.0, &mut stage, &mut reg, &mut NoopRefresh));
        assert!(stage
            .heart
            .iter()
            .all(|(_, n)| n.name.as_deref() != Some("confetti")));
    }

    #[test]
    fn test_confetti_reclaimed_even_after_close() {
        let (mut stage, rig) = test_rig();
        let mut reg = AnimationRegistry::new();
        let mut seq = RevealSequencer::with_seed(rig, 7);
        seq.trigger(0.0, &mut stage, &mut reg, &mut NoopRefresh);
        seq.update(4.0, &mut stage, &mut reg);
        seq.update(4.5, &mut stage, &mut reg);
        seq.close(&mut stage);

        seq.update(7.6, &mut stage, &mut reg);
        assert!(stage
            .heart
            .iter()
            .all(|(_, n)| n.name.as_deref() != Some("confetti")));
    }
}
