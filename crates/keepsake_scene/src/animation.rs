//! Animation registry
//!
//! Tweens are time-bounded eased interpolations over one animatable
//! channel. The registry owns every in-flight tween, applies them against
//! the stage each frame, and removes them once finished. There is no
//! fire-and-forget animation anywhere in the card, so tests (and the
//! confetti teardown) can cancel precisely.

use keepsake_math::{Easing, Vec3};
use slotmap::{new_key_type, SlotMap};

use crate::node::NodeKind;
use crate::overlay::Phase;
use crate::scene::NodeKey;
use crate::stage::{SceneId, SceneStage};

new_key_type! {
    /// Generational key to a tween in the registry
    pub struct TweenKey;
}

/// The property a tween writes each update
#[derive(Clone, Copy, Debug)]
pub enum TweenTarget {
    /// A node's vertical position (the cake tiers dropping in)
    NodePositionY { scene: SceneId, node: NodeKey },
    /// A node's uniform scale (the heart springing in)
    NodeUniformScale { scene: SceneId, node: NodeKey },
    /// One point of a point-cloud node (confetti dispersal)
    CloudPoint {
        scene: SceneId,
        node: NodeKey,
        index: usize,
    },
    /// A phase container's opacity (the cake fade-out)
    PhaseOpacity(Phase),
}

impl TweenTarget {
    /// The node this target writes, if it writes one
    fn node(&self) -> Option<(SceneId, NodeKey)> {
        match *self {
            TweenTarget::NodePositionY { scene, node }
            | TweenTarget::NodeUniformScale { scene, node }
            | TweenTarget::CloudPoint { scene, node, .. } => Some((scene, node)),
            TweenTarget::PhaseOpacity(_) => None,
        }
    }
}

/// A time-bounded interpolation from a start value to a target value
///
/// Scalar channels use only the x component of `from`/`to`. Before its
/// start time a tween holds the property at `from` (a delayed tier still
/// snaps off-screen the moment the sequence triggers).
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    pub target: TweenTarget,
    pub from: Vec3,
    pub to: Vec3,
    /// Absolute clock time the interpolation begins (trigger time + delay)
    pub start: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl Tween {
    /// Tween a scalar channel
    pub fn scalar(
        target: TweenTarget,
        from: f32,
        to: f32,
        start: f32,
        duration: f32,
        easing: Easing,
    ) -> Self {
        Self {
            target,
            from: Vec3::splat(from),
            to: Vec3::splat(to),
            start,
            duration,
            easing,
        }
    }

    /// Tween a vector channel
    pub fn vector(
        target: TweenTarget,
        from: Vec3,
        to: Vec3,
        start: f32,
        duration: f32,
        easing: Easing,
    ) -> Self {
        Self {
            target,
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// The interpolated value at a clock time (clamped to the endpoints)
    pub fn value_at(&self, now: f32) -> Vec3 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (now - self.start) / self.duration;
        self.from.lerp(self.to, self.easing.apply(t))
    }

    /// Whether the tween has run its full duration
    pub fn is_finished(&self, now: f32) -> bool {
        now >= self.start + self.duration
    }
}

/// Owns and drives every in-flight tween
#[derive(Default)]
pub struct AnimationRegistry {
    tweens: SlotMap<TweenKey, Tween>,
}

impl AnimationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tween, returning its key
    pub fn insert(&mut self, tween: Tween) -> TweenKey {
        self.tweens.insert(tween)
    }

    /// Number of in-flight tweens
    #[inline]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether no tweens are in flight
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Remove one tween; returns whether it existed
    pub fn cancel(&mut self, key: TweenKey) -> bool {
        self.tweens.remove(key).is_some()
    }

    /// Remove every tween targeting a node; returns how many were removed
    pub fn cancel_for_node(&mut self, scene: SceneId, node: NodeKey) -> usize {
        let doomed: Vec<TweenKey> = self
            .tweens
            .iter()
            .filter(|(_, t)| t.target.node() == Some((scene, node)))
            .map(|(k, _)| k)
            .collect();
        let count = doomed.len();
        for key in doomed {
            self.tweens.remove(key);
        }
        count
    }

    /// Apply every tween at the given clock time, then expire finished ones
    ///
    /// A finished tween writes its exact end value before removal. Tweens
    /// whose target node has been removed from its scene are dropped
    /// silently.
    pub fn update(&mut self, now: f32, stage: &mut SceneStage) {
        let mut done: Vec<TweenKey> = Vec::new();
        for (key, tween) in self.tweens.iter() {
            let applied = apply_target(stage, &tween.target, tween.value_at(now));
            if !applied || tween.is_finished(now) {
                done.push(key);
            }
        }
        for key in done {
            self.tweens.remove(key);
        }
    }
}

/// Write a value to a target; returns false if the target no longer exists
fn apply_target(stage: &mut SceneStage, target: &TweenTarget, value: Vec3) -> bool {
    match *target {
        TweenTarget::NodePositionY { scene, node } => {
            match stage.scene_mut(scene).node_mut(node) {
                Some(n) => {
                    n.transform.position.y = value.x;
                    true
                }
                None => false,
            }
        }
        TweenTarget::NodeUniformScale { scene, node } => {
            match stage.scene_mut(scene).node_mut(node) {
                Some(n) => {
                    n.transform.scale = Vec3::splat(value.x);
                    true
                }
                None => false,
            }
        }
        TweenTarget::CloudPoint { scene, node, index } => {
            match stage.scene_mut(scene).node_mut(node) {
                Some(n) => match &mut n.kind {
                    NodeKind::Points(cloud) => match cloud.positions.get_mut(index) {
                        Some(p) => {
                            *p = value;
                            true
                        }
                        None => false,
                    },
                    _ => false,
                },
                None => false,
            }
        }
        TweenTarget::PhaseOpacity(phase) => {
            *stage.overlay.opacity_mut(phase) = value.x;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::node::Node;
    use crate::scene::Scene;

    fn stage_with_cake_node() -> (SceneStage, NodeKey) {
        let cam = || PerspectiveCamera::new(75.0, 0.1, 100.0, 5.0);
        let mut cake = Scene::new(cam());
        let node = cake.add_node(Node::group());
        let stage = SceneStage::new(Scene::new(cam()), cake, Scene::new(cam()));
        (stage, node)
    }

    fn y_tween(node: NodeKey, start: f32) -> Tween {
        Tween::scalar(
            TweenTarget::NodePositionY {
                scene: SceneId::Cake,
                node,
            },
            10.0,
            -0.4,
            start,
            0.8,
            Easing::Linear,
        )
    }

    #[test]
    fn test_holds_from_value_during_delay() {
        let (mut stage, node) = stage_with_cake_node();
        let mut reg = AnimationRegistry::new();
        reg.insert(y_tween(node, 1.0));

        // Before the delayed start the property snaps to the from value
        reg.update(0.5, &mut stage);
        assert_eq!(stage.cake.node(node).unwrap().transform.position.y, 10.0);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_linear_midpoint() {
        let (mut stage, node) = stage_with_cake_node();
        let mut reg = AnimationRegistry::new();
        reg.insert(y_tween(node, 0.0));

        reg.update(0.4, &mut stage);
        let y = stage.cake.node(node).unwrap().transform.position.y;
        assert!((y - 4.8).abs() < 1e-4, "midpoint y = {}", y);
    }

    #[test]
    fn test_finished_tween_applies_end_value_and_expires() {
        let (mut stage, node) = stage_with_cake_node();
        let mut reg = AnimationRegistry::new();
        reg.insert(y_tween(node, 0.0));

        reg.update(2.0, &mut stage);
        assert_eq!(stage.cake.node(node).unwrap().transform.position.y, -0.4);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_missing_node_drops_tween() {
        let (mut stage, node) = stage_with_cake_node();
        let mut reg = AnimationRegistry::new();
        reg.insert(y_tween(node, 0.0));
        stage.cake.remove_node(node);

        reg.update(0.1, &mut stage);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_cancel_for_node() {
        let (_stage, node) = stage_with_cake_node();
        let mut reg = AnimationRegistry::new();
        for i in 0..3 {
            reg.insert(Tween::vector(
                TweenTarget::CloudPoint {
                    scene: SceneId::Heart,
                    node,
                    index: i,
                },
                Vec3::ZERO,
                Vec3::ONE,
                0.0,
                2.0,
                Easing::Power2Out,
            ));
        }
        reg.insert(Tween::scalar(
            TweenTarget::PhaseOpacity(Phase::Cake),
            1.0,
            0.0,
            0.0,
            0.5,
            Easing::Linear,
        ));

        assert_eq!(reg.cancel_for_node(SceneId::Heart, node), 3);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_phase_opacity_target() {
        let (mut stage, _) = stage_with_cake_node();
        let mut reg = AnimationRegistry::new();
        reg.insert(Tween::scalar(
            TweenTarget::PhaseOpacity(Phase::Cake),
            1.0,
            0.0,
            0.0,
            0.5,
            Easing::Linear,
        ));

        reg.update(0.25, &mut stage);
        assert!((stage.overlay.cake_opacity - 0.5).abs() < 1e-4);
        reg.update(0.5, &mut stage);
        assert_eq!(stage.overlay.cake_opacity, 0.0);
        assert!(reg.is_empty());
    }
}
