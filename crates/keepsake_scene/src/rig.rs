//! Node handles the sequencer animates by name
//!
//! Scene construction returns these alongside the stage so the sequencer
//! never has to fish parts out of a node list by position.

use crate::scene::NodeKey;

/// Handles to the animatable parts of the cake scene
#[derive(Clone, Copy, Debug)]
pub struct CakeRig {
    /// The rotating group all parts hang off
    pub group: NodeKey,
    /// Bottom tier
    pub tier0: NodeKey,
    /// Middle tier
    pub tier1: NodeKey,
    /// Top tier
    pub tier2: NodeKey,
    /// Candle cylinder
    pub candle: NodeKey,
    /// Flame sphere
    pub flame: NodeKey,
    /// Resting y positions of the five dropping parts, in the order
    /// tier0, tier1, tier2, candle, flame
    pub rest_heights: [f32; 5],
}

impl CakeRig {
    /// The five parts that drop in, paired with their resting heights and
    /// stagger order
    pub fn drop_parts(&self) -> [(NodeKey, f32); 5] {
        [
            (self.tier0, self.rest_heights[0]),
            (self.tier1, self.rest_heights[1]),
            (self.tier2, self.rest_heights[2]),
            (self.candle, self.rest_heights[3]),
            (self.flame, self.rest_heights[4]),
        ]
    }
}

/// Handles to every node the reveal sequence touches
#[derive(Clone, Copy, Debug)]
pub struct CardRig {
    /// The particle cloud in the backdrop scene
    pub particles: NodeKey,
    /// The cake scene's animatable parts
    pub cake: CakeRig,
    /// The heart mesh in the heart scene
    pub heart: NodeKey,
}
