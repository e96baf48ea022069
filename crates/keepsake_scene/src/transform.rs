//! Node transform (position, rotation, scale)

use keepsake_math::{mat4, Mat4, Vec3};

/// Position, Euler rotation (radians, applied X then Y then Z), and
/// non-uniform scale of a scene node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position in scene space
    pub position: Vec3,
    /// Euler rotation angles in radians
    pub rotation: Vec3,
    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform (no translation, rotation, or scaling)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Set uniform scale on all three axes
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::splat(scale);
    }

    /// The local transform matrix (scale, then rotation, then translation)
    pub fn matrix(&self) -> Mat4 {
        mat4::from_trs(self.position, self.rotation, self.scale)
    }

    /// Transform a point from local space to parent space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        mat4::transform_point(self.matrix(), p)
    }
}
