//! Scene lights
//!
//! Every scene carries exactly one ambient light and one point light; the
//! card uses the identical recipe for all three scenes.

use keepsake_math::Vec3;

/// Uniform fill light
#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    /// RGB color (0.0-1.0)
    pub color: [f32; 3],
    /// Brightness multiplier
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 0.7,
        }
    }
}

/// Omnidirectional light with inverse-square falloff
#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    /// Light position in scene space
    pub position: Vec3,
    /// RGB color (0.0-1.0)
    pub color: [f32; 3],
    /// Brightness multiplier before falloff
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            color: [1.0, 1.0, 1.0],
            intensity: 50.0,
        }
    }
}
