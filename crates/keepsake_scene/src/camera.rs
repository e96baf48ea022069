//! Perspective camera
//!
//! Each scene owns one camera. The card's cameras sit on the Z axis looking
//! at the origin; only the aspect ratio changes at runtime (viewport
//! adapter), so that is the one mutable knob with a dedicated setter.

use keepsake_math::{mat4, Mat4, Vec3};

/// A perspective camera looking at the scene origin
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width / height of the camera's viewport
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Camera position in scene space
    pub position: Vec3,
}

impl PerspectiveCamera {
    /// Create a camera with the given lens parameters, aspect 1.0, placed
    /// on the +Z axis
    pub fn new(fov: f32, near: f32, far: f32, z: f32) -> Self {
        Self {
            fov,
            aspect: 1.0,
            near,
            far,
            position: Vec3::new(0.0, 0.0, z),
        }
    }

    /// Update the aspect ratio (called by the viewport adapter)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// The projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// The view matrix (camera looks at the origin, +Y up)
    ///
    /// Uploaded to the GPU separately from the projection; the point-sprite
    /// shader offsets in view space between the two.
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_aspect() {
        let mut cam = PerspectiveCamera::new(75.0, 0.1, 100.0, 5.0);
        assert_eq!(cam.aspect, 1.0);
        cam.set_aspect(16.0 / 9.0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let cam = PerspectiveCamera::new(75.0, 0.1, 100.0, 5.0);
        let vp = mat4::mul(cam.projection_matrix(), cam.view_matrix());
        let p = mat4::transform_point(vp, Vec3::ZERO);
        // The look-at target lands on the view axis
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
    }
}
