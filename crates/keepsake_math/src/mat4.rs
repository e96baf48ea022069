//! 4x4 Matrix utilities (column-major)
//!
//! Transforms compose as `mul(a, b)` = apply `b` first, then `a`. The layout
//! matches WGSL's `mat4x4<f32>` so matrices upload to the GPU unchanged.

use crate::Vec3;

/// 4x4 matrix type (column-major), `m[column][row]`
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a translation matrix
pub fn from_translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3] = [t.x, t.y, t.z, 1.0];
    m
}

/// Create a non-uniform scale matrix
pub fn from_scale(s: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s.x;
    m[1][1] = s.y;
    m[2][2] = s.z;
    m
}

/// Create a rotation matrix about the X axis
pub fn from_rotation_x(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[1] = [0.0, cs, sn, 0.0];
    m[2] = [0.0, -sn, cs, 0.0];
    m
}

/// Create a rotation matrix about the Y axis
pub fn from_rotation_y(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0] = [cs, 0.0, -sn, 0.0];
    m[2] = [sn, 0.0, cs, 0.0];
    m
}

/// Create a rotation matrix about the Z axis
pub fn from_rotation_z(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0] = [cs, sn, 0.0, 0.0];
    m[1] = [-sn, cs, 0.0, 0.0];
    m
}

/// Create a rotation matrix from Euler angles applied in X, Y, Z order
pub fn from_euler(angles: Vec3) -> Mat4 {
    mul(
        from_rotation_x(angles.x),
        mul(from_rotation_y(angles.y), from_rotation_z(angles.z)),
    )
}

/// Compose translation, Euler rotation, and scale into one matrix
///
/// Applies scale first, then rotation, then translation.
pub fn from_trs(translation: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    mul(
        from_translation(translation),
        mul(from_euler(rotation), from_scale(scale)),
    )
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point by a 4x4 matrix (w = 1)
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Create a perspective projection matrix
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Create a look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform_point(IDENTITY, p), p));
    }

    #[test]
    fn test_translation() {
        let m = from_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = transform_point(m, Vec3::ZERO);
        assert!(vec_approx_eq(p, Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        // +X rotated 90 deg about Y lands on -Z
        let m = from_rotation_y(FRAC_PI_2);
        let p = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(0.0, 0.0, -1.0)), "got {:?}", p);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        // +X rotated 90 deg about Z lands on +Y
        let m = from_rotation_z(FRAC_PI_2);
        let p = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::Y), "got {:?}", p);
    }

    #[test]
    fn test_trs_order() {
        // Scale 2, rotate 90 deg about Z, translate +10 on X:
        // X * 2 = (2, 0, 0), rotated = (0, 2, 0), + (10, 0, 0) = (10, 2, 0)
        let m = from_trs(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, FRAC_PI_2),
            Vec3::splat(2.0),
        );
        let p = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(10.0, 2.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_mul_composition() {
        use std::f32::consts::FRAC_PI_4;

        // Two 45 deg rotations equal one 90 deg rotation
        let r45 = from_rotation_y(FRAC_PI_4);
        let r90 = from_rotation_y(FRAC_PI_2);
        let composed = mul(r45, r45);

        let a = transform_point(composed, Vec3::X);
        let b = transform_point(r90, Vec3::X);
        assert!(vec_approx_eq(a, b), "composed {:?}, direct {:?}", a, b);
    }

    #[test]
    fn test_perspective_nonzero() {
        let proj = perspective(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0);
        assert!(proj[0][0] != 0.0);
        assert!(proj[1][1] != 0.0);
    }

    #[test]
    fn test_look_at_origin() {
        // Eye on +Z looking at origin: the origin maps to -eye_distance on Z
        let view = look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let p = transform_point(view, Vec3::ZERO);
        assert!(vec_approx_eq(p, Vec3::new(0.0, 0.0, -5.0)), "got {:?}", p);
    }
}
