//! UV sphere tessellation

use std::f32::consts::{PI, TAU};

use super::MeshData;
use crate::pipeline::MeshVertex;

/// Tessellate a UV sphere centered at the origin
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut data = MeshData::default();

    for ring in 0..=rings {
        let phi = ring as f32 / rings as f32 * PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for seg in 0..=segments {
            let theta = seg as f32 / segments as f32 * TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            data.vertices.push(MeshVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
            });
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let upper = ring * stride + seg;
            let lower = upper + stride;
            // Degenerate triangles at the poles are skipped
            if ring > 0 {
                data.indices.extend_from_slice(&[lower, upper, lower + 1]);
            }
            if ring < rings - 1 {
                data.indices
                    .extend_from_slice(&[lower + 1, upper, upper + 1]);
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_on_sphere() {
        let data = uv_sphere(0.08, 16, 16);
        for v in &data.vertices {
            let r = (v.position[0].powi(2) + v.position[1].powi(2) + v.position[2].powi(2))
                .sqrt();
            assert!((r - 0.08).abs() < 1e-5);
        }
    }

    #[test]
    fn test_normal_matches_direction() {
        let data = uv_sphere(2.0, 8, 8);
        for v in &data.vertices {
            for axis in 0..3 {
                assert!((v.position[axis] / 2.0 - v.normal[axis]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_triangle_count() {
        let (seg, rings) = (12u32, 6u32);
        let data = uv_sphere(1.0, seg, rings);
        // Full quads on interior rings, single triangles at the poles
        assert_eq!(data.triangle_count() as u32, seg * (rings - 1) * 2);
    }
}
