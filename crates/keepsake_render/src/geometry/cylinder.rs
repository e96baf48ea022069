//! Capped cylinder tessellation

use std::f32::consts::TAU;

use super::MeshData;
use crate::pipeline::MeshVertex;

/// Tessellate a capped cylinder centered at the origin, axis along Y
pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let segments = radial_segments.max(3);
    let half = height / 2.0;
    let mut data = MeshData::default();

    // Side: two rings sharing radial normals
    let base = data.vertices.len() as u32;
    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        let normal = [cos, 0.0, sin];
        data.vertices.push(MeshVertex {
            position: [radius * cos, -half, radius * sin],
            normal,
        });
        data.vertices.push(MeshVertex {
            position: [radius * cos, half, radius * sin],
            normal,
        });
    }
    for i in 0..segments {
        let b0 = base + i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        data.indices.extend_from_slice(&[b0, t0, b1, b1, t0, t1]);
    }

    // Caps: center plus an independent ring with the cap normal
    for &(y, ny) in &[(half, 1.0f32), (-half, -1.0f32)] {
        let center = data.vertices.len() as u32;
        data.vertices.push(MeshVertex {
            position: [0.0, y, 0.0],
            normal: [0.0, ny, 0.0],
        });
        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            data.vertices.push(MeshVertex {
                position: [radius * cos, y, radius * sin],
                normal: [0.0, ny, 0.0],
            });
        }
        for i in 0..segments {
            let r0 = center + 1 + i;
            let r1 = r0 + 1;
            if ny > 0.0 {
                data.indices.extend_from_slice(&[center, r1, r0]);
            } else {
                data.indices.extend_from_slice(&[center, r0, r1]);
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let seg = 16u32;
        let data = cylinder(1.0, 2.0, seg);
        // Side quads plus two cap fans
        assert_eq!(data.triangle_count() as u32, seg * 2 + seg * 2);
        assert_eq!(data.indices.len() % 3, 0);
    }

    #[test]
    fn test_positions_within_bounds() {
        let data = cylinder(1.5, 0.8, 24);
        for v in &data.vertices {
            let r = (v.position[0].powi(2) + v.position[2].powi(2)).sqrt();
            assert!(r <= 1.5 + 1e-5);
            assert!(v.position[1].abs() <= 0.4 + 1e-5);
        }
    }

    #[test]
    fn test_normals_unit_length() {
        let data = cylinder(1.0, 1.0, 8);
        for v in &data.vertices {
            let len =
                (v.normal[0].powi(2) + v.normal[1].powi(2) + v.normal[2].powi(2)).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }
}
