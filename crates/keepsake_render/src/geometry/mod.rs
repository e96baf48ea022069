//! CPU tessellation of the card's parametric shapes
//!
//! Shapes are described in `keepsake_scene` and turned into vertex/index
//! buffers here, once per node, at first sight.

mod cylinder;
mod extrude;
mod sphere;

pub use cylinder::cylinder;
pub use extrude::{extrude, triangulate};
pub use sphere::uv_sphere;

use keepsake_scene::MeshShape;

use crate::pipeline::MeshVertex;

/// Tessellated triangle-list geometry
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Tessellate a parametric shape
pub fn tessellate(shape: &MeshShape) -> MeshData {
    match shape {
        MeshShape::Cylinder {
            radius,
            height,
            radial_segments,
        } => cylinder(*radius, *height, *radial_segments),
        MeshShape::Sphere {
            radius,
            segments,
            rings,
        } => uv_sphere(*radius, *segments, *rings),
        MeshShape::Extrusion {
            outline,
            depth,
            bevel_thickness,
            bevel_size,
        } => extrude(outline, *depth, *bevel_thickness, *bevel_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tessellate_dispatch() {
        let data = tessellate(&MeshShape::Sphere {
            radius: 1.0,
            segments: 8,
            rings: 6,
        });
        assert!(data.triangle_count() > 0);
        assert_eq!(data.indices.len() % 3, 0);
    }
}
