//! Node, material, and shape types
//!
//! A Node is one visual object in a Scene: a mesh, a point cloud, or a bare
//! group used only for its transform (the cake's tiers hang off one group so
//! the whole cake spins together).

use keepsake_math::Vec3;
use crate::scene::NodeKey;
use crate::transform::Transform;

/// Visual properties of a mesh surface
#[derive(Clone, Copy, Debug)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
    /// Specular exponent for lit materials
    pub shininess: f32,
    /// Skip lighting entirely (the candle flame glows on its own)
    pub unlit: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            shininess: 30.0,
            unlit: false,
        }
    }
}

impl Material {
    /// Create an opaque material from a packed 0xRRGGBB color
    pub fn from_hex(hex: u32) -> Self {
        Self {
            base_color: unpack_hex(hex),
            ..Self::default()
        }
    }

    /// Set the specular exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Mark the material as unlit
    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }
}

/// Unpack 0xRRGGBB into linear-ish RGBA floats
pub fn unpack_hex(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Parametric mesh geometry, tessellated by the render crate
#[derive(Clone, Debug)]
pub enum MeshShape {
    /// A capped cylinder centered at the node origin
    Cylinder {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    /// A UV sphere centered at the node origin
    Sphere {
        radius: f32,
        segments: u32,
        rings: u32,
    },
    /// A closed 2D outline extruded along Z with bevelled rims
    Extrusion {
        outline: Vec<[f32; 2]>,
        depth: f32,
        bevel_thickness: f32,
        bevel_size: f32,
    },
}

/// A cloud of point sprites sharing one size and color
#[derive(Clone, Debug)]
pub struct PointCloud {
    /// Point positions in node-local space, mutated by animations
    pub positions: Vec<Vec3>,
    /// Sprite size in world units
    pub size: f32,
    /// RGBA color shared by every point (alpha below 1.0 draws translucent)
    pub color: [f32; 4],
}

/// What a node draws
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// No geometry; exists only to parent other nodes
    Group,
    /// A solid mesh
    Mesh {
        shape: MeshShape,
        material: Material,
    },
    /// A point-sprite cloud
    Points(PointCloud),
}

/// One object in a scene
#[derive(Clone, Debug)]
pub struct Node {
    /// Optional name (for debugging and logs)
    pub name: Option<String>,
    /// Optional parent; the node inherits the parent's transform
    pub parent: Option<NodeKey>,
    /// The node's transform relative to its parent (or the scene)
    pub transform: Transform,
    /// What the node draws
    pub kind: NodeKind,
}

impl Node {
    /// Create a new node of the given kind at the origin
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: None,
            parent: None,
            transform: Transform::identity(),
            kind,
        }
    }

    /// Create a group node (transform only, no geometry)
    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    /// Create a mesh node
    pub fn mesh(shape: MeshShape, material: Material) -> Self {
        Self::new(NodeKind::Mesh { shape, material })
    }

    /// Create a point-cloud node
    pub fn points(cloud: PointCloud) -> Self {
        Self::new(NodeKind::Points(cloud))
    }

    /// Set the node's name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the node's parent
    pub fn with_parent(mut self, parent: NodeKey) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the node's position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_hex() {
        let c = unpack_hex(0xff4d6d);
        assert!((c[0] - 1.0).abs() < 0.001);
        assert!((c[1] - 77.0 / 255.0).abs() < 0.001);
        assert!((c[2] - 109.0 / 255.0).abs() < 0.001);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn test_material_builders() {
        let m = Material::from_hex(0xffcc00).unlit();
        assert!(m.unlit);
        let m = Material::from_hex(0xff4d6d).with_shininess(100.0);
        assert_eq!(m.shininess, 100.0);
        assert!(!m.unlit);
    }

    #[test]
    fn test_node_builders() {
        let n = Node::group().with_name("cake").with_position(Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(n.name.as_deref(), Some("cake"));
        assert_eq!(n.transform.position.y, -0.5);
        assert!(matches!(n.kind, NodeKind::Group));
    }
}
