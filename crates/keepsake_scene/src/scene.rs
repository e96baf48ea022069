//! Scene container
//!
//! A Scene owns its nodes (slotmap-keyed), one camera, and the two lights.
//! The card keeps three scenes alive at once; they never share nodes.

use keepsake_math::{mat4, Mat4};
use slotmap::{new_key_type, SlotMap};

use crate::camera::PerspectiveCamera;
use crate::light::{AmbientLight, PointLight};
use crate::node::Node;

new_key_type! {
    /// Generational key to a node in a scene
    pub struct NodeKey;
}

/// An independent collection of visual objects plus one camera
pub struct Scene {
    nodes: SlotMap<NodeKey, Node>,
    /// The scene's camera
    pub camera: PerspectiveCamera,
    /// Uniform fill light
    pub ambient: AmbientLight,
    /// Point light with falloff
    pub point_light: PointLight,
}

impl Scene {
    /// Create an empty scene with the given camera and default lights
    pub fn new(camera: PerspectiveCamera) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            camera,
            ambient: AmbientLight::default(),
            point_light: PointLight::default(),
        }
    }

    /// Add a node, returning its key
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Remove a node; children keep their keys but lose the parent link's
    /// effect next time matrices are computed against a missing parent
    pub fn remove_node(&mut self, key: NodeKey) -> Option<Node> {
        self.nodes.remove(key)
    }

    /// Get a reference to a node
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Get a mutable reference to a node
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Whether the scene still contains the node
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of nodes in the scene
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes with their keys
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }

    /// The node's scene-space matrix, walking the parent chain
    pub fn world_matrix(&self, key: NodeKey) -> Mat4 {
        let mut matrix = match self.nodes.get(key) {
            Some(node) => node.transform.matrix(),
            None => return mat4::IDENTITY,
        };
        let mut parent = self.nodes.get(key).and_then(|n| n.parent);
        while let Some(pkey) = parent {
            let Some(pnode) = self.nodes.get(pkey) else {
                break;
            };
            matrix = mat4::mul(pnode.transform.matrix(), matrix);
            parent = pnode.parent;
        }
        matrix
    }
}
