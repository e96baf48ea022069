//! GPU-compatible data types for the card pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

use keepsake_math::{mat4, Mat4};

/// A mesh vertex with position and normal
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Per-scene uniforms: camera and lights
/// Layout: 192 bytes total (must match mesh.wgsl and points.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// View matrix (64 bytes)
    pub view: Mat4,
    /// Projection matrix (64 bytes)
    pub projection: Mat4,
    /// Camera world position, w unused (16 bytes)
    pub camera_pos: [f32; 4],
    /// Ambient light rgb + intensity (16 bytes)
    pub ambient: [f32; 4],
    /// Point light position, w unused (16 bytes)
    pub light_pos: [f32; 4],
    /// Point light rgb + intensity (16 bytes)
    pub light: [f32; 4],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            camera_pos: [0.0, 0.0, 5.0, 0.0],
            ambient: [1.0, 1.0, 1.0, 0.7],
            light_pos: [5.0, 5.0, 5.0, 1.0],
            light: [1.0, 1.0, 1.0, 50.0],
        }
    }
}

/// Per-node uniforms for the mesh pipeline
/// Layout: 96 bytes total
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniforms {
    /// Model (world) matrix (64 bytes)
    pub model: Mat4,
    /// Material base color RGBA (16 bytes)
    pub color: [f32; 4],
    /// x: shininess, y: unlit flag, z: opacity, w: unused (16 bytes)
    pub params: [f32; 4],
}

impl Default for ModelUniforms {
    fn default() -> Self {
        Self {
            model: mat4::IDENTITY,
            color: [1.0, 1.0, 1.0, 1.0],
            params: [30.0, 0.0, 1.0, 0.0],
        }
    }
}

/// One point-sprite instance
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub _padding: f32,
}

/// Per-cloud uniforms for the points pipeline
/// Layout: 96 bytes total
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CloudUniforms {
    /// Model (world) matrix (64 bytes)
    pub model: Mat4,
    /// Sprite color RGBA (16 bytes)
    pub color: [f32; 4],
    /// x: sprite size in world units, y: opacity, zw: unused (16 bytes)
    pub params: [f32; 4],
}

impl Default for CloudUniforms {
    fn default() -> Self {
        Self {
            model: mat4::IDENTITY,
            color: [1.0, 1.0, 1.0, 1.0],
            params: [0.05, 1.0, 0.0, 0.0],
        }
    }
}
