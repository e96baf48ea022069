//! Rendering pipeline components
//!
//! The card needs exactly two draw paths: lit meshes and translucent
//! point sprites. Both share the per-scene uniform bind group.

pub mod mesh_pipeline;
pub mod points_pipeline;
pub mod types;

pub use mesh_pipeline::MeshPipeline;
pub use points_pipeline::PointsPipeline;
pub use types::{CloudUniforms, MeshVertex, ModelUniforms, PointInstance, SceneUniforms};

/// Depth format shared by both pipelines
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Create the bind group layout for per-scene uniforms (group 0 in both
/// pipelines)
pub fn scene_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Scene Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}
