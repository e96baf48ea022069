//! wgpu rendering for the Keepsake card
//!
//! Everything GPU-side: surface and device management, parametric mesh
//! tessellation, the mesh and point-sprite pipelines, and the per-scene
//! GPU mirrors the render loop draws from.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`geometry`] - CPU tessellation of the card's parametric shapes
//! - [`pipeline::MeshPipeline`] / [`pipeline::PointsPipeline`] - The two draw paths
//! - [`SceneRenderer`] / [`GpuScene`] - Per-scene GPU state, synced from the
//!   scene graph each frame
//! - [`ViewportRect`] - Pixel rect a scene draws into

pub mod context;
pub mod geometry;
pub mod pipeline;
pub mod scene_gpu;
pub mod viewport;

pub use context::{ContextError, RenderContext};
pub use scene_gpu::{GpuScene, SceneRenderer};
pub use viewport::ViewportRect;

// Re-export scene types for convenience
pub use keepsake_scene::{DrawSet, Scene, SceneStage};
