//! Per-scene GPU state
//!
//! Each scene keeps a GPU mirror: one uniform buffer for camera and lights,
//! plus per-node buffers keyed by the scene graph's node keys. Geometry is
//! tessellated once at first sight (the card's shapes never change); model
//! matrices and point positions are rewritten each frame since they animate.

use slotmap::SecondaryMap;
use wgpu::util::DeviceExt;

use keepsake_scene::{NodeKey, NodeKind, Scene};

use crate::geometry;
use crate::pipeline::{
    scene_bind_group_layout, CloudUniforms, MeshPipeline, ModelUniforms, PointInstance,
    PointsPipeline, SceneUniforms, DEPTH_FORMAT,
};
use crate::viewport::ViewportRect;

/// GPU buffers for one mesh node
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// GPU buffers for one point-cloud node
struct GpuCloud {
    instance_buffer: wgpu::Buffer,
    count: u32,
    cloud_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Pipelines and depth buffer shared by every scene
pub struct SceneRenderer {
    scene_bind_group_layout: wgpu::BindGroupLayout,
    mesh_pipeline: MeshPipeline,
    points_pipeline: PointsPipeline,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl SceneRenderer {
    /// Create the pipelines for a surface format
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let scene_layout = scene_bind_group_layout(device);
        let mesh_pipeline = MeshPipeline::new(device, surface_format, &scene_layout);
        let points_pipeline = PointsPipeline::new(device, surface_format, &scene_layout);
        Self {
            scene_bind_group_layout: scene_layout,
            mesh_pipeline,
            points_pipeline,
            depth_texture: None,
            depth_size: (0, 0),
        }
    }

    /// Ensure depth texture exists and is the right size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width: width.max(1),
                    height: height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            self.depth_texture =
                Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Encode one render pass drawing a scene into its viewport rect
    ///
    /// The first pass of a frame clears the surface; later passes load it so
    /// earlier scenes show through outside their own rects. Depth is cleared
    /// every pass since the scenes are independent.
    pub fn render_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        gpu: &GpuScene,
        viewport: ViewportRect,
        clear_color: Option<wgpu::Color>,
        window_size: (u32, u32),
    ) {
        if viewport.is_empty() {
            return;
        }
        let depth_view = self
            .depth_texture
            .as_ref()
            .expect("Depth texture not created. Call ensure_depth_texture first.");

        let load = match clear_color {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_viewport(
            viewport.x,
            viewport.y,
            viewport.width,
            viewport.height,
            0.0,
            1.0,
        );
        let (sx, sy, sw, sh) = viewport.scissor(window_size.0, window_size.1);
        if sw == 0 || sh == 0 {
            return;
        }
        pass.set_scissor_rect(sx, sy, sw, sh);

        pass.set_bind_group(0, &gpu.scene_bind_group, &[]);

        pass.set_pipeline(self.mesh_pipeline.pipeline());
        for mesh in gpu.meshes.values() {
            pass.set_bind_group(1, &mesh.bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }

        // Translucent sprites draw after the solid geometry
        pass.set_pipeline(self.points_pipeline.pipeline());
        for cloud in gpu.clouds.values() {
            pass.set_bind_group(1, &cloud.bind_group, &[]);
            pass.set_vertex_buffer(0, cloud.instance_buffer.slice(..));
            pass.draw(0..4, 0..cloud.count);
        }
    }
}

/// GPU mirror of one scene, synced from the scene graph each frame
pub struct GpuScene {
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    meshes: SecondaryMap<NodeKey, GpuMesh>,
    clouds: SecondaryMap<NodeKey, GpuCloud>,
}

impl GpuScene {
    /// Create the per-scene uniform buffer and bind group
    pub fn new(device: &wgpu::Device, renderer: &SceneRenderer) -> Self {
        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &renderer.scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });
        Self {
            scene_buffer,
            scene_bind_group,
            meshes: SecondaryMap::new(),
            clouds: SecondaryMap::new(),
        }
    }

    /// Sync GPU state from the scene graph
    ///
    /// `opacity` is the phase opacity multiplied into every material.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        renderer: &SceneRenderer,
        scene: &Scene,
        opacity: f32,
    ) {
        let camera = &scene.camera;
        let uniforms = SceneUniforms {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            camera_pos: [camera.position.x, camera.position.y, camera.position.z, 0.0],
            ambient: [
                scene.ambient.color[0],
                scene.ambient.color[1],
                scene.ambient.color[2],
                scene.ambient.intensity,
            ],
            light_pos: [
                scene.point_light.position.x,
                scene.point_light.position.y,
                scene.point_light.position.z,
                1.0,
            ],
            light: [
                scene.point_light.color[0],
                scene.point_light.color[1],
                scene.point_light.color[2],
                scene.point_light.intensity,
            ],
        };
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniforms));

        self.sweep_removed(scene);

        for (key, node) in scene.iter() {
            match &node.kind {
                NodeKind::Group => {}
                NodeKind::Mesh { shape, material } => {
                    if !self.meshes.contains_key(key) {
                        let data = geometry::tessellate(shape);
                        self.meshes.insert(
                            key,
                            Self::upload_mesh(device, renderer, &data),
                        );
                        log::debug!(
                            "uploaded mesh node {:?} ({} triangles)",
                            node.name,
                            data.triangle_count()
                        );
                    }
                    let mesh = &self.meshes[key];
                    let model = ModelUniforms {
                        model: scene.world_matrix(key),
                        color: material.base_color,
                        params: [
                            material.shininess,
                            if material.unlit { 1.0 } else { 0.0 },
                            opacity,
                            0.0,
                        ],
                    };
                    queue.write_buffer(&mesh.model_buffer, 0, bytemuck::bytes_of(&model));
                }
                NodeKind::Points(cloud) => {
                    if !self.clouds.contains_key(key) {
                        self.clouds
                            .insert(key, Self::create_cloud(device, renderer, cloud.positions.len()));
                    }
                    let gpu_cloud = &self.clouds[key];
                    let instances: Vec<PointInstance> = cloud
                        .positions
                        .iter()
                        .map(|p| PointInstance {
                            position: p.to_array(),
                            _padding: 0.0,
                        })
                        .collect();
                    queue.write_buffer(
                        &gpu_cloud.instance_buffer,
                        0,
                        bytemuck::cast_slice(&instances),
                    );
                    let uniforms = CloudUniforms {
                        model: scene.world_matrix(key),
                        color: cloud.color,
                        params: [cloud.size, opacity, 0.0, 0.0],
                    };
                    queue.write_buffer(
                        &gpu_cloud.cloud_buffer,
                        0,
                        bytemuck::bytes_of(&uniforms),
                    );
                }
            }
        }
    }

    /// Drop GPU state for nodes no longer in the scene
    fn sweep_removed(&mut self, scene: &Scene) {
        let dead_meshes: Vec<NodeKey> = self
            .meshes
            .keys()
            .filter(|&k| !scene.contains(k))
            .collect();
        for key in dead_meshes {
            self.meshes.remove(key);
        }
        let dead_clouds: Vec<NodeKey> = self
            .clouds
            .keys()
            .filter(|&k| !scene.contains(k))
            .collect();
        for key in dead_clouds {
            self.clouds.remove(key);
            log::debug!("dropped GPU buffers for removed cloud {:?}", key);
        }
    }

    fn upload_mesh(
        device: &wgpu::Device,
        renderer: &SceneRenderer,
        data: &geometry::MeshData,
    ) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Uniform Buffer"),
            contents: bytemuck::bytes_of(&ModelUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout: renderer.mesh_pipeline.model_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });
        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            model_buffer,
            bind_group,
        }
    }

    fn create_cloud(
        device: &wgpu::Device,
        renderer: &SceneRenderer,
        count: usize,
    ) -> GpuCloud {
        let instances = vec![PointInstance::default(); count.max(1)];
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cloud Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let cloud_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cloud Uniform Buffer"),
            contents: bytemuck::bytes_of(&CloudUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cloud Bind Group"),
            layout: renderer.points_pipeline.cloud_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: cloud_buffer.as_entire_binding(),
            }],
        });
        GpuCloud {
            instance_buffer,
            count: count as u32,
            cloud_buffer,
            bind_group,
        }
    }
}
