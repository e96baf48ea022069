//! GPU rendering system
//!
//! Owns the render context, the scene renderer, and one GPU mirror per
//! scene. A frame is up to three passes over the same surface: the
//! backdrop clears and fills the window, then the cake and heart panels
//! draw into their shared centered rect on top of it.

use crate::config::RenderingConfig;
use crate::systems::ViewportAdapter;
use keepsake_render::{ContextError, GpuScene, RenderContext, SceneRenderer};
use keepsake_scene::{DrawSet, Phase, SceneStage};
use std::sync::Arc;
use winit::window::Window;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    renderer: SceneRenderer,
    backdrop_gpu: GpuScene,
    cake_gpu: GpuScene,
    heart_gpu: GpuScene,
    background_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut renderer = SceneRenderer::new(&context.device, context.config.format);
        renderer.ensure_depth_texture(&context.device, context.size.width, context.size.height);

        let backdrop_gpu = GpuScene::new(&context.device, &renderer);
        let cake_gpu = GpuScene::new(&context.device, &renderer);
        let heart_gpu = GpuScene::new(&context.device, &renderer);

        let bg = render_config.background_color;
        let background_color = wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        };

        Ok(Self {
            context,
            renderer,
            backdrop_gpu,
            cake_gpu,
            heart_gpu,
            background_color,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.renderer
            .ensure_depth_texture(&self.context.device, width, height);
    }

    /// Reconfigure the surface after a loss
    pub fn reconfigure(&self) {
        self.context.reconfigure();
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        stage: &SceneStage,
        adapter: &ViewportAdapter,
    ) -> Result<(), RenderError> {
        let draw_set = stage.overlay.draw_set();

        self.backdrop_gpu.prepare(
            &self.context.device,
            &self.context.queue,
            &self.renderer,
            &stage.backdrop,
            1.0,
        );
        if draw_set.contains(DrawSet::CAKE) {
            self.cake_gpu.prepare(
                &self.context.device,
                &self.context.queue,
                &self.renderer,
                &stage.cake,
                stage.overlay.opacity(Phase::Cake),
            );
        }
        if draw_set.contains(DrawSet::HEART) {
            self.heart_gpu.prepare(
                &self.context.device,
                &self.context.queue,
                &self.renderer,
                &stage.heart,
                stage.overlay.opacity(Phase::Heart),
            );
        }

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let window_size = (self.context.size.width, self.context.size.height);

        self.renderer.render_scene(
            &mut encoder,
            &view,
            &self.backdrop_gpu,
            adapter.backdrop_rect(),
            Some(self.background_color),
            window_size,
        );
        if draw_set.contains(DrawSet::CAKE) {
            self.renderer.render_scene(
                &mut encoder,
                &view,
                &self.cake_gpu,
                adapter.panel_rect(),
                None,
                window_size,
            );
        }
        if draw_set.contains(DrawSet::HEART) {
            self.renderer.render_scene(
                &mut encoder,
                &view,
                &self.heart_gpu,
                adapter.panel_rect(),
                None,
                window_size,
            );
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }
}
