//! Keepsake - an animated greeting card
//!
//! A particle backdrop fills the window; a click or keypress opens a
//! centered card panel that reveals a layered cake, then hands off to a
//! beating extruded heart with confetti.

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use keepsake::config::AppConfig;
use keepsake::scene::SceneBuilder;
use keepsake::systems::{
    MotionSystem, RenderError, RenderSystem, ViewportAdapter, WindowSystem,
};
use keepsake_scene::{AnimationRegistry, Clock, RevealSequencer, SceneStage};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    stage: SceneStage,
    viewports: ViewportAdapter,
    motion: MotionSystem,
    registry: AnimationRegistry,
    sequencer: RevealSequencer,
    clock: Clock,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let (stage, rig) =
            SceneBuilder::new(config.camera.clone(), config.backdrop.clone()).build();

        let viewports = ViewportAdapter::new(config.rendering.panel_fraction);
        let motion = MotionSystem::new(rig);
        let sequencer = RevealSequencer::new(rig);

        Self {
            config,
            window: None,
            render: None,
            stage,
            viewports,
            motion,
            registry: AnimationRegistry::new(),
            sequencer,
            clock: Clock::new(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = WindowSystem::create(event_loop, &self.config.window)
                .expect("Failed to create window");

            let render = RenderSystem::new(
                window.window().clone(),
                &self.config.rendering,
                self.config.window.vsync,
            )
            .unwrap_or_else(|e| panic!("Failed to initialize renderer: {}", e));

            let (width, height) = render.size();
            self.viewports.set_window_size(width, height);
            self.viewports.apply(&mut self.stage);

            self.window = Some(window);
            self.render = Some(render);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                self.viewports
                    .set_window_size(physical_size.width, physical_size.height);
                self.viewports.apply(&mut self.stage);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    match key {
                        KeyCode::Space | KeyCode::Enter => {
                            self.sequencer.trigger(
                                self.clock.elapsed_seconds(),
                                &mut self.stage,
                                &mut self.registry,
                                &mut self.viewports,
                            );
                        }
                        KeyCode::Escape => {
                            if self.stage.overlay.open {
                                self.sequencer.close(&mut self.stage);
                                self.viewports.apply(&mut self.stage);
                            } else {
                                event_loop.exit();
                            }
                        }
                        KeyCode::KeyF => {
                            if let Some(window) = &self.window {
                                window.toggle_fullscreen();
                            }
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if state == ElementState::Pressed && button == MouseButton::Left {
                    self.sequencer.trigger(
                        self.clock.elapsed_seconds(),
                        &mut self.stage,
                        &mut self.registry,
                        &mut self.viewports,
                    );
                }
            }

            WindowEvent::RedrawRequested => {
                let now = self.clock.elapsed_seconds();

                self.motion.apply(now, &mut self.stage);
                self.registry.update(now, &mut self.stage);
                self.sequencer
                    .update(now, &mut self.stage, &mut self.registry);

                if let Some(render) = &mut self.render {
                    match render.render_frame(&self.stage, &self.viewports) {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => {
                            render.reconfigure();
                        }
                        Err(RenderError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => {
                            log::warn!("Dropped frame: {}", e);
                        }
                    }
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    // Load configuration before logging so the configured level applies
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.debug.log_level),
    )
    .init();
    log::info!("Starting Keepsake");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
