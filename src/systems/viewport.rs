//! Viewport adapter
//!
//! Maps window layout to camera aspects and viewport rects. The backdrop
//! always fills the window; the card panel is a centered box shared by the
//! cake and heart scenes. A hidden panel has no layout, so its rect is
//! zero-sized until the overlay opens, and the reveal trigger re-runs the
//! adapter inside the window where both phases are briefly visible.

use keepsake_render::ViewportRect;
use keepsake_scene::{SceneStage, ViewportRefresh};

/// Recomputes camera aspects and viewport rects from the window layout
pub struct ViewportAdapter {
    panel_fraction: f32,
    window_size: (u32, u32),
    backdrop_rect: ViewportRect,
    panel_rect: ViewportRect,
}

impl ViewportAdapter {
    pub fn new(panel_fraction: f32) -> Self {
        Self {
            panel_fraction,
            window_size: (1, 1),
            backdrop_rect: ViewportRect::ZERO,
            panel_rect: ViewportRect::ZERO,
        }
    }

    /// Record a new window size; `apply` does the actual recompute
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width.max(1), height.max(1));
    }

    /// Recompute rects and camera aspects from the current layout
    ///
    /// Idempotent: running twice against an unchanged layout leaves every
    /// aspect and rect exactly where it was.
    pub fn apply(&mut self, stage: &mut SceneStage) {
        let (width, height) = self.window_size;

        self.backdrop_rect = ViewportRect::full_window(width, height);
        stage
            .backdrop
            .camera
            .set_aspect(self.backdrop_rect.aspect());

        // A closed overlay has no layout box at all
        self.panel_rect = if stage.overlay.open {
            ViewportRect::centered_fraction(width, height, self.panel_fraction)
        } else {
            ViewportRect::ZERO
        };

        if !self.panel_rect.is_empty() {
            let aspect = self.panel_rect.aspect();
            if stage.overlay.cake_visible {
                stage.cake.camera.set_aspect(aspect);
            }
            if stage.overlay.heart_visible {
                stage.heart.camera.set_aspect(aspect);
            }
        }
    }

    /// Full-window rect the backdrop draws into
    pub fn backdrop_rect(&self) -> ViewportRect {
        self.backdrop_rect
    }

    /// Centered panel rect shared by the cake and heart scenes
    pub fn panel_rect(&self) -> ViewportRect {
        self.panel_rect
    }
}

impl ViewportRefresh for ViewportAdapter {
    fn refresh(&mut self, stage: &mut SceneStage) {
        self.apply(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::scene::SceneBuilder;
    use keepsake_scene::Phase;

    fn stage() -> SceneStage {
        let config = AppConfig::default();
        SceneBuilder::with_seed(config.camera, config.backdrop, 9)
            .build()
            .0
    }

    #[test]
    fn test_backdrop_aspect_matches_window() {
        let mut stage = stage();
        let mut adapter = ViewportAdapter::new(0.6);
        adapter.set_window_size(1920, 1080);
        adapter.apply(&mut stage);

        assert!((stage.backdrop.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(adapter.backdrop_rect().width, 1920.0);
    }

    #[test]
    fn test_closed_overlay_has_zero_panel() {
        let mut stage = stage();
        let mut adapter = ViewportAdapter::new(0.6);
        adapter.set_window_size(1280, 720);
        adapter.apply(&mut stage);

        assert!(adapter.panel_rect().is_empty());
        // Panel cameras untouched while hidden
        assert_eq!(stage.cake.camera.aspect, 1.0);
    }

    #[test]
    fn test_open_overlay_sets_visible_panel_aspects() {
        let mut stage = stage();
        stage.overlay.open = true;
        stage.overlay.set_phase_visible(Phase::Cake, true);
        stage.overlay.set_phase_visible(Phase::Heart, true);

        let mut adapter = ViewportAdapter::new(0.5);
        adapter.set_window_size(1000, 800);
        adapter.apply(&mut stage);

        let panel = adapter.panel_rect();
        assert_eq!(panel.width, 500.0);
        assert_eq!(panel.height, 400.0);
        assert!((stage.cake.camera.aspect - 1.25).abs() < 1e-6);
        assert!((stage.heart.camera.aspect - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut stage = stage();
        stage.overlay.open = true;
        stage.overlay.set_phase_visible(Phase::Cake, true);

        let mut adapter = ViewportAdapter::new(0.6);
        adapter.set_window_size(1280, 720);
        adapter.apply(&mut stage);
        let aspect = stage.cake.camera.aspect;
        let panel = adapter.panel_rect();

        adapter.apply(&mut stage);
        assert_eq!(stage.cake.camera.aspect, aspect);
        assert_eq!(adapter.panel_rect(), panel);
    }

    #[test]
    fn test_hidden_phase_keeps_measured_aspect() {
        let mut stage = stage();
        stage.overlay.open = true;
        stage.overlay.set_phase_visible(Phase::Cake, true);
        stage.overlay.set_phase_visible(Phase::Heart, true);

        let mut adapter = ViewportAdapter::new(0.6);
        adapter.set_window_size(1280, 720);
        adapter.apply(&mut stage);
        let measured = stage.heart.camera.aspect;

        // Heart hidden again after the measurement window
        stage.overlay.set_phase_visible(Phase::Heart, false);
        adapter.apply(&mut stage);
        assert_eq!(stage.heart.camera.aspect, measured);
    }
}
