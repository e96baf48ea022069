//! Overlay visibility state
//!
//! The overlay container and its two sub-phases are the whole state machine
//! deciding what the render loop draws. The backdrop always draws; the cake
//! and heart scenes draw only while the overlay is open and their phase is
//! visible.

use bitflags::bitflags;

bitflags! {
    /// Which scenes the current frame should draw
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DrawSet: u8 {
        /// The full-window particle backdrop
        const BACKDROP = 1 << 0;
        /// The cake panel
        const CAKE = 1 << 1;
        /// The heart panel
        const HEART = 1 << 2;
    }
}

/// The two narrative phases inside the overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Cake,
    Heart,
}

/// Visibility flags for the overlay and its phases
///
/// Toggled exclusively by the reveal sequencer and the close action.
#[derive(Clone, Copy, Debug)]
pub struct OverlayState {
    /// Whether the overlay container is shown at all
    pub open: bool,
    /// Whether the cake phase is visible
    pub cake_visible: bool,
    /// Whether the heart phase is visible
    pub heart_visible: bool,
    /// Cake phase opacity, animated 1 to 0 during the phase transition
    pub cake_opacity: f32,
    /// Heart phase opacity (stays 1.0; present so both phases animate alike)
    pub heart_opacity: f32,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayState {
    /// Closed overlay, both phases hidden, full opacity
    pub fn new() -> Self {
        Self {
            open: false,
            cake_visible: false,
            heart_visible: false,
            cake_opacity: 1.0,
            heart_opacity: 1.0,
        }
    }

    /// Set one phase's visibility
    pub fn set_phase_visible(&mut self, phase: Phase, visible: bool) {
        match phase {
            Phase::Cake => self.cake_visible = visible,
            Phase::Heart => self.heart_visible = visible,
        }
    }

    /// One phase's opacity
    pub fn opacity(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Cake => self.cake_opacity,
            Phase::Heart => self.heart_opacity,
        }
    }

    /// Mutable access to one phase's opacity (tween target)
    pub fn opacity_mut(&mut self, phase: Phase) -> &mut f32 {
        match phase {
            Phase::Cake => &mut self.cake_opacity,
            Phase::Heart => &mut self.heart_opacity,
        }
    }

    /// Hide the overlay; phases keep their flags for the next reveal to reset
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Which scenes a frame in this state draws
    pub fn draw_set(&self) -> DrawSet {
        let mut set = DrawSet::BACKDROP;
        if self.open && self.cake_visible {
            set |= DrawSet::CAKE;
        }
        if self.open && self.heart_visible {
            set |= DrawSet::HEART;
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_overlay_draws_backdrop_only() {
        let overlay = OverlayState::new();
        assert_eq!(overlay.draw_set(), DrawSet::BACKDROP);
    }

    #[test]
    fn test_open_with_cake_phase() {
        let mut overlay = OverlayState::new();
        overlay.open = true;
        overlay.cake_visible = true;
        assert_eq!(overlay.draw_set(), DrawSet::BACKDROP | DrawSet::CAKE);
    }

    #[test]
    fn test_hidden_phases_do_not_draw_when_open() {
        let mut overlay = OverlayState::new();
        overlay.open = true;
        assert_eq!(overlay.draw_set(), DrawSet::BACKDROP);
    }

    #[test]
    fn test_close_stops_both_panels_immediately() {
        let mut overlay = OverlayState::new();
        overlay.open = true;
        overlay.cake_visible = true;
        overlay.heart_visible = true;
        overlay.close();
        // Next frame draws neither panel even though phase flags remain set
        assert_eq!(overlay.draw_set(), DrawSet::BACKDROP);
    }

    #[test]
    fn test_opacity_accessors() {
        let mut overlay = OverlayState::new();
        *overlay.opacity_mut(Phase::Cake) = 0.25;
        assert_eq!(overlay.opacity(Phase::Cake), 0.25);
        assert_eq!(overlay.opacity(Phase::Heart), 1.0);
    }
}
