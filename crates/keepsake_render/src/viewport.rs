//! Viewport rects
//!
//! Each scene draws into a pixel rect within the one window: the backdrop
//! covers the whole window, the cake and heart share a centered panel rect.

/// A pixel-space rect within the window, y-down from the top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    /// An empty rect (a hidden panel's layout box)
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// The full window
    pub fn full_window(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }

    /// A centered rect covering the given fraction of the window per axis
    pub fn centered_fraction(width: u32, height: u32, fraction: f32) -> Self {
        let w = width as f32 * fraction;
        let h = height as f32 * fraction;
        Self {
            x: (width as f32 - w) / 2.0,
            y: (height as f32 - h) / 2.0,
            width: w,
            height: h,
        }
    }

    /// Whether the rect has no drawable area
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }

    /// Width over height; 1.0 for an empty rect
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width / self.height
        }
    }

    /// Integer scissor rect, clamped to the window
    pub fn scissor(&self, window_width: u32, window_height: u32) -> (u32, u32, u32, u32) {
        let x = (self.x.max(0.0) as u32).min(window_width);
        let y = (self.y.max(0.0) as u32).min(window_height);
        let w = (self.width as u32).min(window_width - x);
        let h = (self.height as u32).min(window_height - y);
        (x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_window_aspect() {
        let rect = ViewportRect::full_window(1280, 720);
        assert!((rect.aspect() - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn test_centered_fraction() {
        let rect = ViewportRect::centered_fraction(1000, 800, 0.5);
        assert_eq!(rect.x, 250.0);
        assert_eq!(rect.y, 200.0);
        assert_eq!(rect.width, 500.0);
        assert_eq!(rect.height, 400.0);
    }

    #[test]
    fn test_empty_rect_aspect_is_one() {
        assert_eq!(ViewportRect::ZERO.aspect(), 1.0);
        assert!(ViewportRect::ZERO.is_empty());
    }

    #[test]
    fn test_scissor_clamps_to_window() {
        let rect = ViewportRect {
            x: 100.0,
            y: 100.0,
            width: 2000.0,
            height: 2000.0,
        };
        let (x, y, w, h) = rect.scissor(640, 480);
        assert_eq!((x, y), (100, 100));
        assert_eq!((w, h), (540, 380));
    }
}
