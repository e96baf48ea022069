//! Shared animation clock
//!
//! One clock exists per process, started at init and never reset. Everything
//! timed (procedural motion, tweens, sequencer steps) derives from its
//! elapsed seconds, so a frame's transforms are a pure function of one time
//! sample.

use std::time::Instant;

/// Monotonic elapsed-time counter
pub struct Clock {
    start: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Start the clock now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock started
    pub fn elapsed_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_elapsed_is_monotonic() {
        let clock = Clock::new();
        let a = clock.elapsed_seconds();
        std::thread::sleep(Duration::from_millis(10));
        let b = clock.elapsed_seconds();
        assert!(b > a);
    }

    #[test]
    fn test_starts_near_zero() {
        let clock = Clock::new();
        assert!(clock.elapsed_seconds() < 0.5);
    }
}
