//! Easing curves
//!
//! Named interpolation shapes mapping normalized time (0..1) to normalized
//! progress. These are the classic Penner curves; `BounceOut` and
//! `ElasticOut` use the standard constants, `ElasticOut` with amplitude 1
//! and period 0.5.

use std::f32::consts::TAU;

/// A named easing curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// No shaping
    Linear,
    /// Cubic deceleration
    Power2Out,
    /// Decaying bounces settling at the target
    BounceOut,
    /// Overshooting spring settling at the target
    ElasticOut,
}

impl Easing {
    /// Map normalized time to normalized progress
    ///
    /// Input outside 0..1 is clamped, so every curve maps 0 to 0 and 1 to 1
    /// exactly.
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::Power2Out => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::BounceOut => bounce_out(t),
            Easing::ElasticOut => elastic_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

fn elastic_out(t: f32) -> f32 {
    const PERIOD: f32 = 0.5;
    const S: f32 = PERIOD / 4.0;

    (2.0f32).powf(-10.0 * t) * ((t - S) * TAU / PERIOD).sin() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_all_curves_hit_endpoints() {
        for curve in [
            Easing::Linear,
            Easing::Power2Out,
            Easing::BounceOut,
            Easing::ElasticOut,
        ] {
            assert_eq!(curve.apply(0.0), 0.0, "{:?} at 0", curve);
            assert_eq!(curve.apply(1.0), 1.0, "{:?} at 1", curve);
        }
    }

    #[test]
    fn test_clamps_outside_range() {
        assert_eq!(Easing::BounceOut.apply(-0.5), 0.0);
        assert_eq!(Easing::ElasticOut.apply(1.5), 1.0);
    }

    #[test]
    fn test_linear_is_identity() {
        assert!((Easing::Linear.apply(0.37) - 0.37).abs() < EPSILON);
    }

    #[test]
    fn test_power2_out_decelerates() {
        // An out curve covers more than half the distance by the midpoint
        assert!(Easing::Power2Out.apply(0.5) > 0.5);
        // 1 - 0.5^3 = 0.875
        assert!((Easing::Power2Out.apply(0.5) - 0.875).abs() < EPSILON);
    }

    #[test]
    fn test_bounce_out_first_segment() {
        // Below 1/2.75 the curve is the plain parabola 7.5625 t^2
        let t = 0.2;
        assert!((Easing::BounceOut.apply(t) - 7.5625 * t * t).abs() < EPSILON);
    }

    #[test]
    fn test_bounce_out_stays_in_range() {
        for i in 1..100 {
            let v = Easing::BounceOut.apply(i as f32 / 100.0);
            assert!((0.0..=1.0).contains(&v), "bounce({}) = {}", i, v);
        }
    }

    #[test]
    fn test_elastic_out_overshoots() {
        // The spring swings past 1.0 early in the motion
        let mut max = 0.0f32;
        for i in 1..100 {
            max = max.max(Easing::ElasticOut.apply(i as f32 / 100.0));
        }
        assert!(max > 1.0, "elastic never overshot (max {})", max);
    }

    #[test]
    fn test_elastic_out_settles() {
        // Late in the motion the oscillation has decayed close to 1.0
        let v = Easing::ElasticOut.apply(0.95);
        assert!((v - 1.0).abs() < 0.01, "elastic(0.95) = {}", v);
    }
}
