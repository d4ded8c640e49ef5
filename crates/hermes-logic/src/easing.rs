//! Easing curves for travel animation.
//!
//! Pure math, no clock. The travel scene eases the ship token with
//! [`Easing::QuintInOut`]; the others exist for tooling and tests.

/// Easing function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Strong slow start.
    QuintIn,
    /// Strong slow end.
    QuintOut,
    /// Strong slow start and end.
    #[default]
    QuintInOut,
}

impl Easing {
    /// Apply the curve to a normalized time value `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuintIn => t * t * t * t * t,
            Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
            Easing::QuintInOut => {
                if t < 0.5 {
                    16.0 * t * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::QuintIn,
            Easing::QuintOut,
            Easing::QuintInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(Easing::QuintInOut.apply(-0.5), 0.0);
        assert_eq!(Easing::QuintInOut.apply(1.5), 1.0);
    }

    #[test]
    fn test_quint_in_out_midpoint() {
        // Symmetric curve crosses the midpoint exactly
        let mid = Easing::QuintInOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-6, "got {}", mid);
    }

    #[test]
    fn test_quint_in_out_slow_ends() {
        // Slower than linear near the start, faster past the middle
        assert!(Easing::QuintInOut.apply(0.1) < 0.1);
        assert!(Easing::QuintInOut.apply(0.9) > 0.9);
    }

    #[test]
    fn test_quint_in_out_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = Easing::QuintInOut.apply(i as f32 / 100.0);
            assert!(v >= prev, "dip at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
