// extensions/easing.rs
//
// Easing curves used by the transition tweens. Pure math.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    QuadOut,
    QuadInOut,
    /// Overshoot then settle.
    BackOut,
}

impl Easing {
    /// Map normalized time `t` in [0, 1] to eased progress.
    /// BackOut overshoots past 1.0 before settling.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

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

    const ALL: [Easing; 4] = [Easing::Linear, Easing::QuadOut, Easing::QuadInOut, Easing::BackOut];

    #[test]
    fn every_curve_hits_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-5, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{:?} at 1", easing);
        }
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100).map(|i| Easing::BackOut.apply(i as f32 / 100.0)).fold(0.0_f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::QuadOut.apply(-1.0), 0.0);
        assert_eq!(Easing::QuadOut.apply(2.0), 1.0);
    }

    #[test]
    fn ease_interpolates() {
        assert!((ease(0.7, 0.0, 0.5, Easing::Linear) - 0.35).abs() < 1e-6);
    }
}
