/// Easing curves used by the scene's keyframes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// CSS `ease-out`, approximated by a cubic.
    OutCubic,
    /// CSS `ease-in-out`, approximated by a quadratic.
    InOutQuad,
}

impl Ease {
    /// Apply to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }
}

/// 0 -> 1 -> 0 over one period, eased in and out. Drives the looping pulses.
pub fn ping_pong(elapsed_ms: f64, period_ms: f64) -> f64 {
    if period_ms <= 0.0 {
        return 0.0;
    }
    let phase = elapsed_ms.rem_euclid(period_ms) / period_ms;
    Ease::InOutQuad.apply(1.0 - (2.0 * phase - 1.0).abs())
}
