//! Easing curves for counter animations.
//!
//! Counters move fast at first and settle onto the target.
//! Every curve reaches exactly 1.0 at t = 1.0 so nothing overshoots.

use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Quartic ease-out: `1 - (1 - t)^4`.
    #[default]
    QuarticOut,
    /// Exponential ease-out: `1 - 2^(-10t)`, snapped to 1 at the end.
    ExponentialOut,
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    ///
    /// Values outside the unit range are clamped first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,
            Self::QuarticOut => 1.0 - (1.0 - t).powi(4),
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
            Self::Instant => 1.0,
        }
    }
}
