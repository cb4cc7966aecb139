//! Easing curves applied to the facing-blend fraction.
//!
//! The facing blend advances a linear fraction every render tick; the curve
//! reshapes that fraction before the spherical interpolation so lock
//! transitions can start or end softly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing curve for the lock/unlock facing blend.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Easing {
    /// Linear fraction (no reshaping).
    #[default]
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Hermite smoothstep (slow start and end).
    SmoothStep,
    /// Cubic Bezier-style curve with two inner control values.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    Cubic {
        /// First inner control value.
        c1: f32,
        /// Second inner control value.
        c2: f32,
    },
}

impl Easing {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`.
    ///
    /// Every curve maps 0 to 0 and 1 to 1, so a completed blend always lands
    /// exactly on the target orientation.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::Cubic { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}
