//! Easing curves applied between adjacent keyframes.
//!
//! Every curve maps `t ∈ [0, 1]` with `f(0) = 0` and `f(1) = 1`.
//! [`EasingMethod::EaseInOutBack`] leaves `[0, 1]` in between on purpose to
//! produce an overshoot.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;

const BACK_C1: f32 = 1.701_58;
const BACK_C2: f32 = BACK_C1 * 1.525;

/// The blending curve used from one keyframe to the next.
///
/// The curve stored on the *earlier* key of a segment is the one applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EasingMethod {
    #[default]
    Linear,
    EaseInOutSine,
    EaseInOutQuart,
    EaseInOutBack,
}

impl EasingMethod {
    /// All methods, in editor dropdown order.
    pub const ALL: [EasingMethod; 4] = [
        EasingMethod::Linear,
        EasingMethod::EaseInOutSine,
        EasingMethod::EaseInOutQuart,
        EasingMethod::EaseInOutBack,
    ];

    /// Maps a dropdown index back to a method.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this method in [`EasingMethod::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Linear => 0,
            Self::EaseInOutSine => 1,
            Self::EaseInOutQuart => 2,
            Self::EaseInOutBack => 3,
        }
    }

    /// Display name for editor widgets.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "Lerp",
            Self::EaseInOutSine => "EaseInOutSine",
            Self::EaseInOutQuart => "EaseInOutQuart",
            Self::EaseInOutBack => "EaseInOutBack",
        }
    }

    /// Evaluates the curve at `t`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            // Evaluated in f64 so that f(1) lands on exactly 1.0.
            Self::EaseInOutSine => (-((PI * f64::from(t)).cos() - 1.0) / 2.0) as f32,
            Self::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Self::EaseInOutBack => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (2.0 * t - 2.0) + BACK_C2) + 2.0)
                        / 2.0
                }
            }
        }
    }

    /// Blends `start → end` along this curve.
    #[must_use]
    pub fn ease<T: Interpolatable>(self, start: T, end: T, t: f32) -> T {
        T::interpolate_linear(start, end, self.apply(t))
    }
}

impl std::fmt::Display for EasingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
