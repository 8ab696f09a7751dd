//! Controller configuration.

use serde::{Deserialize, Serialize};

use kinesic_api_core::Expression;

use crate::easing::Easing;

/// Tunables for the whole controller. Defaults match the shipped avatar
/// profile; every field can also come in from a JSON config document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Seconds each bone axis takes to settle on its target.
    pub bone_smooth_time: f32,
    /// Pose transition timing used by `apply_pose`.
    pub transition_duration: f32,
    pub transition_easing: Easing,
    pub blink: BlinkConfig,
    pub mouth: MouthConfig,
    /// Seed for the blink scheduler. Same seed, same blink pattern.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bone_smooth_time: 0.15,
            transition_duration: 0.4,
            transition_easing: Easing::EaseInOutCubic,
            blink: BlinkConfig::default(),
            mouth: MouthConfig::default(),
            seed: 0,
        }
    }
}

/// Idle blink scheduling. Intervals are drawn uniformly per blink.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlinkConfig {
    pub min_interval: f32,
    pub max_interval: f32,
    /// Full close-and-open time, seconds.
    pub duration: f32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            min_interval: 2.0,
            max_interval: 6.0,
            duration: 0.15,
        }
    }
}

/// Audio-amplitude driven mouth channel.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MouthConfig {
    /// Expression channel the mouth weight is written to.
    pub expression: Expression,
    /// Gain applied after threshold normalization.
    pub sensitivity: f32,
    /// Baseline smoothing time; opening runs at half of it, closing into
    /// silence at 1.5x.
    pub smooth_time: f32,
    /// Amplitudes at or below this read as silence.
    pub threshold: f32,
    /// Upper clamp on the final mouth weight.
    pub max_open: f32,
}

impl Default for MouthConfig {
    fn default() -> Self {
        Self {
            expression: Expression::Aa,
            sensitivity: 1.5,
            smooth_time: 0.08,
            threshold: 0.02,
            max_open: 1.0,
        }
    }
}
