//! Oscillators for lifelike continuous motion:
//! - `organic_oscillation`: a sine with detuned harmonics, so repetition
//!   stays below notice
//! - `breathing_curve`: asymmetric inhale/exhale cycle
//! - `head_micro_movement`: slow drift on three head axes

use std::f32::consts::TAU;

/// Sum of a primary sine at `base_freq` (Hz) and two weak detuned harmonics
/// (1.5x at 0.2, 0.7x at 0.15), normalized back into roughly [-1, 1].
#[inline]
pub fn organic_oscillation(t: f32, base_freq: f32) -> f32 {
    let w = TAU * base_freq * t;
    ((w).sin() + 0.2 * (w * 1.5).sin() + 0.15 * (w * 0.7).sin()) / 1.35
}

/// Breathing cycle in [0, 1] at `bpm` breaths per minute: a 40% inhale
/// easing out into the peak, then a 60% exhale easing back to zero.
pub fn breathing_curve(t: f32, bpm: f32) -> f32 {
    if bpm <= 0.0 {
        return 0.0;
    }
    let period = 60.0 / bpm;
    let phase = (t / period).rem_euclid(1.0);
    if phase < 0.4 {
        crate::easing::ease_out_sine(phase / 0.4)
    } else {
        1.0 - crate::easing::ease_in_sine((phase - 0.4) / 0.6)
    }
}

/// Per-axis head drift, each value in roughly [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MicroMovement {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// Sub-perceptual head drift built from organic oscillations at distinct
/// low frequencies, so the three axes never visibly sync up.
pub fn head_micro_movement(t: f32) -> MicroMovement {
    MicroMovement {
        yaw: organic_oscillation(t, 0.07) * 0.6 + organic_oscillation(t, 0.13) * 0.4,
        pitch: organic_oscillation(t, 0.05) * 0.7 + organic_oscillation(t, 0.17) * 0.3,
        roll: organic_oscillation(t, 0.09) * 0.5 + organic_oscillation(t, 0.15) * 0.2,
    }
}
