//! Smoothing primitives:
//! - `smooth_damp`: critically damped tracking with persistent velocity,
//!   max-speed clamp and overshoot clamp
//! - `SpringState`: explicit damped spring advanced by semi-implicit Euler

use serde::{Deserialize, Serialize};

/// Moves `current` toward `target` over roughly `smooth_time` seconds.
///
/// Closed-form critically damped smoothing: omega = 2 / smooth_time, with the
/// exponential approximated by 1 / (1 + x + 0.48x^2 + 0.235x^3). The velocity
/// state persists across calls and belongs to the caller. Never overshoots:
/// when a step would cross the target, the output is clamped to it and the
/// velocity recomputed.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    let smooth_time = smooth_time.max(1e-4);
    if dt <= 0.0 {
        return current;
    }
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let original_to = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (original_to - current > 0.0) == (output > original_to) {
        output = original_to;
        *velocity = (output - original_to) / dt;
    }
    output
}

/// Component-wise `smooth_damp` over a vec3 with a vec3 velocity state.
pub fn smooth_damp_vec3(
    current: [f32; 3],
    target: [f32; 3],
    velocity: &mut [f32; 3],
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> [f32; 3] {
    [
        smooth_damp(
            current[0],
            target[0],
            &mut velocity[0],
            smooth_time,
            max_speed,
            dt,
        ),
        smooth_damp(
            current[1],
            target[1],
            &mut velocity[1],
            smooth_time,
            max_speed,
            dt,
        ),
        smooth_damp(
            current[2],
            target[2],
            &mut velocity[2],
            smooth_time,
            max_speed,
            dt,
        ),
    ]
}

/// Spring coefficients. Damping is absolute, not a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 120.0,
            damping: 14.0,
            mass: 1.0,
        }
    }
}

/// Position/velocity pair driven toward a target by a damped spring.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringState {
    pub position: f32,
    pub velocity: f32,
}

impl SpringState {
    pub fn new(position: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    /// One semi-implicit Euler step toward `target`; returns the new position.
    pub fn integrate(&mut self, target: f32, params: &SpringParams, dt: f32) -> f32 {
        let mass = params.mass.max(1e-4);
        let accel =
            (-params.stiffness * (self.position - target) - params.damping * self.velocity) / mass;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
        self.position
    }
}
