//! Audio-amplitude driven mouth layer.
//!
//! Per frame: threshold-normalize the amplitude, scale and clamp it into a
//! target, smooth toward it (faster when opening, slower when falling into
//! silence), then shape the result so small openings read clearly without
//! the top end snapping.

use kinesic_api_core::Rig;

use crate::config::MouthConfig;
use crate::easing::{ease_in_quad, ease_out_quad};
use crate::expression::{ExpressionLayer, LayerContext};
use crate::outputs::Outputs;
use crate::smoothing::smooth_damp;

/// Decay rate of the peak envelope, per second.
const PEAK_DECAY: f32 = 4.0;

pub struct MouthLayer {
    enabled: bool,
    cfg: MouthConfig,
    weight: f32,
    velocity: f32,
    peak: f32,
}

impl MouthLayer {
    pub fn new(cfg: MouthConfig) -> Self {
        Self {
            enabled: true,
            cfg,
            weight: 0.0,
            velocity: 0.0,
            peak: 0.0,
        }
    }

    /// Decaying amplitude peak, kept for attack shaping.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Two-segment response: fast out of the closed position, accelerating
    /// into the open one.
    fn shape(weight: f32) -> f32 {
        if weight < 0.5 {
            ease_out_quad(weight * 2.0) * 0.5
        } else {
            0.5 + ease_in_quad((weight - 0.5) * 2.0) * 0.5
        }
    }
}

impl ExpressionLayer for MouthLayer {
    fn name(&self) -> &str {
        "mouth"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn update(&mut self, ctx: &LayerContext<'_>, rig: &mut dyn Rig, _events: &mut Outputs) {
        let cfg = self.cfg;
        let mut target = 0.0;
        if ctx.is_playing && ctx.amplitude > cfg.threshold {
            let normalized =
                ((ctx.amplitude - cfg.threshold) / (1.0 - cfg.threshold).max(1e-3)).clamp(0.0, 1.0);
            target = (normalized.powf(0.8) * cfg.sensitivity).min(cfg.max_open);
        }

        self.peak = target.max(self.peak * (-PEAK_DECAY * ctx.delta).exp());

        let smooth_time = if target > self.weight {
            cfg.smooth_time * 0.5
        } else if !ctx.is_playing || target <= 0.0 {
            cfg.smooth_time * 1.5
        } else {
            cfg.smooth_time
        };
        self.weight = smooth_damp(
            self.weight,
            target,
            &mut self.velocity,
            smooth_time,
            f32::INFINITY,
            ctx.delta,
        );

        let shaped = Self::shape(self.weight.clamp(0.0, 1.0));
        if !rig.set_expression(cfg.expression, shaped) {
            // Raw morph fallback for rigs without expression channels.
            for alias in cfg.expression.morph_aliases() {
                if rig.set_morph_target(alias, shaped) {
                    break;
                }
            }
        }
    }
}
