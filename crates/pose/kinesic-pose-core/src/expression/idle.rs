//! Idle blink layer.
//!
//! Blinks are scheduled at random intervals from a seeded generator, so two
//! controllers with the same seed blink on the same frames. Each blink is a
//! short close-and-open curve on the combined blink channel, falling back to
//! the per-eye channels when the rig lacks it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use kinesic_api_core::{Expression, Rig};

use crate::config::BlinkConfig;
use crate::easing::{ease_in_quad, ease_out_quad};
use crate::expression::{ExpressionLayer, LayerContext};
use crate::outputs::{ControllerEvent, Outputs};

pub struct IdleLayer {
    enabled: bool,
    cfg: BlinkConfig,
    rng: Pcg32,
    /// Controller-clock second the next blink starts at.
    next_blink: f32,
    /// Set while a blink is in flight.
    blink_started: Option<f32>,
}

impl IdleLayer {
    pub fn new(cfg: BlinkConfig, seed: u64) -> Self {
        let mut layer = Self {
            enabled: true,
            cfg,
            rng: Pcg32::seed_from_u64(seed),
            next_blink: 0.0,
            blink_started: None,
        };
        layer.schedule_next(0.0);
        layer
    }

    fn schedule_next(&mut self, now: f32) {
        let span = (self.cfg.max_interval - self.cfg.min_interval).max(0.0);
        self.next_blink = now + self.cfg.min_interval + self.rng.gen::<f32>() * span;
    }

    /// Close-and-open weight for a blink progress in [0, 1].
    fn blink_weight(progress: f32) -> f32 {
        if progress < 0.5 {
            ease_in_quad(progress * 2.0)
        } else {
            1.0 - ease_out_quad((progress - 0.5) * 2.0)
        }
    }
}

impl ExpressionLayer for IdleLayer {
    fn name(&self) -> &str {
        "idle"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn update(&mut self, ctx: &LayerContext<'_>, rig: &mut dyn Rig, events: &mut Outputs) {
        let now = ctx.elapsed;
        if self.blink_started.is_none() && now >= self.next_blink {
            self.blink_started = Some(now);
            events.push_event(ControllerEvent::Blink);
        }

        let weight = match self.blink_started {
            Some(start) => {
                let progress = ((now - start) / self.cfg.duration.max(1e-3)).clamp(0.0, 1.0);
                if progress >= 1.0 {
                    self.blink_started = None;
                    self.schedule_next(now);
                }
                Self::blink_weight(progress)
            }
            None => 0.0,
        };

        if !rig.set_expression(Expression::Blink, weight) {
            rig.set_expression(Expression::BlinkLeft, weight);
            rig.set_expression(Expression::BlinkRight, weight);
        }
    }
}
