//! Gesture-trigger passthrough layer.
//!
//! Records which body gesture is active so facial behaviors can key off
//! gesture timing. Writes nothing to the rig yet; it exists so the hook
//! point sits at a fixed, highest-priority slot in the stack.

use log::debug;

use kinesic_api_core::Rig;

use crate::expression::{ExpressionLayer, LayerContext};
use crate::outputs::Outputs;

#[derive(Default)]
pub struct GestureTriggerLayer {
    disabled: bool,
    last: Option<String>,
}

impl GestureTriggerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent gesture id seen, retained after the gesture ends.
    pub fn last_gesture(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl ExpressionLayer for GestureTriggerLayer {
    fn name(&self) -> &str {
        "gestureTrigger"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn enabled(&self) -> bool {
        !self.disabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    fn update(&mut self, ctx: &LayerContext<'_>, _rig: &mut dyn Rig, _events: &mut Outputs) {
        if let Some(gesture) = ctx.gesture {
            if self.last.as_deref() != Some(gesture) {
                debug!("expression hook: gesture '{gesture}' active");
                self.last = Some(gesture.to_string());
            }
        }
    }
}
