//! Expression layers.
//!
//! Layers are small independent behaviors (blink, mouth, gesture hook) that
//! write expression channels each tick. They share the frame clock with the
//! skeletal pipeline but never touch bones. The stack dispatches in fixed
//! priority order; a disabled layer is skipped, never removed.

mod idle;
mod mouth;
mod trigger;

pub use idle::IdleLayer;
pub use mouth::MouthLayer;
pub use trigger::GestureTriggerLayer;

use kinesic_api_core::Rig;

use crate::outputs::Outputs;

/// Per-frame signals shared with every layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerContext<'a> {
    /// Normalized speech amplitude in [0, 1].
    pub amplitude: f32,
    /// Seconds since the previous update.
    pub delta: f32,
    /// Controller-clock seconds since init.
    pub elapsed: f32,
    /// Whether speech audio is playing this frame.
    pub is_playing: bool,
    /// Id of the body gesture currently playing, if any.
    pub gesture: Option<&'a str>,
}

/// One expression behavior.
pub trait ExpressionLayer {
    fn name(&self) -> &str;

    /// Dispatch order: lower runs earlier. Fixed at construction.
    fn priority(&self) -> i32;

    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn update(&mut self, ctx: &LayerContext<'_>, rig: &mut dyn Rig, events: &mut Outputs);
}

/// Priority-ordered layer list. Sorted on insert, not per tick; insertion
/// order breaks priority ties.
#[derive(Default)]
pub struct ExpressionStack {
    layers: Vec<Box<dyn ExpressionLayer>>,
}

impl ExpressionStack {
    pub fn insert(&mut self, layer: Box<dyn ExpressionLayer>) {
        self.layers.push(layer);
        self.layers.sort_by_key(|layer| layer.priority());
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Flips a layer by name. Returns false when no layer matches.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.layers.iter_mut().find(|layer| layer.name() == name) {
            Some(layer) => {
                layer.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, ctx: &LayerContext<'_>, rig: &mut dyn Rig, events: &mut Outputs) {
        for layer in &mut self.layers {
            if layer.enabled() {
                layer.update(ctx, rig, events);
            }
        }
    }
}
