//! Output contracts from the controller.
//!
//! Bone and expression writes go straight to the rig, so outputs carry only
//! the semantic events of the tick. Hosts transport or log them; nothing in
//! the engine depends on them being consumed.

use serde::{Deserialize, Serialize};

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ControllerEvent {
    TransitionStarted { preset: String },
    TransitionCompleted { preset: String },
    GestureStarted { gesture: String },
    GestureFinished { gesture: String },
    GestureStopped { gesture: String },
    MotionChanged { motion: Option<String> },
    Blink,
}

/// Outputs returned by PoseController::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<ControllerEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: ControllerEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
