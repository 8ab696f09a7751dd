//! PoseController: data ownership and public API (init → apply/play/set → update).
//!
//! Methods:
//! - new, init, dispose
//! - apply_pose / apply_pose_with, apply_hand_gesture
//! - play_body_gesture, stop_body_gesture, set_body_motion
//! - update (transition → gesture → motion → smoothing → root → layers)
//! - current_pose and the other inspection accessors

use log::debug;
use serde::{Deserialize, Serialize};

use kinesic_api_core::{Bone, BoneMap, Rig};

use crate::bones::BoneStore;
use crate::config::Config;
use crate::data::{deg_to_rad3, rad_to_deg3, BodyGesture, BodyMotion, HandGesture, PosePreset};
use crate::easing::Easing;
use crate::expression::{
    ExpressionStack, GestureTriggerLayer, IdleLayer, LayerContext, MouthLayer,
};
use crate::gesture::GesturePlayback;
use crate::hands;
use crate::motion::{sample_motion, MotionSample, RootState};
use crate::outputs::{ControllerEvent, Outputs};
use crate::transition::PoseTransition;

/// Per-frame external signals, refreshed by the caller before each update.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameInput {
    /// Normalized speech amplitude in [0, 1].
    pub amplitude: f32,
    /// Whether speech audio is playing this frame.
    pub is_playing: bool,
}

/// Which system owns a bone's target this tick. `None` means the bone is
/// idle: base pose plus continuous motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoneDriver {
    Transition,
    Gesture,
}

pub struct PoseController {
    // Owned data
    cfg: Config,
    bones: BoneStore,
    /// Canonical pose in degrees, covering every tracked bone once
    /// initialized. Targets return here when nothing else drives a bone.
    base_pose: BoneMap<[f32; 3]>,

    // Active systems
    transition: Option<PoseTransition>,
    gesture: Option<GesturePlayback>,
    motion: Option<BodyMotion>,
    layers: ExpressionStack,
    root: RootState,

    // Clocks
    elapsed: f32,
    motion_elapsed: f32,

    initialized: bool,

    // Per-tick outputs; `pending` buffers events raised by API calls made
    // between updates so the next tick delivers them.
    outputs: Outputs,
    pending: Vec<ControllerEvent>,
}

impl PoseController {
    /// Create a new controller with the given config. Nothing moves until
    /// `init` has read a rig.
    pub fn new(cfg: Config) -> Self {
        let mut layers = ExpressionStack::default();
        layers.insert(Box::new(IdleLayer::new(cfg.blink, cfg.seed)));
        layers.insert(Box::new(MouthLayer::new(cfg.mouth)));
        layers.insert(Box::new(GestureTriggerLayer::new()));
        Self {
            cfg,
            bones: BoneStore::default(),
            base_pose: BoneMap::default(),
            transition: None,
            gesture: None,
            motion: None,
            layers,
            root: RootState::default(),
            elapsed: 0.0,
            motion_elapsed: 0.0,
            initialized: false,
            outputs: Outputs::default(),
            pending: Vec::new(),
        }
    }

    /// Reads the rig's rest state: every tracked bone's rotation becomes its
    /// current, target and base-pose value. Calling again re-reads.
    pub fn init(&mut self, rig: &dyn Rig) {
        self.bones.init_from_rig(rig);
        self.root.init_from_rig(rig);
        self.base_pose = self
            .bones
            .iter()
            .map(|(bone, state)| (*bone, rad_to_deg3(state.current)))
            .collect();
        self.transition = None;
        self.gesture = None;
        self.motion = None;
        self.elapsed = 0.0;
        self.motion_elapsed = 0.0;
        self.initialized = true;
        self.outputs.clear();
        self.pending.clear();
    }

    /// Stops everything and releases per-bone state. Idempotent; `update`
    /// becomes a no-op until the next `init`.
    pub fn dispose(&mut self) {
        self.bones.clear();
        self.base_pose.clear();
        self.transition = None;
        self.gesture = None;
        self.motion = None;
        self.elapsed = 0.0;
        self.motion_elapsed = 0.0;
        self.initialized = false;
        self.outputs.clear();
        self.pending.clear();
        debug!("controller disposed");
    }

    /// Starts a timed transition into `preset` with the configured timing.
    pub fn apply_pose(&mut self, preset: &PosePreset) {
        self.apply_pose_with(preset, self.cfg.transition_duration, self.cfg.transition_easing);
    }

    /// Starts a timed transition into `preset`. The base pose absorbs the
    /// preset immediately; the transition carries the smoothed currents onto
    /// it. Re-posing mid-transition starts from wherever bones are now.
    pub fn apply_pose_with(&mut self, preset: &PosePreset, duration: f32, easing: Easing) {
        if !self.initialized {
            return;
        }
        for (bone, rotation) in &preset.bones {
            self.base_pose.insert(*bone, *rotation);
        }
        let to = self.base_pose.clone();
        let from = to
            .keys()
            .map(|bone| {
                let current = self
                    .bones
                    .state(*bone)
                    .map(|state| rad_to_deg3(state.current))
                    .unwrap_or([0.0; 3]);
                (*bone, current)
            })
            .collect();
        debug!("pose '{}' applied over {duration}s", preset.id);
        self.pending.push(ControllerEvent::TransitionStarted {
            preset: preset.id.clone(),
        });
        self.transition =
            Some(PoseTransition::new(preset.id.as_str(), from, to, duration, easing));
    }

    /// Writes a hand gesture's finger joints to the rig immediately; finger
    /// joints do not pass through the smoothing store.
    pub fn apply_hand_gesture(&mut self, rig: &mut dyn Rig, gesture: &HandGesture) {
        hands::apply_hand_gesture(rig, gesture);
        debug!("hand gesture '{}' applied", gesture.id);
    }

    /// Starts (or restarts) a body gesture; a playing gesture is replaced.
    /// A gesture with no keyframes is skipped.
    pub fn play_body_gesture(&mut self, gesture: &BodyGesture) {
        if !self.initialized {
            return;
        }
        if let Some(playback) = GesturePlayback::start(gesture.clone(), self.elapsed) {
            debug!(
                "gesture '{}' started ({} ms{})",
                gesture.id,
                gesture.duration_ms,
                if gesture.looping { ", looping" } else { "" }
            );
            self.pending.push(ControllerEvent::GestureStarted {
                gesture: gesture.id.clone(),
            });
            self.gesture = Some(playback);
        }
    }

    /// Stops the active gesture, if any; its bones ease back to the base
    /// pose from the next tick.
    pub fn stop_body_gesture(&mut self) {
        if let Some(playback) = self.gesture.take() {
            debug!("gesture '{}' stopped", playback.id());
            self.pending.push(ControllerEvent::GestureStopped {
                gesture: playback.id().to_string(),
            });
        }
    }

    /// Sets or clears the continuous motion. The motion clock restarts, so
    /// every motion begins at phase zero.
    pub fn set_body_motion(&mut self, motion: Option<&BodyMotion>) {
        if !self.initialized {
            return;
        }
        match motion {
            Some(motion) => debug!("motion '{}' set", motion.id),
            None => debug!("motion cleared"),
        }
        self.pending.push(ControllerEvent::MotionChanged {
            motion: motion.map(|m| m.id.clone()),
        });
        self.motion = motion.cloned();
        self.motion_elapsed = 0.0;
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn active_gesture(&self) -> Option<&str> {
        self.gesture.as_ref().map(|playback| playback.id())
    }

    pub fn active_motion(&self) -> Option<&str> {
        self.motion.as_ref().map(|motion| motion.id.as_str())
    }

    /// The canonical base pose in degrees.
    pub fn base_pose(&self) -> &BoneMap<[f32; 3]> {
        &self.base_pose
    }

    /// Which system owns `bone`'s target this tick. Gestures take precedence
    /// over transitions on the bones they share.
    pub fn bone_driver(&self, bone: Bone) -> Option<BoneDriver> {
        if self.gesture.as_ref().is_some_and(|g| g.owns(bone)) {
            return Some(BoneDriver::Gesture);
        }
        if self.transition.as_ref().is_some_and(|t| t.owns(bone)) {
            return Some(BoneDriver::Transition);
        }
        None
    }

    /// Smoothed current pose, bone -> degrees.
    pub fn current_pose(&self) -> BoneMap<[f32; 3]> {
        self.bones
            .iter()
            .map(|(bone, state)| (*bone, rad_to_deg3(state.current)))
            .collect()
    }

    /// Flips an expression layer by name ("idle", "mouth", "gestureTrigger").
    pub fn set_layer_enabled(&mut self, name: &str, enabled: bool) -> bool {
        self.layers.set_enabled(name, enabled)
    }

    /// Step the simulation by dt with this frame's signals, producing the
    /// tick's events. A controller that is not initialized does nothing.
    pub fn update(&mut self, rig: &mut dyn Rig, dt: f32, input: &FrameInput) -> &Outputs {
        self.outputs.clear();
        if !self.initialized {
            return &self.outputs;
        }
        // Negative deltas advance nothing but the apply step still runs.
        let dt = dt.max(0.0);
        self.outputs.events.append(&mut self.pending);
        self.elapsed += dt;

        // 1) Pose transition writes its eased targets.
        if let Some(transition) = self.transition.as_mut() {
            if transition.advance(&mut self.bones, dt) {
                let preset = transition.preset().to_string();
                debug!("transition to '{preset}' completed");
                self.outputs
                    .push_event(ControllerEvent::TransitionCompleted { preset });
                self.transition = None;
            }
        }

        // 2) Gesture playback overrides its bones while it runs.
        if let Some(playback) = self.gesture.as_mut() {
            if playback.advance(&mut self.bones, self.elapsed) {
                let gesture = playback.id().to_string();
                debug!("gesture '{gesture}' finished");
                self.outputs
                    .push_event(ControllerEvent::GestureFinished { gesture });
                self.gesture = None;
            }
        }

        // 3) Continuous motion: base pose plus fresh offsets for every bone
        //    nobody owns. Offsets never accumulate; they are recomputed from
        //    the base pose each tick.
        let sample = match &self.motion {
            Some(motion) => {
                self.motion_elapsed += dt;
                sample_motion(motion, self.motion_elapsed)
            }
            None => MotionSample::default(),
        };
        for (bone, base) in &self.base_pose {
            if self.bone_driver(*bone).is_some() {
                continue;
            }
            let offset = sample.offsets.get(bone).copied().unwrap_or([0.0; 3]);
            let target = [base[0] + offset[0], base[1] + offset[1], base[2] + offset[2]];
            self.bones.set_target(*bone, deg_to_rad3(target));
        }

        // 4) Advance smoothing and write the skeleton.
        self.bones.apply(rig, self.cfg.bone_smooth_time, dt);

        // 5) Root height channel.
        self.root.apply(rig, sample.root, dt);

        // 6) Expression layers share the same clock.
        let ctx = LayerContext {
            amplitude: input.amplitude.clamp(0.0, 1.0),
            delta: dt,
            elapsed: self.elapsed,
            is_playing: input.is_playing,
            gesture: self.gesture.as_ref().map(|playback| playback.id()),
        };
        self.layers.update(&ctx, rig, &mut self.outputs);

        &self.outputs
    }
}
