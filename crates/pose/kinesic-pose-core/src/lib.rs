//! Kinesic Pose Core (engine-agnostic)
//!
//! Procedural pose and expression layering for humanoid rigs: smoothed
//! per-bone state, timed pose transitions, keyframed body gestures,
//! continuous motions (breathing, sway, walk, ...), finger gestures and a
//! small expression-layer stack (blink, mouth, gesture hooks). Hosts adapt
//! a skeleton once via the `Rig` trait and step a `PoseController`.

pub mod bones;
pub mod config;
pub mod controller;
pub mod data;
pub mod easing;
pub mod expression;
pub mod gesture;
pub mod hands;
pub mod motion;
pub mod oscillator;
pub mod outputs;
pub mod smoothing;
pub mod stored;
pub mod transition;

// Re-exports for consumers (adapters)
pub use bones::{BoneState, BoneStore};
pub use config::{BlinkConfig, Config, MouthConfig};
pub use controller::{BoneDriver, FrameInput, PoseController};
pub use data::{
    BodyGesture, BodyMotion, BodyMotionKind, BodyMotionParams, FingerCurls, HandGesture,
    HandSelector, Keyframe, PosePreset,
};
pub use easing::Easing;
pub use expression::{ExpressionLayer, ExpressionStack, LayerContext};
pub use gesture::GesturePlayback;
pub use motion::{sample_motion, MotionSample, RootTarget};
pub use outputs::{ControllerEvent, Outputs};
pub use smoothing::{smooth_damp, smooth_damp_vec3, SpringParams, SpringState};
pub use stored::{
    parse_body_gesture_json, parse_body_motion_json, parse_hand_gesture_json,
    parse_pose_preset_json, StoredError,
};
pub use transition::PoseTransition;
pub use kinesic_api_core::{Bone, BoneMap, Expression, HandSide, Rig};
