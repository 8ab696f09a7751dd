//! Stored-library JSON parsing.
//!
//! Each library item (pose preset, hand gesture, body gesture, body motion)
//! lives in its own JSON document keyed by normalized humanoid bone names.
//!
//! Notes:
//! - Rotations stay in degrees here; radian conversion happens at the rig
//!   boundary.
//! - Parsing is strict (an unknown bone name is an error) while the runtime
//!   stays fail-soft; bad documents are rejected before they reach the
//!   controller.
//! - Non-positive rates (gesture duration, breathing bpm) are sanitized to
//!   small positive values after validation.

use thiserror::Error;

use crate::data::{BodyGesture, BodyMotion, HandGesture, PosePreset};

#[derive(Debug, Error)]
pub enum StoredError {
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

pub fn parse_pose_preset_json(s: &str) -> Result<PosePreset, StoredError> {
    let preset: PosePreset = serde_json::from_str(s)?;
    preset.validate_basic().map_err(StoredError::Invalid)?;
    Ok(preset)
}

pub fn parse_hand_gesture_json(s: &str) -> Result<HandGesture, StoredError> {
    let gesture: HandGesture = serde_json::from_str(s)?;
    gesture.validate_basic().map_err(StoredError::Invalid)?;
    Ok(gesture)
}

pub fn parse_body_gesture_json(s: &str) -> Result<BodyGesture, StoredError> {
    let mut gesture: BodyGesture = serde_json::from_str(s)?;
    gesture.validate_basic().map_err(StoredError::Invalid)?;
    gesture.sanitize();
    Ok(gesture)
}

pub fn parse_body_motion_json(s: &str) -> Result<BodyMotion, StoredError> {
    let mut motion: BodyMotion = serde_json::from_str(s)?;
    motion.validate_basic().map_err(StoredError::Invalid)?;
    motion.sanitize();
    Ok(motion)
}
