//! Canonical pose, gesture and motion data model.
//!
//! Rotations in data files are XYZ euler angles in DEGREES, the unit humans
//! author in; the engine converts to radians at the rig boundary.

use serde::{Deserialize, Serialize};

use kinesic_api_core::{Bone, BoneMap, Finger, HandSide};

fn default_scale() -> f32 {
    1.0
}

/// Degrees to radians for a rotation triple.
#[inline]
pub fn deg_to_rad3(deg: [f32; 3]) -> [f32; 3] {
    [deg[0].to_radians(), deg[1].to_radians(), deg[2].to_radians()]
}

/// Radians to degrees for a rotation triple.
#[inline]
pub fn rad_to_deg3(rad: [f32; 3]) -> [f32; 3] {
    [rad[0].to_degrees(), rad[1].to_degrees(), rad[2].to_degrees()]
}

/// A named full or partial body pose. Bones absent from the map keep
/// whatever target they already had.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PosePreset {
    pub id: String,
    pub name: String,
    /// bone -> [x, y, z] degrees.
    pub bones: BoneMap<[f32; 3]>,
}

impl PosePreset {
    /// Validate basic invariants (finite rotations).
    pub fn validate_basic(&self) -> Result<(), String> {
        for (bone, rotation) in &self.bones {
            if rotation.iter().any(|v| !v.is_finite()) {
                return Err(format!("Pose '{}' has a non-finite rotation for '{bone}'", self.id));
            }
        }
        Ok(())
    }
}

/// Curl amount per finger, 0 (straight) to 1 (fully curled). Values outside
/// the range are clamped at application time.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FingerCurls {
    pub thumb: f32,
    pub index: f32,
    pub middle: f32,
    pub ring: f32,
    pub pinky: f32,
}

impl FingerCurls {
    pub fn uniform(curl: f32) -> Self {
        Self {
            thumb: curl,
            index: curl,
            middle: curl,
            ring: curl,
            pinky: curl,
        }
    }

    pub fn of(&self, finger: Finger) -> f32 {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Little => self.pinky,
        }
    }
}

/// Which hand(s) a gesture drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandSelector {
    Left,
    Right,
    Both,
}

impl HandSelector {
    pub fn sides(self) -> &'static [HandSide] {
        match self {
            HandSelector::Left => &[HandSide::Left],
            HandSelector::Right => &[HandSide::Right],
            HandSelector::Both => &[HandSide::Left, HandSide::Right],
        }
    }
}

/// A static hand shape applied in a single frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HandGesture {
    pub id: String,
    pub name: String,
    pub hand: HandSelector,
    pub curls: FingerCurls,
    /// Finger splay, 0..1. Omitted means none.
    #[serde(default)]
    pub spread: Option<f32>,
}

impl HandGesture {
    pub fn validate_basic(&self) -> Result<(), String> {
        let curls = [
            self.curls.thumb,
            self.curls.index,
            self.curls.middle,
            self.curls.ring,
            self.curls.pinky,
        ];
        if curls.iter().any(|v| !v.is_finite()) {
            return Err(format!("Hand gesture '{}' has a non-finite curl", self.id));
        }
        if let Some(spread) = self.spread {
            if !spread.is_finite() {
                return Err(format!("Hand gesture '{}' has a non-finite spread", self.id));
            }
        }
        Ok(())
    }
}

/// One gesture keyframe at normalized time in [0, 1].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Normalized time in [0,1] within the gesture duration.
    pub time: f32,
    /// bone -> [x, y, z] degrees.
    pub bones: BoneMap<[f32; 3]>,
}

/// A timed, keyframed body animation (wave, nod, shrug, ...).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyGesture {
    pub id: String,
    pub name: String,
    /// Duration in milliseconds (authoritative for mapping normalized times to seconds).
    #[serde(rename = "duration")]
    pub duration_ms: u32,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    pub keyframes: Vec<Keyframe>,
}

impl BodyGesture {
    /// Validate basic invariants (monotonic keyframe times in [0,1], finite rotations).
    pub fn validate_basic(&self) -> Result<(), String> {
        let mut last = -f32::INFINITY;
        for keyframe in &self.keyframes {
            if !keyframe.time.is_finite() || keyframe.time < 0.0 || keyframe.time > 1.0 {
                return Err(format!(
                    "Keyframe times must be in [0,1] and finite for '{}'",
                    self.id
                ));
            }
            if keyframe.time < last {
                return Err(format!(
                    "Keyframe times must be non-decreasing for '{}'",
                    self.id
                ));
            }
            last = keyframe.time;
            for (bone, rotation) in &keyframe.bones {
                if rotation.iter().any(|v| !v.is_finite()) {
                    return Err(format!(
                        "Gesture '{}' has a non-finite rotation for '{bone}'",
                        self.id
                    ));
                }
            }
        }
        Ok(())
    }

    /// Floors a zero duration to one millisecond so cycle math never divides
    /// by zero.
    pub fn sanitize(&mut self) {
        self.duration_ms = self.duration_ms.max(1);
    }
}

/// The continuous motion families the generator understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyMotionKind {
    Breathing,
    Sway,
    Bounce,
    Float,
    Walk,
    /// Layered natural idle: breathing + sway + head micro-movement.
    Custom,
}

/// Per-kind tuning knobs. Unused fields are ignored by kinds that do not
/// read them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyMotionParams {
    /// Offset amplitude: degrees for rotation motions, scene units for the
    /// root-height motions (bounce, float).
    pub amplitude: f32,
    /// Breaths per minute (breathing, custom).
    pub bpm: f32,
    /// Leg swing in degrees (walk).
    pub stride: f32,
    /// Arm swing in degrees (walk).
    pub arm_swing: f32,
    /// Optional restriction: rotation offsets only reach these bones.
    pub bones: Option<Vec<Bone>>,
}

impl Default for BodyMotionParams {
    fn default() -> Self {
        Self {
            amplitude: 2.0,
            bpm: 14.0,
            stride: 20.0,
            arm_swing: 30.0,
            bones: None,
        }
    }
}

/// A continuous, non-terminating motion descriptor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyMotion {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BodyMotionKind,
    /// Time multiplier on the motion clock.
    #[serde(default = "default_scale")]
    pub speed: f32,
    /// Overall strength, clamped to [0, 1] at evaluation.
    #[serde(default = "default_scale")]
    pub intensity: f32,
    #[serde(default)]
    pub params: BodyMotionParams,
}

impl BodyMotion {
    pub fn validate_basic(&self) -> Result<(), String> {
        let values = [
            self.speed,
            self.intensity,
            self.params.amplitude,
            self.params.bpm,
            self.params.stride,
            self.params.arm_swing,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(format!("Motion '{}' has a non-finite parameter", self.id));
        }
        Ok(())
    }

    /// Floors non-positive rates to small positive defaults so cycle math
    /// never divides by zero.
    pub fn sanitize(&mut self) {
        if self.params.bpm <= 0.0 {
            self.params.bpm = 0.1;
        }
        if self.speed < 0.0 {
            self.speed = 0.0;
        }
    }
}
