//! Closed humanoid bone vocabulary.
//!
//! Names follow the normalized humanoid naming avatar rigs expose
//! ("leftUpperArm", "rightThumbDistal", ...). The enum is closed on purpose:
//! a string either maps to a variant or it does not, and every lookup against
//! a concrete rig reports absence through `Option`/`bool` rather than failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bone-keyed map used across the engine and fixtures.
pub type BoneMap<T> = hashbrown::HashMap<Bone, T>;

/// Left/right selector for hands and mirrored joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Mirror sign: +1 for the left side, -1 for the right.
    pub fn sign(self) -> f32 {
        match self {
            HandSide::Left => 1.0,
            HandSide::Right => -1.0,
        }
    }
}

/// The five fingers of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Little,
    ];
}

/// Joint position along a finger chain, knuckle to tip.
///
/// The thumb names its chain metacarpal/proximal/distal while the other
/// fingers use proximal/intermediate/distal; this enum abstracts over both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FingerSegment {
    Root,
    Mid,
    Tip,
}

impl FingerSegment {
    pub const ALL: [FingerSegment; 3] = [
        FingerSegment::Root,
        FingerSegment::Mid,
        FingerSegment::Tip,
    ];
}

/// Every humanoid bone the engine can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bone {
    Hips,
    Spine,
    Chest,
    Neck,
    Head,
    LeftShoulder,
    RightShoulder,
    LeftUpperArm,
    RightUpperArm,
    LeftLowerArm,
    RightLowerArm,
    LeftHand,
    RightHand,
    LeftUpperLeg,
    RightUpperLeg,
    LeftLowerLeg,
    RightLowerLeg,
    LeftFoot,
    RightFoot,
    LeftThumbMetacarpal,
    LeftThumbProximal,
    LeftThumbDistal,
    LeftIndexProximal,
    LeftIndexIntermediate,
    LeftIndexDistal,
    LeftMiddleProximal,
    LeftMiddleIntermediate,
    LeftMiddleDistal,
    LeftRingProximal,
    LeftRingIntermediate,
    LeftRingDistal,
    LeftLittleProximal,
    LeftLittleIntermediate,
    LeftLittleDistal,
    RightThumbMetacarpal,
    RightThumbProximal,
    RightThumbDistal,
    RightIndexProximal,
    RightIndexIntermediate,
    RightIndexDistal,
    RightMiddleProximal,
    RightMiddleIntermediate,
    RightMiddleDistal,
    RightRingProximal,
    RightRingIntermediate,
    RightRingDistal,
    RightLittleProximal,
    RightLittleIntermediate,
    RightLittleDistal,
}

impl Bone {
    /// Body bones the skeletal pipeline tracks and smooths every frame.
    /// Finger joints are written directly and are not part of this set.
    pub const TRACKED: [Bone; 19] = [
        Bone::Hips,
        Bone::Spine,
        Bone::Chest,
        Bone::Neck,
        Bone::Head,
        Bone::LeftShoulder,
        Bone::RightShoulder,
        Bone::LeftUpperArm,
        Bone::RightUpperArm,
        Bone::LeftLowerArm,
        Bone::RightLowerArm,
        Bone::LeftHand,
        Bone::RightHand,
        Bone::LeftUpperLeg,
        Bone::RightUpperLeg,
        Bone::LeftLowerLeg,
        Bone::RightLowerLeg,
        Bone::LeftFoot,
        Bone::RightFoot,
    ];

    pub const ALL: [Bone; 49] = [
        Bone::Hips,
        Bone::Spine,
        Bone::Chest,
        Bone::Neck,
        Bone::Head,
        Bone::LeftShoulder,
        Bone::RightShoulder,
        Bone::LeftUpperArm,
        Bone::RightUpperArm,
        Bone::LeftLowerArm,
        Bone::RightLowerArm,
        Bone::LeftHand,
        Bone::RightHand,
        Bone::LeftUpperLeg,
        Bone::RightUpperLeg,
        Bone::LeftLowerLeg,
        Bone::RightLowerLeg,
        Bone::LeftFoot,
        Bone::RightFoot,
        Bone::LeftThumbMetacarpal,
        Bone::LeftThumbProximal,
        Bone::LeftThumbDistal,
        Bone::LeftIndexProximal,
        Bone::LeftIndexIntermediate,
        Bone::LeftIndexDistal,
        Bone::LeftMiddleProximal,
        Bone::LeftMiddleIntermediate,
        Bone::LeftMiddleDistal,
        Bone::LeftRingProximal,
        Bone::LeftRingIntermediate,
        Bone::LeftRingDistal,
        Bone::LeftLittleProximal,
        Bone::LeftLittleIntermediate,
        Bone::LeftLittleDistal,
        Bone::RightThumbMetacarpal,
        Bone::RightThumbProximal,
        Bone::RightThumbDistal,
        Bone::RightIndexProximal,
        Bone::RightIndexIntermediate,
        Bone::RightIndexDistal,
        Bone::RightMiddleProximal,
        Bone::RightMiddleIntermediate,
        Bone::RightMiddleDistal,
        Bone::RightRingProximal,
        Bone::RightRingIntermediate,
        Bone::RightRingDistal,
        Bone::RightLittleProximal,
        Bone::RightLittleIntermediate,
        Bone::RightLittleDistal,
    ];

    /// Normalized humanoid name, identical to the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Bone::Hips => "hips",
            Bone::Spine => "spine",
            Bone::Chest => "chest",
            Bone::Neck => "neck",
            Bone::Head => "head",
            Bone::LeftShoulder => "leftShoulder",
            Bone::RightShoulder => "rightShoulder",
            Bone::LeftUpperArm => "leftUpperArm",
            Bone::RightUpperArm => "rightUpperArm",
            Bone::LeftLowerArm => "leftLowerArm",
            Bone::RightLowerArm => "rightLowerArm",
            Bone::LeftHand => "leftHand",
            Bone::RightHand => "rightHand",
            Bone::LeftUpperLeg => "leftUpperLeg",
            Bone::RightUpperLeg => "rightUpperLeg",
            Bone::LeftLowerLeg => "leftLowerLeg",
            Bone::RightLowerLeg => "rightLowerLeg",
            Bone::LeftFoot => "leftFoot",
            Bone::RightFoot => "rightFoot",
            Bone::LeftThumbMetacarpal => "leftThumbMetacarpal",
            Bone::LeftThumbProximal => "leftThumbProximal",
            Bone::LeftThumbDistal => "leftThumbDistal",
            Bone::LeftIndexProximal => "leftIndexProximal",
            Bone::LeftIndexIntermediate => "leftIndexIntermediate",
            Bone::LeftIndexDistal => "leftIndexDistal",
            Bone::LeftMiddleProximal => "leftMiddleProximal",
            Bone::LeftMiddleIntermediate => "leftMiddleIntermediate",
            Bone::LeftMiddleDistal => "leftMiddleDistal",
            Bone::LeftRingProximal => "leftRingProximal",
            Bone::LeftRingIntermediate => "leftRingIntermediate",
            Bone::LeftRingDistal => "leftRingDistal",
            Bone::LeftLittleProximal => "leftLittleProximal",
            Bone::LeftLittleIntermediate => "leftLittleIntermediate",
            Bone::LeftLittleDistal => "leftLittleDistal",
            Bone::RightThumbMetacarpal => "rightThumbMetacarpal",
            Bone::RightThumbProximal => "rightThumbProximal",
            Bone::RightThumbDistal => "rightThumbDistal",
            Bone::RightIndexProximal => "rightIndexProximal",
            Bone::RightIndexIntermediate => "rightIndexIntermediate",
            Bone::RightIndexDistal => "rightIndexDistal",
            Bone::RightMiddleProximal => "rightMiddleProximal",
            Bone::RightMiddleIntermediate => "rightMiddleIntermediate",
            Bone::RightMiddleDistal => "rightMiddleDistal",
            Bone::RightRingProximal => "rightRingProximal",
            Bone::RightRingIntermediate => "rightRingIntermediate",
            Bone::RightRingDistal => "rightRingDistal",
            Bone::RightLittleProximal => "rightLittleProximal",
            Bone::RightLittleIntermediate => "rightLittleIntermediate",
            Bone::RightLittleDistal => "rightLittleDistal",
        }
    }

    /// Whether this bone belongs to a hand's finger chain.
    pub fn is_finger(self) -> bool {
        !Self::TRACKED.contains(&self)
    }

    /// Which side of the body the bone sits on, if it is mirrored.
    pub fn side(self) -> Option<HandSide> {
        let name = self.name();
        if name.starts_with("left") {
            Some(HandSide::Left)
        } else if name.starts_with("right") {
            Some(HandSide::Right)
        } else {
            None
        }
    }

    /// The joint bone for a (side, finger, segment) triple.
    pub fn finger_joint(side: HandSide, finger: Finger, segment: FingerSegment) -> Bone {
        use {Finger::*, FingerSegment::*, HandSide::*};
        match (side, finger, segment) {
            (Left, Thumb, Root) => Bone::LeftThumbMetacarpal,
            (Left, Thumb, Mid) => Bone::LeftThumbProximal,
            (Left, Thumb, Tip) => Bone::LeftThumbDistal,
            (Left, Index, Root) => Bone::LeftIndexProximal,
            (Left, Index, Mid) => Bone::LeftIndexIntermediate,
            (Left, Index, Tip) => Bone::LeftIndexDistal,
            (Left, Middle, Root) => Bone::LeftMiddleProximal,
            (Left, Middle, Mid) => Bone::LeftMiddleIntermediate,
            (Left, Middle, Tip) => Bone::LeftMiddleDistal,
            (Left, Ring, Root) => Bone::LeftRingProximal,
            (Left, Ring, Mid) => Bone::LeftRingIntermediate,
            (Left, Ring, Tip) => Bone::LeftRingDistal,
            (Left, Little, Root) => Bone::LeftLittleProximal,
            (Left, Little, Mid) => Bone::LeftLittleIntermediate,
            (Left, Little, Tip) => Bone::LeftLittleDistal,
            (Right, Thumb, Root) => Bone::RightThumbMetacarpal,
            (Right, Thumb, Mid) => Bone::RightThumbProximal,
            (Right, Thumb, Tip) => Bone::RightThumbDistal,
            (Right, Index, Root) => Bone::RightIndexProximal,
            (Right, Index, Mid) => Bone::RightIndexIntermediate,
            (Right, Index, Tip) => Bone::RightIndexDistal,
            (Right, Middle, Root) => Bone::RightMiddleProximal,
            (Right, Middle, Mid) => Bone::RightMiddleIntermediate,
            (Right, Middle, Tip) => Bone::RightMiddleDistal,
            (Right, Ring, Root) => Bone::RightRingProximal,
            (Right, Ring, Mid) => Bone::RightRingIntermediate,
            (Right, Ring, Tip) => Bone::RightRingDistal,
            (Right, Little, Root) => Bone::RightLittleProximal,
            (Right, Little, Mid) => Bone::RightLittleIntermediate,
            (Right, Little, Tip) => Bone::RightLittleDistal,
        }
    }
}

impl fmt::Display for Bone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized humanoid bone name: {0:?}")]
pub struct ParseBoneError(pub String);

impl FromStr for Bone {
    type Err = ParseBoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bone::ALL
            .iter()
            .copied()
            .find(|bone| bone.name() == s)
            .ok_or_else(|| ParseBoneError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should keep serde names and `name()` in agreement
    #[test]
    fn serde_names_match() {
        for bone in Bone::ALL {
            let json = serde_json::to_string(&bone).unwrap();
            assert_eq!(json, format!("{:?}", bone.name()));
            let back: Bone = serde_json::from_str(&json).unwrap();
            assert_eq!(back, bone);
        }
    }

    /// it should split the vocabulary into tracked body bones and fingers
    #[test]
    fn tracked_and_fingers_partition() {
        let fingers = Bone::ALL.iter().filter(|b| b.is_finger()).count();
        assert_eq!(fingers, 30);
        assert_eq!(Bone::TRACKED.len() + fingers, Bone::ALL.len());
        assert!(Bone::LeftThumbDistal.is_finger());
        assert!(!Bone::Chest.is_finger());
    }

    /// it should use metacarpal naming for the thumb root only
    #[test]
    fn thumb_chain_naming() {
        use {Finger::*, FingerSegment::*, HandSide::*};
        assert_eq!(
            Bone::finger_joint(Right, Thumb, Root),
            Bone::RightThumbMetacarpal
        );
        assert_eq!(
            Bone::finger_joint(Right, Index, Root),
            Bone::RightIndexProximal
        );
        assert_eq!(
            Bone::finger_joint(Left, Little, Mid),
            Bone::LeftLittleIntermediate
        );
    }

    /// it should parse normalized names and reject unknown ones
    #[test]
    fn parse_round_trip() {
        assert_eq!("leftUpperArm".parse::<Bone>(), Ok(Bone::LeftUpperArm));
        assert_eq!(Bone::Hips.side(), None);
        assert_eq!(Bone::RightRingDistal.side(), Some(HandSide::Right));
        assert!("LeftUpperArm".parse::<Bone>().is_err());
    }
}
