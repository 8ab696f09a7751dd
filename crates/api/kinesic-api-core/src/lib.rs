//! kinesic-api-core: shared humanoid vocabulary & rig capability (core, engine-agnostic)

pub mod bone;
pub mod expression;
pub mod rig;

pub use bone::{Bone, BoneMap, Finger, FingerSegment, HandSide, ParseBoneError};
pub use expression::{Expression, ParseExpressionError};
pub use rig::Rig;
