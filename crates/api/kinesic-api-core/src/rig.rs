//! Rig capability trait.

use crate::{Bone, Expression};

/// Surface through which the engine reads and writes a concrete avatar
/// (a glTF node tree, a game-engine armature, a test double).
///
/// Rotations are XYZ euler angles in radians. A rig that lacks a bone or an
/// expression channel says so through `None`/`false`; callers treat absence
/// as data and drop the write.
pub trait Rig {
    /// Current local rotation of `bone`, or `None` when the rig does not
    /// bind it.
    fn bone_rotation(&self, bone: Bone) -> Option<[f32; 3]>;

    /// Writes a local rotation. Returns `false` when the bone is unbound.
    fn set_bone_rotation(&mut self, bone: Bone, radians: [f32; 3]) -> bool;

    fn has_bone(&self, bone: Bone) -> bool {
        self.bone_rotation(bone).is_some()
    }

    /// Vertical offset of the avatar root, in scene units.
    fn root_height(&self) -> f32 {
        0.0
    }

    /// Moves the avatar root vertically. Default: no root to move.
    fn set_root_height(&mut self, _height: f32) {}

    /// Sets an expression channel weight in [0, 1]. Returns `false` when the
    /// channel is absent.
    fn set_expression(&mut self, _expression: Expression, _weight: f32) -> bool {
        false
    }

    /// Sets a raw morph-target weight by name, for rigs that expose morphs
    /// but no expression channels. Returns `false` when no such morph exists.
    fn set_morph_target(&mut self, _name: &str, _weight: f32) -> bool {
        false
    }
}
