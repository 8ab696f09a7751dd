//! In-memory rig double shared by the test suites.

use hashbrown::{HashMap, HashSet};

use kinesic_api_core::{Bone, BoneMap, Expression, Rig};

/// A recording `Rig`. Every bound write lands in a map the test can read
/// back. Every bone is bound at `[0, 0, 0]` unless unbound up front;
/// expression channels exist unless dropped, in which case only registered
/// morph targets accept writes.
#[derive(Debug, Clone, Default)]
pub struct FixtureRig {
    rotations: BoneMap<[f32; 3]>,
    unbound: HashSet<Bone>,
    expressions: HashMap<Expression, f32>,
    expressions_absent: bool,
    morphs: HashMap<String, f32>,
    known_morphs: HashSet<String>,
    root_height: f32,
}

impl FixtureRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a rest rotation (radians) so `init` snapshots something
    /// other than zero.
    pub fn set_rest(&mut self, bone: Bone, radians: [f32; 3]) {
        self.rotations.insert(bone, radians);
    }

    /// Removes `bone` from the skeleton; reads return `None` and writes
    /// are refused.
    pub fn unbind(&mut self, bone: Bone) {
        self.unbound.insert(bone);
        self.rotations.remove(&bone);
    }

    /// Drops every expression channel so writes must go through morphs.
    pub fn drop_expressions(&mut self) {
        self.expressions_absent = true;
    }

    /// Registers a raw morph target by name.
    pub fn add_morph(&mut self, name: &str) {
        self.known_morphs.insert(name.to_string());
    }

    pub fn rotation(&self, bone: Bone) -> Option<[f32; 3]> {
        self.bone_rotation(bone)
    }

    pub fn expression(&self, expression: Expression) -> Option<f32> {
        self.expressions.get(&expression).copied()
    }

    pub fn morph(&self, name: &str) -> Option<f32> {
        self.morphs.get(name).copied()
    }

    pub fn root(&self) -> f32 {
        self.root_height
    }
}

impl Rig for FixtureRig {
    fn bone_rotation(&self, bone: Bone) -> Option<[f32; 3]> {
        if self.unbound.contains(&bone) {
            return None;
        }
        Some(self.rotations.get(&bone).copied().unwrap_or([0.0; 3]))
    }

    fn set_bone_rotation(&mut self, bone: Bone, radians: [f32; 3]) -> bool {
        if self.unbound.contains(&bone) {
            return false;
        }
        self.rotations.insert(bone, radians);
        true
    }

    fn root_height(&self) -> f32 {
        self.root_height
    }

    fn set_root_height(&mut self, height: f32) {
        self.root_height = height;
    }

    fn set_expression(&mut self, expression: Expression, weight: f32) -> bool {
        if self.expressions_absent {
            return false;
        }
        self.expressions.insert(expression, weight);
        true
    }

    fn set_morph_target(&mut self, name: &str, weight: f32) -> bool {
        if !self.known_morphs.contains(name) {
            return false;
        }
        self.morphs.insert(name.to_string(), weight);
        true
    }
}
