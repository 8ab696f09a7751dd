//! Per-bone smoothing state.
//!
//! Every tracked body bone carries a current/target/velocity triple in
//! radians. Targets are rewritten freely by transitions, gestures and
//! continuous motion; currents only ever move through the critically damped
//! smoother, so rig writes stay continuous no matter how targets jump.

use hashbrown::HashMap;
use log::debug;

use kinesic_api_core::{Bone, Rig};

use crate::smoothing::smooth_damp_vec3;

/// Smoothing state for one bone, radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoneState {
    pub current: [f32; 3],
    pub target: [f32; 3],
    pub velocity: [f32; 3],
}

impl BoneState {
    fn at(rotation: [f32; 3]) -> Self {
        Self {
            current: rotation,
            target: rotation,
            velocity: [0.0; 3],
        }
    }
}

/// The tracked-bone set with its smoothing state. Bones the rig does not
/// bind are tracked anyway (the state math runs); their writes are dropped
/// at the rig boundary.
#[derive(Debug, Default)]
pub struct BoneStore {
    states: HashMap<Bone, BoneState>,
}

impl BoneStore {
    /// Snapshots the rig's rotations as both current and target for every
    /// tracked bone, with zero velocity. Unbound bones start at zero.
    pub fn init_from_rig(&mut self, rig: &dyn Rig) {
        self.states.clear();
        let mut bound = 0usize;
        for bone in Bone::TRACKED {
            let rotation = match rig.bone_rotation(bone) {
                Some(rotation) => {
                    bound += 1;
                    rotation
                }
                None => [0.0; 3],
            };
            self.states.insert(bone, BoneState::at(rotation));
        }
        debug!(
            "init: tracking {} bones ({} bound by the rig)",
            self.states.len(),
            bound
        );
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, bone: Bone) -> Option<&BoneState> {
        self.states.get(&bone)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Bone, &BoneState)> {
        self.states.iter()
    }

    /// Rewrites a bone's target. Untracked bones are ignored.
    pub fn set_target(&mut self, bone: Bone, radians: [f32; 3]) {
        if let Some(state) = self.states.get_mut(&bone) {
            state.target = radians;
        }
    }

    /// Advances every bone's current toward its target and writes the result
    /// through to the rig. Unbound bones keep their state but the write is
    /// dropped.
    pub fn apply(&mut self, rig: &mut dyn Rig, smooth_time: f32, dt: f32) {
        for (bone, state) in self.states.iter_mut() {
            state.current = smooth_damp_vec3(
                state.current,
                state.target,
                &mut state.velocity,
                smooth_time,
                f32::INFINITY,
                dt,
            );
            rig.set_bone_rotation(*bone, state.current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binds only the chest.
    struct ChestRig {
        rotation: [f32; 3],
    }

    impl Rig for ChestRig {
        fn bone_rotation(&self, bone: Bone) -> Option<[f32; 3]> {
            (bone == Bone::Chest).then_some(self.rotation)
        }

        fn set_bone_rotation(&mut self, bone: Bone, radians: [f32; 3]) -> bool {
            if bone == Bone::Chest {
                self.rotation = radians;
                true
            } else {
                false
            }
        }
    }

    /// it should seed state from the rig and zero-fill unbound bones
    #[test]
    fn init_snapshots_the_rig() {
        let rig = ChestRig {
            rotation: [0.1, 0.2, 0.3],
        };
        let mut store = BoneStore::default();
        store.init_from_rig(&rig);

        let chest = store.state(Bone::Chest).unwrap();
        assert_eq!(chest.current, [0.1, 0.2, 0.3]);
        assert_eq!(chest.target, [0.1, 0.2, 0.3]);

        let head = store.state(Bone::Head).unwrap();
        assert_eq!(head.current, [0.0; 3]);
        assert_eq!(store.state(Bone::LeftThumbDistal), None);
    }

    /// it should converge currents onto targets without overshoot
    #[test]
    fn apply_converges() {
        let mut rig = ChestRig { rotation: [0.0; 3] };
        let mut store = BoneStore::default();
        store.init_from_rig(&rig);
        store.set_target(Bone::Chest, [1.0, 0.0, -1.0]);

        let mut previous = 0.0f32;
        for _ in 0..120 {
            store.apply(&mut rig, 0.15, 1.0 / 60.0);
            let x = store.state(Bone::Chest).unwrap().current[0];
            assert!(x >= previous && x <= 1.0);
            previous = x;
        }
        assert!((rig.rotation[0] - 1.0).abs() < 1e-3);
        assert!((rig.rotation[2] + 1.0).abs() < 1e-3);
    }
}
