//! Timed pose transitions.
//!
//! A transition captures where the touched bones are NOW (smoothed currents,
//! not previous targets) and eases them onto the merged destination pose.
//! Re-posing mid-flight therefore never snaps back through stale values: the
//! replacement transition starts from wherever the bones actually are.

use kinesic_api_core::{Bone, BoneMap};

use crate::bones::BoneStore;
use crate::data::deg_to_rad3;
use crate::easing::{lerp_vec3, Easing};

#[derive(Debug, Clone)]
pub struct PoseTransition {
    /// Id of the preset that started this transition.
    preset: String,
    /// Degrees, captured at start.
    from: BoneMap<[f32; 3]>,
    /// Degrees, the merged destination pose.
    to: BoneMap<[f32; 3]>,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl PoseTransition {
    pub fn new(
        preset: impl Into<String>,
        from: BoneMap<[f32; 3]>,
        to: BoneMap<[f32; 3]>,
        duration: f32,
        easing: Easing,
    ) -> Self {
        Self {
            preset: preset.into(),
            from,
            to,
            duration: duration.max(1e-3),
            elapsed: 0.0,
            easing,
        }
    }

    pub fn preset(&self) -> &str {
        &self.preset
    }

    /// Whether this transition is writing `bone`'s target.
    pub fn owns(&self, bone: Bone) -> bool {
        self.to.contains_key(&bone)
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).min(1.0)
    }

    /// Advances the clock and rewrites targets for every destination bone.
    /// Returns true once the transition has completed; the final tick writes
    /// the destination exactly.
    pub fn advance(&mut self, store: &mut BoneStore, dt: f32) -> bool {
        self.elapsed += dt;
        let progress = self.progress();
        let eased = self.easing.apply(progress);
        for (bone, to) in &self.to {
            let from = self.from.get(bone).copied().unwrap_or([0.0; 3]);
            store.set_target(*bone, deg_to_rad3(lerp_vec3(from, *to, eased)));
        }
        progress >= 1.0
    }
}
