//! Keyframed body-gesture playback.
//!
//! A gesture animates normalized keyframes over `duration_ms`, writing bone
//! targets through the same smoothing store as everything else. Completion
//! clears the playback; whatever pose system is active (transition, base
//! pose, continuous motion) takes the bones back on the next tick.

use hashbrown::HashSet;
use log::warn;

use kinesic_api_core::Bone;

use crate::bones::BoneStore;
use crate::data::{deg_to_rad3, BodyGesture, Keyframe};
use crate::easing::{ease_in_out_sine, lerp_vec3};

#[derive(Debug, Clone)]
pub struct GesturePlayback {
    gesture: BodyGesture,
    /// Controller-clock second the playback (re)started at.
    started_at: f32,
    /// Union of bones named by any keyframe; owned for the whole runtime.
    owned: HashSet<Bone>,
}

impl GesturePlayback {
    /// Begins playback at controller-clock `now`. A gesture with no
    /// keyframes is a no-op and yields `None`.
    pub fn start(gesture: BodyGesture, now: f32) -> Option<Self> {
        if gesture.keyframes.is_empty() {
            warn!("Gesture '{}' has no keyframes; skipping playback", gesture.id);
            return None;
        }
        let owned = gesture
            .keyframes
            .iter()
            .flat_map(|keyframe| keyframe.bones.keys().copied())
            .collect();
        Some(Self {
            gesture,
            started_at: now,
            owned,
        })
    }

    pub fn id(&self) -> &str {
        &self.gesture.id
    }

    /// Whether this playback is writing `bone`'s target.
    pub fn owns(&self, bone: Bone) -> bool {
        self.owned.contains(&bone)
    }

    /// Samples the gesture at controller-clock `now` into the store.
    /// Returns true when a non-looping gesture has completed; looping
    /// gestures restart at exactly progress 0 and never finish on their own.
    pub fn advance(&mut self, store: &mut BoneStore, now: f32) -> bool {
        let duration = self.gesture.duration_ms.max(1) as f32 / 1000.0;
        let mut progress = ((now - self.started_at) / duration).max(0.0);
        if progress >= 1.0 {
            if !self.gesture.looping {
                return true;
            }
            self.started_at = now;
            progress = 0.0;
        }

        let keyframes = &self.gesture.keyframes;
        let (i0, i1, local) = find_segment(keyframes, progress);
        let eased = ease_in_out_sine(local);
        let prev = &keyframes[i0];
        for (bone, to) in &keyframes[i1].bones {
            let from = prev.bones.get(bone).copied().unwrap_or([0.0; 3]);
            store.set_target(*bone, deg_to_rad3(lerp_vec3(from, *to, eased)));
        }
        false
    }
}

/// Bracketing keyframe pair for a normalized progress, with local t in the
/// segment. Out-of-range progress clamps to the first/last keyframe.
fn find_segment(keyframes: &[Keyframe], progress: f32) -> (usize, usize, f32) {
    let n = keyframes.len();
    if n == 1 || progress <= keyframes[0].time {
        return (0, 0, 0.0);
    }
    if progress >= keyframes[n - 1].time {
        return (n - 1, n - 1, 0.0);
    }
    for i in 0..n - 1 {
        let t0 = keyframes[i].time;
        let t1 = keyframes[i + 1].time;
        if progress >= t0 && progress < t1 {
            let span = t1 - t0;
            let local = if span > 0.0 { (progress - t0) / span } else { 0.0 };
            return (i, i + 1, local);
        }
    }
    (n - 1, n - 1, 0.0)
}
