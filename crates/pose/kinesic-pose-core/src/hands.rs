//! Static hand poses.
//!
//! Hand gestures bypass the smoothing store: finger joints are written to
//! the rig in the frame the gesture is applied. A per-finger curl in [0, 1]
//! is distributed along the joint chain, heaviest at the knuckle, and an
//! optional spread splays the proximal joints apart.

use kinesic_api_core::{Bone, Finger, FingerSegment, Rig};

use crate::data::HandGesture;

const MAX_CURL: f32 = std::f32::consts::FRAC_PI_2;
const CURL_GAIN: f32 = 2.5;
const SPREAD_MAX: f32 = 0.25;

/// Chain weights root/middle/tip. The thumb carries more of its curl in the
/// middle joint than the other fingers do.
fn segment_weights(finger: Finger) -> [f32; 3] {
    match finger {
        Finger::Thumb => [0.3, 0.4, 0.3],
        _ => [0.5, 0.35, 0.15],
    }
}

/// Splay direction per finger, away from the middle finger.
fn splay_factor(finger: Finger) -> f32 {
    match finger {
        Finger::Thumb => 0.0,
        Finger::Index => 1.0,
        Finger::Middle => 0.2,
        Finger::Ring => -0.6,
        Finger::Little => -1.0,
    }
}

/// Writes the gesture's finger rotations for every selected hand. Curl and
/// spread values outside [0, 1] are clamped here, not rejected.
pub fn apply_hand_gesture(rig: &mut dyn Rig, gesture: &HandGesture) {
    let spread = gesture.spread.unwrap_or(0.0).clamp(0.0, 1.0);
    for &side in gesture.hand.sides() {
        for finger in Finger::ALL {
            let curl = gesture.curls.of(finger).clamp(0.0, 1.0);
            let weights = segment_weights(finger);
            for (segment, weight) in FingerSegment::ALL.into_iter().zip(weights) {
                let angle = curl * weight * MAX_CURL * CURL_GAIN;
                let rotation = if finger == Finger::Thumb {
                    // The thumb folds across the palm: mixed y/z, mirrored by side.
                    [0.0, side.sign() * angle * 0.3, side.sign() * angle * 0.7]
                } else {
                    let splay = if segment == FingerSegment::Root {
                        side.sign() * spread * splay_factor(finger) * SPREAD_MAX
                    } else {
                        0.0
                    };
                    [angle, 0.0, splay]
                };
                rig.set_bone_rotation(Bone::finger_joint(side, finger, segment), rotation);
            }
        }
    }
}
