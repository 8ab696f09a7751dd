//! Continuous procedural motion.
//!
//! Each tick the active motion is evaluated into a fresh set of rotation
//! offsets (degrees) and, for the root-driven kinds, a root-height target.
//! Offsets are pure functions of the motion clock and are re-applied on top
//! of the base pose every tick, so they can never accumulate into drift.

use std::f32::consts::{PI, TAU};

use kinesic_api_core::{Bone, BoneMap, Rig};

use crate::data::{BodyMotion, BodyMotionKind};
use crate::oscillator::{breathing_curve, head_micro_movement, organic_oscillation};
use crate::smoothing::smooth_damp;

const BOUNCE_SMOOTH_TIME: f32 = 0.08;
const FLOAT_SMOOTH_TIME: f32 = 0.3;

/// Root-height request: an offset from the rig's rest height plus the
/// smoothing to reach it (tight for bounce, lazy for float).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootTarget {
    pub height_offset: f32,
    pub smooth_time: f32,
}

/// One tick's worth of procedural motion.
#[derive(Debug, Clone, Default)]
pub struct MotionSample {
    /// bone -> additive [x, y, z] offset in degrees.
    pub offsets: BoneMap<[f32; 3]>,
    pub root: Option<RootTarget>,
}

/// Evaluates `motion` at motion-clock `time` (seconds since the motion was
/// set). Speed scales the clock, intensity scales every offset; a negative
/// speed reads as a stopped clock.
pub fn sample_motion(motion: &BodyMotion, time: f32) -> MotionSample {
    let t = time * motion.speed.max(0.0);
    let intensity = motion.intensity.clamp(0.0, 1.0);
    let amp = motion.params.amplitude * intensity;

    let mut sample = MotionSample::default();
    match motion.kind {
        BodyMotionKind::Breathing => {
            breathing_offsets(&mut sample.offsets, t, motion.params.bpm, amp);
        }
        BodyMotionKind::Sway => {
            sway_offsets(&mut sample.offsets, t, amp);
        }
        BodyMotionKind::Bounce => {
            sample.root = Some(RootTarget {
                height_offset: (t * TAU).sin().abs() * amp,
                smooth_time: BOUNCE_SMOOTH_TIME,
            });
        }
        BodyMotionKind::Float => {
            sample.root = Some(RootTarget {
                height_offset: (t * PI * 0.5).sin() * amp,
                smooth_time: FLOAT_SMOOTH_TIME,
            });
        }
        BodyMotionKind::Walk => {
            walk_offsets(
                &mut sample.offsets,
                t,
                motion.params.stride * intensity,
                motion.params.arm_swing * intensity,
            );
        }
        BodyMotionKind::Custom => {
            breathing_offsets(&mut sample.offsets, t, motion.params.bpm, amp * 0.6);
            sway_offsets(&mut sample.offsets, t * 0.7, amp * 0.3);
            let micro = head_micro_movement(t);
            add_offset(
                &mut sample.offsets,
                Bone::Head,
                [
                    micro.pitch * intensity,
                    micro.yaw * intensity,
                    micro.roll * intensity,
                ],
            );
        }
    }

    if let Some(allowed) = &motion.params.bones {
        sample.offsets.retain(|bone, _| allowed.contains(bone));
    }
    sample
}

fn add_offset(offsets: &mut BoneMap<[f32; 3]>, bone: Bone, delta: [f32; 3]) {
    let entry = offsets.entry(bone).or_insert([0.0; 3]);
    entry[0] += delta[0];
    entry[1] += delta[1];
    entry[2] += delta[2];
}

/// Chest/spine rise with a small shoulder counter-rotation, mirrored by side.
fn breathing_offsets(offsets: &mut BoneMap<[f32; 3]>, t: f32, bpm: f32, amp: f32) {
    let v = breathing_curve(t, bpm);
    add_offset(offsets, Bone::Chest, [v * amp * 0.4, 0.0, 0.0]);
    add_offset(offsets, Bone::Spine, [v * amp * 0.2, 0.0, 0.0]);
    add_offset(offsets, Bone::LeftShoulder, [-v * amp * 0.1, 0.0, v * amp * 0.15]);
    add_offset(
        offsets,
        Bone::RightShoulder,
        [-v * amp * 0.1, 0.0, -v * amp * 0.15],
    );
}

/// Slow lateral spine roll with the head lagging against it.
fn sway_offsets(offsets: &mut BoneMap<[f32; 3]>, t: f32, amp: f32) {
    let v = organic_oscillation(t, 0.15);
    add_offset(offsets, Bone::Spine, [0.0, 0.0, v * amp]);
    add_offset(offsets, Bone::Head, [0.0, v * amp * 0.2, v * amp * 0.3]);
}

/// Positive-only knee bend so knees never hyperextend backward.
fn knee_bend(phase: f32, stride: f32) -> f32 {
    phase.max(0.0) * stride * 0.8 + phase.max(0.0) * 0.5 * 20.0
}

/// In-place walk: opposite-phase legs, counter-swinging arms, torso yaw
/// counter-rotation and a double-frequency vertical bounce on hips and head.
fn walk_offsets(offsets: &mut BoneMap<[f32; 3]>, t: f32, stride: f32, arm_swing: f32) {
    let cycle = t * TAU;
    let phase_l = cycle.sin();
    let phase_r = (cycle + PI).sin();
    let bounce = (2.0 * cycle).sin().abs();

    add_offset(offsets, Bone::LeftUpperLeg, [phase_l * stride, 0.0, 0.0]);
    add_offset(offsets, Bone::RightUpperLeg, [phase_r * stride, 0.0, 0.0]);
    add_offset(offsets, Bone::LeftLowerLeg, [knee_bend(phase_l, stride), 0.0, 0.0]);
    add_offset(
        offsets,
        Bone::RightLowerLeg,
        [knee_bend(phase_r, stride), 0.0, 0.0],
    );

    add_offset(
        offsets,
        Bone::LeftUpperArm,
        [-phase_l * arm_swing * 0.6, 0.0, 0.0],
    );
    add_offset(
        offsets,
        Bone::RightUpperArm,
        [-phase_r * arm_swing * 0.6, 0.0, 0.0],
    );

    add_offset(
        offsets,
        Bone::Hips,
        [bounce * stride * 0.05, phase_l * stride * 0.15, 0.0],
    );
    add_offset(offsets, Bone::Spine, [0.0, -phase_l * stride * 0.10, 0.0]);
    add_offset(offsets, Bone::Chest, [0.0, -phase_l * stride * 0.08, 0.0]);
    add_offset(offsets, Bone::Neck, [0.0, phase_l * stride * 0.04, 0.0]);
    add_offset(offsets, Bone::Head, [bounce * stride * 0.03, 0.0, 0.0]);
}

/// Smoothed root-height channel. The rest height is captured at init; bounce
/// and float move around it and everything else settles back onto it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootState {
    pub base: f32,
    pub current: f32,
    pub velocity: f32,
}

impl RootState {
    pub fn init_from_rig(&mut self, rig: &dyn Rig) {
        self.base = rig.root_height();
        self.current = self.base;
        self.velocity = 0.0;
    }

    /// Smooth-damps the root toward `target` and writes it through.
    pub fn apply(&mut self, rig: &mut dyn Rig, target: Option<RootTarget>, dt: f32) {
        let (height, smooth_time) = match target {
            Some(root) => (self.base + root.height_offset, root.smooth_time),
            None => (self.base, FLOAT_SMOOTH_TIME),
        };
        self.current = smooth_damp(
            self.current,
            height,
            &mut self.velocity,
            smooth_time,
            f32::INFINITY,
            dt,
        );
        rig.set_root_height(self.current);
    }
}
