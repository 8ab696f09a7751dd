use std::collections::HashMap;

use kinesic_pose_core::expression::{GestureTriggerLayer, IdleLayer, MouthLayer};
use kinesic_pose_core::{
    BlinkConfig, Bone, Expression, ExpressionLayer, ExpressionStack, LayerContext, MouthConfig,
    Outputs, Rig,
};
use kinesic_test_fixtures::FixtureRig;

const DT: f32 = 1.0 / 60.0;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn ctx_at(elapsed: f32, amplitude: f32, is_playing: bool) -> LayerContext<'static> {
    LayerContext {
        amplitude,
        delta: DT,
        elapsed,
        is_playing,
        gesture: None,
    }
}

/// it should open the mouth monotonically while speech holds steady
#[test]
fn mouth_opens_monotonically() {
    let mut layer = MouthLayer::new(MouthConfig::default());
    let mut rig = FixtureRig::new();
    let mut outputs = Outputs::default();

    let mut last = 0.0f32;
    for i in 0..60 {
        let ctx = ctx_at(i as f32 * DT, 0.5, true);
        layer.update(&ctx, &mut rig, &mut outputs);
        let weight = rig.expression(Expression::Aa).unwrap();
        assert!(weight >= last - 1e-6, "mouth dipped: {weight} < {last}");
        assert!(weight <= 1.0);
        last = weight;
    }
    assert!(last > 0.5, "mouth only reached {last}");
}

/// it should ease the mouth shut when the audio stops
#[test]
fn mouth_closes_into_silence() {
    let mut layer = MouthLayer::new(MouthConfig::default());
    let mut rig = FixtureRig::new();
    let mut outputs = Outputs::default();

    for i in 0..30 {
        layer.update(&ctx_at(i as f32 * DT, 0.6, true), &mut rig, &mut outputs);
    }
    assert!(rig.expression(Expression::Aa).unwrap() > 0.3);

    for i in 30..120 {
        layer.update(&ctx_at(i as f32 * DT, 0.0, false), &mut rig, &mut outputs);
    }
    assert!(rig.expression(Expression::Aa).unwrap() < 0.01);
}

/// it should treat amplitudes at or below the threshold as silence
#[test]
fn mouth_ignores_sub_threshold_amplitude() {
    let mut layer = MouthLayer::new(MouthConfig::default());
    let mut rig = FixtureRig::new();
    let mut outputs = Outputs::default();

    for i in 0..30 {
        layer.update(&ctx_at(i as f32 * DT, 0.01, true), &mut rig, &mut outputs);
    }
    approx(rig.expression(Expression::Aa).unwrap(), 0.0, 0.0);
}

/// it should fall back to raw morph targets on rigs without channels
#[test]
fn mouth_falls_back_to_morph_targets() {
    let mut layer = MouthLayer::new(MouthConfig::default());
    let mut rig = FixtureRig::new();
    rig.drop_expressions();
    rig.add_morph("mouthOpen");
    let mut outputs = Outputs::default();

    for i in 0..30 {
        layer.update(&ctx_at(i as f32 * DT, 0.6, true), &mut rig, &mut outputs);
    }
    assert_eq!(rig.expression(Expression::Aa), None);
    assert!(rig.morph("mouthOpen").unwrap() > 0.2);
}

/// it should track the amplitude peak and let it decay through silence
#[test]
fn peak_envelope_decays_in_silence() {
    let mut layer = MouthLayer::new(MouthConfig::default());
    let mut rig = FixtureRig::new();
    let mut outputs = Outputs::default();

    for i in 0..30 {
        layer.update(&ctx_at(i as f32 * DT, 0.6, true), &mut rig, &mut outputs);
    }
    let spoken = layer.peak();
    assert!(spoken > 0.9, "peak never caught the target, got {spoken}");

    // A second and a half of silence leaves only a trace of the peak.
    for i in 30..120 {
        layer.update(&ctx_at(i as f32 * DT, 0.0, false), &mut rig, &mut outputs);
    }
    assert!(layer.peak() < spoken * 0.01);
    assert!(layer.peak() > 0.0);
}

/// it should blink on the same frames for the same seed
#[test]
fn blinks_are_deterministic_per_seed() {
    let mut a = IdleLayer::new(BlinkConfig::default(), 42);
    let mut b = IdleLayer::new(BlinkConfig::default(), 42);
    let mut rig_a = FixtureRig::new();
    let mut rig_b = FixtureRig::new();

    let mut blinks = 0;
    for i in 0..600 {
        let ctx = ctx_at(i as f32 * DT, 0.0, false);
        let mut out_a = Outputs::default();
        let mut out_b = Outputs::default();
        a.update(&ctx, &mut rig_a, &mut out_a);
        b.update(&ctx, &mut rig_b, &mut out_b);
        assert_eq!(
            rig_a.expression(Expression::Blink),
            rig_b.expression(Expression::Blink)
        );
        assert_eq!(out_a.events, out_b.events);
        blinks += out_a.events.len();
    }
    assert!(blinks >= 1, "no blink in ten seconds");
}

/// it should schedule the first blink inside the configured interval
#[test]
fn blink_respects_min_interval() {
    let cfg = BlinkConfig::default();
    let mut layer = IdleLayer::new(cfg, 3);
    let mut rig = FixtureRig::new();

    let mut onset = None;
    for i in 0..400 {
        let elapsed = i as f32 * DT;
        let mut outputs = Outputs::default();
        layer.update(&ctx_at(elapsed, 0.0, false), &mut rig, &mut outputs);
        if !outputs.events.is_empty() {
            onset = Some(elapsed);
            break;
        }
    }
    let onset = onset.expect("a blink within the max interval");
    assert!(onset >= cfg.min_interval - 1e-6);
    assert!(onset <= cfg.max_interval + DT);
}

/// it should drive both per-eye channels when the combined one is missing
#[test]
fn blink_falls_back_to_per_eye_channels() {
    #[derive(Default)]
    struct PerEyeRig {
        eyes: HashMap<Expression, f32>,
    }

    impl Rig for PerEyeRig {
        fn bone_rotation(&self, _bone: Bone) -> Option<[f32; 3]> {
            None
        }

        fn set_bone_rotation(&mut self, _bone: Bone, _radians: [f32; 3]) -> bool {
            false
        }

        fn set_expression(&mut self, expression: Expression, weight: f32) -> bool {
            if expression == Expression::Blink {
                return false;
            }
            self.eyes.insert(expression, weight);
            true
        }
    }

    let mut layer = IdleLayer::new(BlinkConfig::default(), 0);
    let mut rig = PerEyeRig::default();
    let mut outputs = Outputs::default();

    // Jump straight into a blink, then to its midpoint (fully closed).
    layer.update(&ctx_at(10.0, 0.0, false), &mut rig, &mut outputs);
    layer.update(&ctx_at(10.075, 0.0, false), &mut rig, &mut outputs);

    assert!(!rig.eyes.contains_key(&Expression::Blink));
    approx(rig.eyes[&Expression::BlinkLeft], 1.0, 1e-5);
    approx(rig.eyes[&Expression::BlinkRight], 1.0, 1e-5);
}

/// it should skip disabled layers without dropping them from the stack
#[test]
fn stack_skips_disabled_layers() {
    let mut stack = ExpressionStack::default();
    stack.insert(Box::new(MouthLayer::new(MouthConfig::default())));
    stack.insert(Box::new(GestureTriggerLayer::new()));
    stack.insert(Box::new(IdleLayer::new(BlinkConfig::default(), 0)));
    assert_eq!(stack.len(), 3);

    assert!(stack.set_enabled("idle", false));
    assert!(!stack.set_enabled("missing", false));

    let mut rig = FixtureRig::new();
    let mut outputs = Outputs::default();
    stack.update(&ctx_at(5.0, 0.5, true), &mut rig, &mut outputs);
    // The idle layer would have written the blink channel by now.
    assert_eq!(rig.expression(Expression::Blink), None);
    assert!(rig.expression(Expression::Aa).is_some());

    assert!(stack.set_enabled("idle", true));
    stack.update(&ctx_at(5.0 + DT, 0.5, true), &mut rig, &mut outputs);
    assert!(rig.expression(Expression::Blink).is_some());
}

/// it should remember the last gesture after it ends
#[test]
fn gesture_trigger_retains_last_gesture() {
    let mut layer = GestureTriggerLayer::new();
    let mut rig = FixtureRig::new();
    let mut outputs = Outputs::default();
    assert_eq!(layer.last_gesture(), None);

    let mut ctx = ctx_at(0.0, 0.0, false);
    ctx.gesture = Some("wave");
    layer.update(&ctx, &mut rig, &mut outputs);
    assert_eq!(layer.last_gesture(), Some("wave"));

    ctx.gesture = None;
    layer.update(&ctx, &mut rig, &mut outputs);
    assert_eq!(layer.last_gesture(), Some("wave"));

    ctx.gesture = Some("nod");
    layer.update(&ctx, &mut rig, &mut outputs);
    assert_eq!(layer.last_gesture(), Some("nod"));
}
