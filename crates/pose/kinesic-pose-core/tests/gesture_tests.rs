use kinesic_pose_core::{
    BodyGesture, Bone, BoneDriver, BoneStore, Config, ControllerEvent, FrameInput, GesturePlayback,
    Keyframe, PoseController, PosePreset,
};
use kinesic_test_fixtures::FixtureRig;

const DT: f32 = 1.0 / 60.0;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn mk_controller() -> (PoseController, FixtureRig) {
    let rig = FixtureRig::new();
    let mut controller = PoseController::new(Config::default());
    controller.init(&rig);
    (controller, rig)
}

fn run(controller: &mut PoseController, rig: &mut FixtureRig, ticks: usize) -> Vec<ControllerEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(
            controller
                .update(rig, DT, &FrameInput::default())
                .events
                .iter()
                .cloned(),
        );
    }
    events
}

fn mk_gesture(keyframes: Vec<Keyframe>, duration_ms: u32, looping: bool) -> BodyGesture {
    BodyGesture {
        id: "test".into(),
        name: "Test".into(),
        duration_ms,
        looping,
        keyframes,
    }
}

fn frame(time: f32, bones: &[(Bone, [f32; 3])]) -> Keyframe {
    Keyframe {
        time,
        bones: bones.iter().copied().collect(),
    }
}

/// it should play the wave once and hand the arm back to the base pose
#[test]
fn wave_plays_and_finishes() {
    let (mut controller, mut rig) = mk_controller();
    let wave: BodyGesture = kinesic_test_fixtures::body_gestures::load("wave").unwrap();

    controller.play_body_gesture(&wave);
    assert_eq!(controller.active_gesture(), Some("wave"));

    // Halfway through the 1.2s wave the arm is raised high.
    run(&mut controller, &mut rig, 30);
    assert!(rig.rotation(Bone::RightUpperArm).unwrap()[0] < -1.0);

    let events = run(&mut controller, &mut rig, 50);
    assert!(events.contains(&ControllerEvent::GestureFinished {
        gesture: "wave".into()
    }));
    assert_eq!(controller.active_gesture(), None);

    // The arm eases back to rest once the gesture releases it.
    run(&mut controller, &mut rig, 90);
    approx(rig.rotation(Bone::RightUpperArm).unwrap()[0], 0.0, 0.01);
}

/// it should loop a looping gesture until told to stop
#[test]
fn looping_gesture_runs_until_stopped() {
    let (mut controller, mut rig) = mk_controller();
    let mut wave: BodyGesture = kinesic_test_fixtures::body_gestures::load("wave").unwrap();
    wave.looping = true;

    controller.play_body_gesture(&wave);
    let events = run(&mut controller, &mut rig, 300);
    assert!(!events
        .iter()
        .any(|event| matches!(event, ControllerEvent::GestureFinished { .. })));
    assert_eq!(controller.active_gesture(), Some("wave"));

    controller.stop_body_gesture();
    assert_eq!(controller.active_gesture(), None);
    let events = run(&mut controller, &mut rig, 1);
    assert!(events.contains(&ControllerEvent::GestureStopped {
        gesture: "wave".into()
    }));

    run(&mut controller, &mut rig, 120);
    approx(rig.rotation(Bone::RightUpperArm).unwrap()[0], 0.0, 0.01);
}

/// it should skip gestures that have no keyframes
#[test]
fn empty_gesture_is_skipped() {
    let (mut controller, mut rig) = mk_controller();
    let empty = mk_gesture(Vec::new(), 500, false);
    assert!(GesturePlayback::start(empty.clone(), 0.0).is_none());

    controller.play_body_gesture(&empty);
    assert_eq!(controller.active_gesture(), None);
    let events = run(&mut controller, &mut rig, 2);
    assert!(!events
        .iter()
        .any(|event| matches!(event, ControllerEvent::GestureStarted { .. })));
}

/// it should not emit a stop event when nothing is playing
#[test]
fn stop_without_gesture_is_silent() {
    let (mut controller, mut rig) = mk_controller();
    controller.stop_body_gesture();
    let events = run(&mut controller, &mut rig, 2);
    assert!(!events
        .iter()
        .any(|event| matches!(event, ControllerEvent::GestureStopped { .. })));
}

/// it should let a gesture override a transition on the bones they share
#[test]
fn gesture_overrides_transition() {
    let (mut controller, mut rig) = mk_controller();
    let relaxed: PosePreset = kinesic_test_fixtures::poses::load("relaxed").unwrap();
    let nod: BodyGesture = kinesic_test_fixtures::body_gestures::load("nod").unwrap();

    controller.apply_pose(&relaxed);
    controller.play_body_gesture(&nod);
    assert_eq!(controller.bone_driver(Bone::Head), Some(BoneDriver::Gesture));

    // The relaxed pose keeps the head at 1 degree; the nod pitches it to 18.
    // If the transition drove the head, it could never pass 2 degrees.
    run(&mut controller, &mut rig, 17);
    assert!(rig.rotation(Bone::Head).unwrap()[0] > 2.0f32.to_radians());

    // Once the nod finishes, the head settles to the relaxed base.
    run(&mut controller, &mut rig, 150);
    approx(
        rig.rotation(Bone::Head).unwrap()[0],
        1.0f32.to_radians(),
        0.01,
    );
}

/// it should restart playback when a replacement gesture comes in
#[test]
fn replaying_restarts_the_clock() {
    let (mut controller, mut rig) = mk_controller();
    let nod: BodyGesture = kinesic_test_fixtures::body_gestures::load("nod").unwrap();

    controller.play_body_gesture(&nod);
    let events = run(&mut controller, &mut rig, 36);
    assert!(events.contains(&ControllerEvent::GestureStarted {
        gesture: "nod".into()
    }));

    // 0.6s in, restart; the gesture must survive well past its original end.
    controller.play_body_gesture(&nod);
    let events = run(&mut controller, &mut rig, 36);
    assert!(!events
        .iter()
        .any(|event| matches!(event, ControllerEvent::GestureFinished { .. })));
    assert_eq!(controller.active_gesture(), Some("nod"));
}

/// it should ease between keyframes with a sine profile
#[test]
fn segments_interpolate_with_sine_easing() {
    let mut store = BoneStore::default();
    store.init_from_rig(&FixtureRig::new());
    let gesture = mk_gesture(
        vec![
            frame(0.0, &[(Bone::Head, [0.0, 0.0, 0.0])]),
            frame(0.5, &[(Bone::Head, [40.0, 0.0, 0.0]), (Bone::Neck, [10.0, 0.0, 0.0])]),
        ],
        1000,
        false,
    );
    let mut playback = GesturePlayback::start(gesture, 0.0).unwrap();

    assert!(!playback.advance(&mut store, 0.2));
    // local t = 0.4 under sine easing.
    let eased = (1.0 - (0.4 * std::f32::consts::PI).cos()) / 2.0;
    approx(
        store.state(Bone::Head).unwrap().target[0],
        (40.0 * eased).to_radians(),
        1e-4,
    );
    // The neck is absent from the first keyframe, so it lerps up from zero.
    approx(
        store.state(Bone::Neck).unwrap().target[0],
        (10.0 * eased).to_radians(),
        1e-4,
    );
}

/// it should clamp sampling to the first and last keyframes
#[test]
fn sampling_clamps_to_keyframe_range() {
    let mut store = BoneStore::default();
    store.init_from_rig(&FixtureRig::new());
    let gesture = mk_gesture(
        vec![
            frame(0.3, &[(Bone::Head, [12.0, 0.0, 0.0])]),
            frame(0.5, &[(Bone::Head, [40.0, 0.0, 0.0])]),
        ],
        1000,
        false,
    );
    let mut playback = GesturePlayback::start(gesture, 0.0).unwrap();

    // Before the first keyframe: hold it.
    playback.advance(&mut store, 0.1);
    approx(
        store.state(Bone::Head).unwrap().target[0],
        12.0f32.to_radians(),
        1e-5,
    );
    // After the last keyframe but before completion: hold it.
    playback.advance(&mut store, 0.8);
    approx(
        store.state(Bone::Head).unwrap().target[0],
        40.0f32.to_radians(),
        1e-5,
    );
    // Completion reports true without another write.
    assert!(playback.advance(&mut store, 1.0));
    approx(
        store.state(Bone::Head).unwrap().target[0],
        40.0f32.to_radians(),
        1e-5,
    );
}

/// it should restart a looping gesture at exactly phase zero
#[test]
fn looping_restarts_at_phase_zero() {
    let mut store = BoneStore::default();
    store.init_from_rig(&FixtureRig::new());
    let gesture = mk_gesture(
        vec![
            frame(0.0, &[(Bone::Head, [0.0, 0.0, 0.0])]),
            frame(1.0, &[(Bone::Head, [40.0, 0.0, 0.0])]),
        ],
        1000,
        true,
    );
    let mut playback = GesturePlayback::start(gesture, 0.0).unwrap();

    playback.advance(&mut store, 0.9);
    assert!(store.state(Bone::Head).unwrap().target[0] > 0.5);

    // Wrapping resets the clock to the moment of the wrap.
    assert!(!playback.advance(&mut store, 1.25));
    approx(store.state(Bone::Head).unwrap().target[0], 0.0, 1e-6);

    // A quarter second later the cycle is a quarter of the way through.
    assert!(!playback.advance(&mut store, 1.5));
    let eased = (1.0 - (0.25 * std::f32::consts::PI).cos()) / 2.0;
    approx(
        store.state(Bone::Head).unwrap().target[0],
        (40.0 * eased).to_radians(),
        1e-4,
    );
}
