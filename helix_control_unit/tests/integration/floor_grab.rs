//! Integration test: floor grab mode and the end-effector grab sequence.
//!
//! Floor grab reasserts its axis targets on every tick while the slide is
//! retracted, and runs the grab phases from the operator's start edge.

use helix_common::hal::names;
use helix_common::hal::Servo;
use helix_common::mode::OperatingMode;
use helix_control_unit::effector::grabber::{CLAW_CLOSED, CLAW_OPEN, GrabPhase, ROTATE_DETENTS};
use helix_control_unit::input::Buttons;

use super::{held, Rig};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn retracted_slide_reasserts_approach_and_hovers() {
    let mut rig = Rig::new();
    rig.motor(names::SLIDE_LEADER).set_encoder(50);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::FloorGrab);
    assert!(!rig.robot.mechanisms.grabber.is_grabbing());

    rig.tick();

    assert_eq!(rig.robot.mechanisms.lift.target(), -1660);
    assert_eq!(rig.robot.mechanisms.slide.target(), 0);
    assert_close(rig.servo(names::ELBOW_1).position(), 0.6);
    assert_close(rig.servo(names::ELBOW_2).position(), 0.6);
    assert_close(rig.servo(names::WRIST).position(), 1.0);
    assert_close(rig.servo(names::CLAW).position(), CLAW_OPEN);
    assert!(!rig.robot.mechanisms.grabber.is_claw_closed());
    assert_eq!(rig.robot.mechanisms.grabber.grab_phase(), GrabPhase::PoseForGrab);
}

#[test]
fn extended_slide_keeps_previous_targets() {
    let mut rig = Rig::new();
    rig.motor(names::SLIDE_LEADER).set_encoder(300);
    rig.tick();

    assert_eq!(rig.robot.mechanisms.lift.target(), 0);
    // Hover pose is applied regardless of the slide guard.
    assert_close(rig.servo(names::ELBOW_1).position(), 0.6);
}

#[test]
fn grab_sequence_runs_each_phase_in_order() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::LEFT_STICK);
    assert!(rig.robot.mechanisms.grabber.is_grabbing());

    rig.run_until(0.1);
    assert_eq!(rig.robot.mechanisms.grabber.grab_phase(), GrabPhase::Closing);
    assert_close(rig.servo(names::ELBOW_1).position(), 0.48);
    assert!(!rig.robot.mechanisms.grabber.is_claw_closed());

    rig.run_until(0.3);
    assert_eq!(rig.robot.mechanisms.grabber.grab_phase(), GrabPhase::Lifting);
    assert_close(rig.servo(names::CLAW).position(), CLAW_CLOSED);

    rig.run_until(0.5);
    assert_eq!(rig.robot.mechanisms.grabber.grab_phase(), GrabPhase::Settling);
    assert_close(rig.servo(names::ELBOW_1).position(), 0.6);
    assert!(!rig.robot.mechanisms.grabber.is_grab_done());

    rig.run_until(1.0);
    assert!(rig.robot.mechanisms.grabber.is_grab_done());
    assert_eq!(rig.robot.mechanisms.grabber.grab_phase(), GrabPhase::PoseForGrab);
    assert_eq!(rig.robot.mechanisms.slide.target(), 25);
    assert_eq!(rig.robot.mechanisms.lift.target(), -1660);
    assert!(rig.robot.mechanisms.grabber.is_claw_closed());
}

#[test]
fn finished_grab_leaves_servos_alone() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::LEFT_STICK);
    rig.run_until(1.0);
    assert!(rig.robot.mechanisms.grabber.is_grab_done());

    let elbow = rig.servo(names::ELBOW_1);
    let writes = elbow.write_count();
    rig.run_until(2.0);
    assert_eq!(elbow.write_count(), writes);
}

#[test]
fn stop_then_restart_grab() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::LEFT_STICK);
    rig.run_until(1.0);
    assert!(rig.robot.mechanisms.grabber.is_claw_closed());

    rig.tap_arm(Buttons::RIGHT_STICK);
    assert!(!rig.robot.mechanisms.grabber.is_grabbing());
    assert!(!rig.robot.mechanisms.grabber.is_claw_closed());
    assert_close(rig.servo(names::CLAW).position(), CLAW_OPEN);

    rig.tap_arm(Buttons::LEFT_STICK);
    assert!(rig.robot.mechanisms.grabber.is_grabbing());
    assert!(!rig.robot.mechanisms.grabber.is_grab_done());
    assert_eq!(rig.robot.mechanisms.grabber.grab_phase(), GrabPhase::Closing);
}

#[test]
fn rotation_detents_saturate() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::TOUCHPAD);
    assert!(!rig.robot.alignment.is_enabled());

    for _ in 0..5 {
        rig.tap_arm(Buttons::CIRCLE);
    }
    assert_eq!(rig.robot.mechanisms.grabber.rotate_index(), 3);
    assert_close(rig.servo(names::ROTATE).position(), ROTATE_DETENTS[3]);

    for _ in 0..5 {
        rig.tap_arm(Buttons::SQUARE);
    }
    assert_eq!(rig.robot.mechanisms.grabber.rotate_index(), 0);
    assert_close(rig.servo(names::ROTATE).position(), ROTATE_DETENTS[0]);
}

#[test]
fn alignment_ignored_while_grabbing() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::LEFT_STICK);
    rig.tick_with(held(Buttons::empty()), Default::default(), Some(51.0));
    assert!((rig.servo(names::ROTATE).position() - 0.35).abs() > 1e-6);

    rig.tap_arm(Buttons::RIGHT_STICK);
    rig.tick_with(held(Buttons::empty()), Default::default(), Some(51.0));
    assert_close(rig.servo(names::ROTATE).position(), 0.35);
}
