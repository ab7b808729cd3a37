//! Integration test: operating-mode sequencing through the full tick.
//!
//! Mode bindings are level-triggered, so holding a button re-selects the
//! same mode every tick; only a genuine change restarts the phase table.

use helix_common::hal::names;
use helix_common::hal::{Motor, Servo};
use helix_common::mode::OperatingMode;
use helix_control_unit::input::Buttons;

use super::Rig;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn held_binding_does_not_restart_sequence() {
    let mut rig = Rig::new();

    rig.hold_arm_until(Buttons::SHARE, 0.5);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::Neutral);
    assert_eq!(rig.robot.sequencer.phase_index(), 1);
    assert_eq!(rig.robot.mechanisms.slide.target(), 0);
    assert_eq!(rig.robot.mechanisms.lift.target(), 0);

    // Still held: the 1 s gate opens against the first entry time.
    rig.hold_arm_until(Buttons::SHARE, 1.5);
    assert_eq!(rig.robot.sequencer.phase_index(), 2);
    assert_eq!(rig.robot.mechanisms.lift.target(), -50);
}

#[test]
fn neutral_runs_to_completion_and_parks() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::SHARE);

    rig.run_until(2.5);
    assert_eq!(rig.robot.sequencer.phase_index(), 3);
    assert_close(rig.servo(names::ELBOW_1).position(), 0.0);
    assert_close(rig.servo(names::ELBOW_2).position(), 0.0);
    assert!(!rig.robot.sequencer.is_complete());

    rig.run_until(3.5);
    assert!(rig.robot.sequencer.is_complete());
    assert_eq!(rig.robot.sequencer.phase_index(), 0);
    assert_close(rig.servo(names::WRIST).position(), 1.0);
    assert_close(rig.servo(names::ROTATE).position(), 0.0);

    // Completion never changes the mode.
    rig.run_until(6.0);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::Neutral);
    assert!(rig.robot.sequencer.is_complete());
}

#[test]
fn switching_mid_sequence_abandons_previous_table() {
    let mut rig = Rig::new();
    rig.hold_arm_until(Buttons::SHARE, 0.5);
    assert_eq!(rig.robot.sequencer.phase_index(), 1);

    rig.tap_arm(Buttons::DPAD_LEFT);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::SpecimenTransition);
    assert_eq!(rig.robot.sequencer.phase_index(), 1);
    assert_eq!(rig.robot.mechanisms.lift.target(), -50);
    assert_close(rig.servo(names::WRIST).position(), 1.0);

    rig.run_until(0.7);
    assert!(!rig.robot.sequencer.is_complete());

    rig.run_until(1.2);
    assert!(rig.robot.sequencer.is_complete());
    assert_close(rig.servo(names::ROTATE).position(), 0.8);
    assert_close(rig.servo(names::ELBOW_1).position(), 0.3);
    assert_close(rig.servo(names::WRIST).position(), 0.4);

    // Neutral's later elbow step never fires.
    rig.run_until(2.5);
    assert_close(rig.servo(names::ELBOW_1).position(), 0.3);
}

#[test]
fn specimen_grab_applies_preset_after_delay() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::RIGHT_BUMPER);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::SpecimenGrab);
    assert_eq!(rig.robot.mechanisms.lift.target(), -50);
    assert!(!rig.robot.sequencer.is_complete());

    rig.run_until(0.5);
    assert!(rig.robot.sequencer.is_complete());
    assert_close(rig.servo(names::ELBOW_1).position(), 0.99);
    assert_close(rig.servo(names::WRIST).position(), 0.73);
    assert_close(rig.servo(names::ROTATE).position(), 0.23);
}

#[test]
fn specimen_drop_is_single_shot() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::LEFT_BUMPER);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::SpecimenDrop);
    assert!(rig.robot.sequencer.is_complete());
    assert_close(rig.servo(names::ELBOW_1).position(), 0.12);
    assert_close(rig.servo(names::ELBOW_2).position(), 0.12);
}

#[test]
fn high_basket_waits_for_slide_guard() {
    let mut rig = Rig::new();
    let slide = rig.motor(names::SLIDE_LEADER);
    slide.set_encoder(500);

    rig.tap_arm(Buttons::DPAD_UP);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::HighBasket);
    assert!(!rig.robot.sequencer.is_complete());
    assert_eq!(rig.robot.mechanisms.lift.target(), 0);

    slide.set_encoder(150);
    rig.tick();
    assert!(rig.robot.sequencer.is_complete());
    assert_eq!(rig.robot.mechanisms.lift.target(), -50);
    assert_close(rig.servo(names::ELBOW_1).position(), 0.5);
    assert_close(rig.servo(names::WRIST).position(), 0.2);
    assert_close(rig.servo(names::ROTATE).position(), 0.52);
    assert_eq!(rig.robot.mechanisms.grabber.rotate_index(), 0);
}

#[test]
fn spec_score_is_parked() {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::OPTIONS);
    rig.run_until(2.0);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::SpecScore);
    assert!(!rig.robot.sequencer.is_complete());
    assert_eq!(rig.robot.mechanisms.lift.target(), 0);
    assert_eq!(rig.motor(names::LIFT).power(), 0.0);
}
