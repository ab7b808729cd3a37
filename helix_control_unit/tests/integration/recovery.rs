//! Integration test: recovery mode and manual axis control.
//!
//! The drive pad's recovery combo hands both axes to the operators: encoders
//! are re-zeroed on entry, the lift ignores new setpoints, and manual limits
//! stop applying.

use helix_common::hal::names;
use helix_common::hal::Motor;
use helix_common::mode::OperatingMode;
use helix_control_unit::input::{Buttons, GamepadState, RECOVERY_COMBO};

use super::Rig;

fn triggers(raise: f64, lower: f64) -> GamepadState {
    GamepadState {
        left_trigger: raise,
        right_trigger: lower,
        ..GamepadState::default()
    }
}

/// Rig parked in spec-score so the sequencer issues no targets.
fn parked_rig() -> Rig {
    let mut rig = Rig::new();
    rig.tap_arm(Buttons::OPTIONS);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::SpecScore);
    rig
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn combo_toggles_on_rising_edge_only() {
    let mut rig = parked_rig();
    for _ in 0..5 {
        rig.tick_with(GamepadState::default(), super::held(RECOVERY_COMBO), None);
    }
    assert!(rig.robot.mechanisms.lift.is_recovering());
    assert!(rig.robot.mechanisms.slide.is_recovering());

    rig.tick();
    rig.tap_drive(RECOVERY_COMBO);
    assert!(!rig.robot.mechanisms.is_recovering());
}

#[test]
fn lift_recovery_rezeros_and_drops_setpoints() {
    let mut rig = parked_rig();
    let lift = rig.motor(names::LIFT);
    rig.robot.mechanisms.lift.set_target(1660);
    lift.set_encoder(800);
    rig.tick();
    assert!(lift.power() > 0.0);

    let resets = lift.reset_count();
    rig.tap_drive(RECOVERY_COMBO);
    assert!(rig.robot.mechanisms.lift.is_recovering());
    assert_eq!(lift.reset_count(), resets + 1);
    assert_eq!(rig.robot.mechanisms.lift.position(), 0);
    assert_eq!(lift.power(), 0.0);

    rig.robot.mechanisms.lift.set_target(500);
    assert_eq!(rig.robot.mechanisms.lift.target(), 1660);

    rig.tap_drive(RECOVERY_COMBO);
    assert!(!rig.robot.mechanisms.lift.is_recovering());
    rig.robot.mechanisms.lift.set_target(500);
    assert_eq!(rig.robot.mechanisms.lift.target(), 500);
}

#[test]
fn lift_follows_drive_triggers_while_recovering() {
    let mut rig = Rig::new();
    let lift = rig.motor(names::LIFT);
    rig.tap_drive(RECOVERY_COMBO);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::FloorGrab);

    // Floor grab keeps reasserting its lift target; manual drive wins.
    for _ in 0..10 {
        rig.tick_with(GamepadState::default(), triggers(0.4, 0.0), None);
        assert_eq!(lift.power(), 0.4);
    }
    rig.tick_with(GamepadState::default(), triggers(0.0, 0.3), None);
    assert_eq!(lift.power(), -0.3);
    rig.tick();
    assert_eq!(lift.power(), 0.0);
}

#[test]
fn lift_ignores_triggers_outside_recovery() {
    let mut rig = parked_rig();
    let lift = rig.motor(names::LIFT);
    for _ in 0..5 {
        rig.tick_with(GamepadState::default(), triggers(0.8, 0.0), None);
    }
    assert_eq!(lift.power(), 0.0);
}

#[test]
fn slide_limits_apply_outside_recovery() {
    let mut rig = parked_rig();
    let leader = rig.motor(names::SLIDE_LEADER);
    let follower = rig.motor(names::SLIDE_FOLLOWER);

    // Above the extension limit: raising holds position instead.
    leader.set_encoder(2400);
    rig.tick_with(triggers(0.7, 0.0), GamepadState::default(), None);
    assert_eq!(rig.robot.mechanisms.slide.target(), 2400);
    assert_ne!(leader.power(), 0.7);

    // At zero: lowering holds position instead.
    leader.set_encoder(0);
    rig.tick_with(triggers(0.0, 0.5), GamepadState::default(), None);
    assert_eq!(rig.robot.mechanisms.slide.target(), 0);
    assert_ne!(leader.power(), -0.5);

    // Inside the range both motors take the trigger directly.
    leader.set_encoder(1000);
    rig.tick_with(triggers(0.7, 0.0), GamepadState::default(), None);
    assert_eq!(leader.power(), 0.7);
    assert_eq!(follower.power(), 0.7);
}

#[test]
fn slide_limits_lifted_in_recovery() {
    let mut rig = parked_rig();
    let leader = rig.motor(names::SLIDE_LEADER);
    let follower = rig.motor(names::SLIDE_FOLLOWER);
    leader.set_encoder(900);

    rig.tap_drive(RECOVERY_COMBO);
    assert_eq!(rig.robot.mechanisms.slide.position(), 0);

    rig.tick_with(triggers(0.0, 0.5), GamepadState::default(), None);
    assert_eq!(leader.power(), -0.5);
    assert_eq!(follower.power(), -0.5);

    leader.set_encoder(2400);
    rig.tick_with(triggers(0.7, 0.0), GamepadState::default(), None);
    assert_eq!(leader.power(), 0.7);
}

#[test]
fn slide_stops_when_trigger_released_in_recovery() {
    let mut rig = parked_rig();
    let leader = rig.motor(names::SLIDE_LEADER);
    let follower = rig.motor(names::SLIDE_FOLLOWER);
    rig.tap_drive(RECOVERY_COMBO);
    assert!(rig.robot.mechanisms.slide.is_recovering());

    rig.tick_with(triggers(0.8, 0.0), GamepadState::default(), None);
    assert_eq!(leader.power(), 0.8);

    for _ in 0..50 {
        rig.tick();
    }
    assert_eq!(leader.power(), 0.0);
    assert_eq!(follower.power(), 0.0);
}

#[test]
fn slide_drops_loop_power_on_entering_recovery() {
    let mut rig = parked_rig();
    let leader = rig.motor(names::SLIDE_LEADER);
    let follower = rig.motor(names::SLIDE_FOLLOWER);
    rig.robot.mechanisms.slide.set_target(1500);
    rig.tick();
    assert_eq!(leader.power(), 1.0);

    rig.tap_drive(RECOVERY_COMBO);
    assert!(rig.robot.mechanisms.slide.is_recovering());
    for _ in 0..50 {
        rig.tick();
    }
    assert_eq!(leader.power(), 0.0);
    assert_eq!(follower.power(), 0.0);
    assert_eq!(rig.robot.mechanisms.slide.target(), 0);
}

#[test]
fn floor_grab_limit_is_tighter() {
    let mut rig = Rig::new();
    let leader = rig.motor(names::SLIDE_LEADER);
    leader.set_encoder(400);
    rig.tick_with(triggers(0.6, 0.0), GamepadState::default(), None);
    assert_ne!(leader.power(), 0.6);

    rig.tap_arm(Buttons::SHARE);
    leader.set_encoder(400);
    rig.tick_with(triggers(0.6, 0.0), GamepadState::default(), None);
    assert_eq!(leader.power(), 0.6);
}
