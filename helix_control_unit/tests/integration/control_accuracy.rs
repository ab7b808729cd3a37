//! Integration test: closed-loop accuracy against the simulated plants.
//!
//! The competition driver gives the slide follower a slower plant than the
//! leader, so without a sync trim the pair drifts apart on every move.

use helix_common::control::PidGains;
use helix_common::hal::names;
use helix_common::hal::Motor;
use helix_common::mode::OperatingMode;
use helix_common::robot::RobotConfig;
use helix_control_unit::input::Buttons;

use super::Rig;

/// Extend the slide to `target` in spec-score and report the leader
/// position and the leader/follower gap after `secs`.
fn extend_slide(config: &RobotConfig, target: i32, secs: f64) -> (i32, i32) {
    let mut rig = Rig::with_config(config).with_physics();
    rig.tap_arm(Buttons::OPTIONS);
    assert_eq!(rig.robot.sequencer.mode(), OperatingMode::SpecScore);

    rig.robot.mechanisms.slide.set_target(target);
    rig.run_until(secs);

    let leader = rig.motor(names::SLIDE_LEADER).position();
    let follower = rig.motor(names::SLIDE_FOLLOWER).position();
    (leader, (leader - follower).abs())
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn lift_settles_on_floor_grab_target() {
    let mut rig = Rig::new().with_physics();
    rig.run_until(3.0);

    let position = rig.robot.mechanisms.lift.position();
    assert_eq!(rig.robot.mechanisms.lift.target(), -1660);
    assert!((position + 1660).abs() < 60, "lift at {position}");
}

#[test]
fn slide_leader_reaches_target() {
    let (leader, _) = extend_slide(&RobotConfig::default(), 1000, 3.0);
    assert!((leader - 1000).abs() < 60, "leader at {leader}");
}

#[test]
fn sync_trim_closes_follower_gap() {
    let (_, unsynced) = extend_slide(&RobotConfig::default(), 1000, 3.0);

    let mut config = RobotConfig::default();
    config.slide.sync = PidGains::new(0.01, 0.0, 0.0);
    let (leader, synced) = extend_slide(&config, 1000, 3.0);

    assert!((leader - 1000).abs() < 60, "leader at {leader}");
    assert!(synced < unsynced, "synced gap {synced} >= unsynced gap {unsynced}");
}
