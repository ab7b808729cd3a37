//! Integration test: shipped configuration and scenario replayed end to end.

use std::path::PathBuf;
use std::time::Duration;

use helix_common::mode::OperatingMode;
use helix_control_unit::config::load_config;
use helix_control_unit::cycle::Robot;
use helix_control_unit::scenario::{Scenario, ScenarioPlayer};
use helix_hal::SimulationDriver;

fn repo_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("config")
        .join(name)
}

#[test]
fn shipped_config_is_valid() {
    let config = load_config(&repo_file("robot.toml")).unwrap();
    assert_eq!(config.shared.service_name, "helix-sim-01");
    assert_eq!(config.cycle.period_ms, 20);
    assert_eq!(config.slide.floor_grab_limit, 350);
}

#[test]
fn shipped_scenario_replays_to_neutral() {
    let config = load_config(&repo_file("robot.toml")).unwrap();
    let scenario = Scenario::from_file(&repo_file("scenario.toml")).unwrap();
    let end = scenario.duration() + Duration::from_secs(2);

    let mut driver = SimulationDriver::competition_robot();
    let mut robot = Robot::bind(&driver, &config).unwrap();
    let mut player = ScenarioPlayer::new(scenario);
    let period = Duration::from_millis(u64::from(config.cycle.period_ms));

    let mut now = Duration::ZERO;
    let mut saw_high_basket = false;
    while now <= end {
        let input = player.input_at(now);
        robot.tick(&input, now);
        driver.step(period);
        if robot.sequencer.mode() == OperatingMode::HighBasket && robot.sequencer.is_complete() {
            saw_high_basket = true;
        }
        now += period;
    }

    assert!(player.is_finished());
    assert!(saw_high_basket);
    let status = robot.status(now);
    assert_eq!(status.mode, OperatingMode::Neutral);
    assert_eq!(status.lift.target, -50);
    assert_eq!(status.slide.target, 0);
    assert!(status.grab_done);
    assert!(status.claw_closed);
}
