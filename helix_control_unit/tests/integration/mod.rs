//! Shared rig for robot-level tests.

mod control_accuracy;
mod floor_grab;
mod recovery;
mod session;
mod sequencing;

use std::time::Duration;

use helix_common::prelude::{DeviceSource, RobotConfig};
use helix_control_unit::cycle::Robot;
use helix_control_unit::input::{Buttons, EdgeTracker, GamepadState, OperatorInput};
use helix_hal::{SimMotor, SimServo, SimulationDriver};

/// Control period used by every rig [ms].
pub const PERIOD_MS: u64 = 20;

pub fn held(buttons: Buttons) -> GamepadState {
    GamepadState {
        held: buttons,
        ..GamepadState::default()
    }
}

/// Robot bound to a fresh competition driver, ticked at a fixed period.
///
/// Motors only move when physics is enabled; otherwise encoders hold
/// whatever the test writes into them.
pub struct Rig {
    pub robot: Robot<SimMotor, SimServo>,
    pub driver: SimulationDriver,
    pub now: Duration,
    physics: bool,
    arm: EdgeTracker,
    drive: EdgeTracker,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_config(&RobotConfig::default())
    }

    pub fn with_config(config: &RobotConfig) -> Self {
        let driver = SimulationDriver::competition_robot();
        let robot = Robot::bind(&driver, config).unwrap();
        Self {
            robot,
            driver,
            now: Duration::ZERO,
            physics: false,
            arm: EdgeTracker::default(),
            drive: EdgeTracker::default(),
        }
    }

    pub fn with_physics(mut self) -> Self {
        self.physics = true;
        self
    }

    pub fn motor(&self, name: &str) -> SimMotor {
        self.driver.motor(name).unwrap()
    }

    pub fn servo(&self, name: &str) -> SimServo {
        self.driver.servo(name).unwrap()
    }

    /// Run one tick with the given pad states, then advance the clock.
    pub fn tick_with(&mut self, arm: GamepadState, drive: GamepadState, detection: Option<f64>) {
        let input = OperatorInput {
            arm: self.arm.sample(arm),
            drive: self.drive.sample(drive),
            detection,
        };
        self.robot.tick(&input, self.now);
        if self.physics {
            self.driver.step(Duration::from_millis(PERIOD_MS));
        }
        self.now += Duration::from_millis(PERIOD_MS);
    }

    pub fn tick(&mut self) {
        self.tick_with(GamepadState::default(), GamepadState::default(), None);
    }

    /// Hold arm buttons for one tick, then release them for one tick.
    pub fn tap_arm(&mut self, buttons: Buttons) {
        self.tick_with(held(buttons), GamepadState::default(), None);
        self.tick();
    }

    /// Hold drive buttons for one tick, then release them for one tick.
    pub fn tap_drive(&mut self, buttons: Buttons) {
        self.tick_with(GamepadState::default(), held(buttons), None);
        self.tick();
    }

    /// Idle ticks until `secs` of session time have passed.
    pub fn run_until(&mut self, secs: f64) {
        while self.now < Duration::from_secs_f64(secs) {
            self.tick();
        }
    }

    /// Hold arm buttons on every tick until `secs` of session time.
    pub fn hold_arm_until(&mut self, buttons: Buttons, secs: f64) {
        while self.now < Duration::from_secs_f64(secs) {
            self.tick_with(held(buttons), GamepadState::default(), None);
        }
    }
}
