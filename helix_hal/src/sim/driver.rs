//! Simulation driver: named device registry plus physics stepping.
//!
//! The `SimulationDriver` stands in for the robot's hardware map. Devices are
//! registered by name at startup, resolved by the control unit through
//! [`DeviceSource`], and advanced once per tick with [`SimulationDriver::step`].

use helix_common::hal::{DeviceSource, HalError, names};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use super::motor::{MotorPlant, SimMotor};
use super::servo::SimServo;

#[derive(Debug, Clone)]
enum SimDevice {
    Motor(SimMotor),
    Servo(SimServo),
}

/// Registry of simulated devices.
#[derive(Debug, Default)]
pub struct SimulationDriver {
    devices: HashMap<String, SimDevice>,
    /// Total simulated time.
    elapsed: Duration,
}

impl SimulationDriver {
    /// Create an empty driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver populated with every device of the competition robot.
    ///
    /// The slide follower is given a slower plant than the leader so the
    /// synchronization loop has drift to correct.
    pub fn competition_robot() -> Self {
        let mut driver = Self::new();
        let slow = MotorPlant {
            max_ticks_per_second: 2650.0,
            ..MotorPlant::default()
        };
        for name in names::MOTORS {
            let plant = if name == names::SLIDE_FOLLOWER {
                slow
            } else {
                MotorPlant::default()
            };
            driver.insert_motor(name, plant);
        }
        for name in names::SERVOS {
            driver.insert_servo(name);
        }
        info!(
            "Simulation driver initialized with {} devices",
            driver.devices.len()
        );
        driver
    }

    /// Register a motor.
    ///
    /// # Errors
    /// Returns `HalError::DuplicateDevice` if the name is taken.
    pub fn register_motor(&mut self, name: &str, plant: MotorPlant) -> Result<SimMotor, HalError> {
        if self.devices.contains_key(name) {
            return Err(HalError::DuplicateDevice(name.to_string()));
        }
        Ok(self.insert_motor(name, plant))
    }

    /// Register a servo.
    ///
    /// # Errors
    /// Returns `HalError::DuplicateDevice` if the name is taken.
    pub fn register_servo(&mut self, name: &str) -> Result<SimServo, HalError> {
        if self.devices.contains_key(name) {
            return Err(HalError::DuplicateDevice(name.to_string()));
        }
        Ok(self.insert_servo(name))
    }

    // Callers check for duplicates; an existing entry is replaced.
    fn insert_motor(&mut self, name: &str, plant: MotorPlant) -> SimMotor {
        let motor = SimMotor::new(name, plant);
        self.devices
            .insert(name.to_string(), SimDevice::Motor(motor.clone()));
        debug!("Registered motor {name}");
        motor
    }

    fn insert_servo(&mut self, name: &str) -> SimServo {
        let servo = SimServo::new(name);
        self.devices
            .insert(name.to_string(), SimDevice::Servo(servo.clone()));
        debug!("Registered servo {name}");
        servo
    }

    /// Advance every motor plant by `dt`.
    pub fn step(&mut self, dt: Duration) {
        for device in self.devices.values() {
            if let SimDevice::Motor(motor) = device {
                motor.step(dt);
            }
        }
        self.elapsed += dt;
    }

    /// Total simulated time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Names of all registered devices, sorted.
    pub fn device_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.devices.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl DeviceSource for SimulationDriver {
    type Motor = SimMotor;
    type Servo = SimServo;

    fn motor(&self, name: &str) -> Result<SimMotor, HalError> {
        match self.devices.get(name) {
            Some(SimDevice::Motor(m)) => Ok(m.clone()),
            Some(SimDevice::Servo(_)) => Err(HalError::WrongDeviceKind {
                name: name.to_string(),
                expected: "motor",
            }),
            None => Err(HalError::DeviceNotFound(name.to_string())),
        }
    }

    fn servo(&self, name: &str) -> Result<SimServo, HalError> {
        match self.devices.get(name) {
            Some(SimDevice::Servo(s)) => Ok(s.clone()),
            Some(SimDevice::Motor(_)) => Err(HalError::WrongDeviceKind {
                name: name.to_string(),
                expected: "servo",
            }),
            None => Err(HalError::DeviceNotFound(name.to_string())),
        }
    }
}
