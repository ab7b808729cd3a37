//! Hardware boundary: actuator traits and binding errors.
//!
//! This module defines:
//! - [`Motor`] - An encoder-equipped DC motor driven by a power command
//! - [`Servo`] - A position-commanded servo
//! - [`HalError`] - Errors raised while binding devices at session start
//!
//! The control core only ever talks to these traits. Device lookup, encoder
//! reads and power writes are implemented by a HAL backend (the simulation
//! backend lives in `helix_hal`).

use thiserror::Error;

/// Error types for hardware binding operations.
///
/// Raised only while resolving devices at session start. Once bound, the
/// control path has no failure mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HalError {
    /// No device registered under the requested name.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// A device exists under the name but has a different kind.
    #[error("Device '{name}' is not a {expected}")]
    WrongDeviceKind {
        /// Requested device name.
        name: String,
        /// Kind the caller asked for.
        expected: &'static str,
    },

    /// Two devices were registered under the same name.
    #[error("Device already registered: {0}")]
    DuplicateDevice(String),
}

/// Encoder-equipped motor.
///
/// # Contract
///
/// - `set_power` receives a value already clamped to `[-1, 1]`.
/// - `reset_encoder` re-zeros the position reference; subsequent reads are
///   relative to the position at the moment of the call.
pub trait Motor {
    /// Current encoder position [ticks].
    fn position(&self) -> i32;

    /// Write a power command.
    fn set_power(&mut self, power: f64);

    /// Last written power command.
    fn power(&self) -> f64;

    /// Stop-and-reset the encoder.
    fn reset_encoder(&mut self);
}

/// Position-commanded servo.
pub trait Servo {
    /// Write an absolute position command in `[0, 1]`.
    fn set_position(&mut self, position: f64);

    /// Last written position command.
    fn position(&self) -> f64;
}

/// Source of named devices, resolved once at session start.
///
/// Implemented by each HAL backend. A missing or mistyped device is the only
/// fatal condition of a session and is reported here, never later.
pub trait DeviceSource {
    /// Motor handle type produced by this backend.
    type Motor: Motor;
    /// Servo handle type produced by this backend.
    type Servo: Servo;

    /// Resolve a motor by name.
    fn motor(&self, name: &str) -> Result<Self::Motor, HalError>;

    /// Resolve a servo by name.
    fn servo(&self, name: &str) -> Result<Self::Servo, HalError>;
}

/// Device names of the competition robot.
pub mod names {
    /// Lift motor.
    pub const LIFT: &str = "lift";
    /// Slide leader motor.
    pub const SLIDE_LEADER: &str = "slide1";
    /// Slide follower motor.
    pub const SLIDE_FOLLOWER: &str = "slide2";
    /// Claw servo.
    pub const CLAW: &str = "grab";
    /// Claw rotation servo.
    pub const ROTATE: &str = "rotate";
    /// First elbow servo.
    pub const ELBOW_1: &str = "elbow1";
    /// Second elbow servo.
    pub const ELBOW_2: &str = "elbow2";
    /// Wrist servo.
    pub const WRIST: &str = "wrist";
    /// Drivetrain motors.
    pub const LEFT_FRONT: &str = "leftFront";
    pub const RIGHT_FRONT: &str = "rightFront";
    pub const LEFT_REAR: &str = "leftRear";
    pub const RIGHT_REAR: &str = "rightRear";

    /// Every motor the robot binds.
    pub const MOTORS: [&str; 7] = [
        LIFT,
        SLIDE_LEADER,
        SLIDE_FOLLOWER,
        LEFT_FRONT,
        RIGHT_FRONT,
        LEFT_REAR,
        RIGHT_REAR,
    ];

    /// Every servo the robot binds.
    pub const SERVOS: [&str; 5] = [CLAW, ROTATE, ELBOW_1, ELBOW_2, WRIST];
}
