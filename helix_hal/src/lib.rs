//! # HELIX HAL Library
//!
//! Simulation hardware layer for the HELIX control unit.
//!
//! Devices implement the `Motor` / `Servo` traits defined in
//! `helix_common::hal`, and the [`SimulationDriver`] resolves them by name
//! through `DeviceSource`.
//!
//! # Module Structure
//!
//! - [`sim`] - Simulated motors, servos and the device registry
//!
//! ```text
//! ┌────────────────────┐  DeviceSource   ┌──────────────────────┐
//! │ helix_control_unit │◄───────────────►│  SimulationDriver    │
//! │   (tick cycle)     │  Motor / Servo  │  SimMotor, SimServo  │
//! └────────────────────┘                 └──────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod sim;

pub use crate::sim::{MotorPlant, SimMotor, SimServo, SimulationDriver};
