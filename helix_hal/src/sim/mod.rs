//! Simulation backend: motors, servos and the device registry.

pub mod driver;
pub mod motor;
pub mod servo;

pub use driver::SimulationDriver;
pub use motor::{MotorPlant, SimMotor};
pub use servo::SimServo;
