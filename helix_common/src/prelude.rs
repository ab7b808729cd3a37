//! Prelude module for common re-exports.
//!
//! ```rust
//! use helix_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
pub use crate::robot::RobotConfig;

// ─── Control ────────────────────────────────────────────────────────
pub use crate::control::{PidGains, TargetLimits};
pub use crate::mode::OperatingMode;

// ─── Hardware ───────────────────────────────────────────────────────
pub use crate::hal::{DeviceSource, HalError, Motor, Servo};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{POWER_LIMIT, SERVO_MAX, SERVO_MIN};
