//! System-wide constants for the HELIX workspace.
//!
//! Single source of truth for numeric limits and default paths.

/// Magnitude limit of any motor power command.
pub const POWER_LIMIT: f64 = 1.0;

/// Lower bound of a servo position command.
pub const SERVO_MIN: f64 = 0.0;

/// Upper bound of a servo position command.
pub const SERVO_MAX: f64 = 1.0;

/// Default control tick period in milliseconds (50 Hz).
pub const DEFAULT_CYCLE_PERIOD_MS: u32 = 20;

/// Bounds for the configured control tick period [ms].
pub const CYCLE_PERIOD_MS_MIN: u32 = 1;
pub const CYCLE_PERIOD_MS_MAX: u32 = 1000;

/// Error dead zone [ticks] inside which the minimum-power floor is not applied.
pub const MIN_POWER_DEADBAND_TICKS: f64 = 1.0;

/// Default robot configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "config/robot.toml";
