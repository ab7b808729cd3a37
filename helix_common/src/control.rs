//! Control-loop parameter types.
//!
//! Gains are plain values: the loop is iteration-based (no `dt` scaling), so
//! the same gains hold regardless of tick period.

use serde::{Deserialize, Serialize};

/// Proportional / integral / derivative gains.
///
/// All three fields are required when the table appears in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain (0 = disabled).
    pub ki: f64,
    /// Derivative gain (0 = disabled).
    pub kd: f64,
}

impl PidGains {
    /// Construct gains.
    pub const fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// All-zero gains; a controller with these outputs nothing.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Validate that every gain is finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("kp", self.kp), ("ki", self.ki), ("kd", self.kd)] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} {value} must be finite and >= 0"));
            }
        }
        Ok(())
    }
}

/// Optional clamp applied to axis setpoints before they reach the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetLimits {
    /// Lowest accepted setpoint [ticks].
    #[serde(default)]
    pub min: Option<i32>,
    /// Highest accepted setpoint [ticks].
    #[serde(default)]
    pub max: Option<i32>,
}

impl TargetLimits {
    /// No clamping.
    pub const NONE: Self = Self {
        min: None,
        max: None,
    };

    /// Clamp a requested setpoint to the configured bounds.
    #[inline]
    pub fn apply(&self, target: i32) -> i32 {
        let lower = self.min.map_or(target, |min| target.max(min));
        self.max.map_or(lower, |max| lower.min(max))
    }

    /// Validate ordering of the bounds.
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(format!("target limits inverted: min {min} > max {max}"));
            }
        }
        Ok(())
    }
}
