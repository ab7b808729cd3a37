//! Robot configuration structures.
//!
//! All config types use `serde::Deserialize` for TOML loading. Every section
//! and field defaults to the robot's tuned value, so an empty file yields the
//! competition configuration.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SharedConfig};
use crate::consts::{CYCLE_PERIOD_MS_MAX, CYCLE_PERIOD_MS_MIN, DEFAULT_CYCLE_PERIOD_MS};
use crate::control::{PidGains, TargetLimits};

// ─── Top-Level Config ───────────────────────────────────────────────

/// Complete robot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Service identity and log level.
    pub shared: SharedConfig,
    /// Control tick pacing.
    pub cycle: CycleConfig,
    /// Single-motor lift axis.
    pub lift: LiftConfig,
    /// Dual-motor slide axis.
    pub slide: SlideConfig,
    /// End-effector timing.
    pub grabber: GrabberConfig,
    /// Vision-aligned claw rotation.
    pub alignment: AlignmentConfig,
    /// Mecanum drivetrain.
    pub drive: DriveConfig,
}

impl RobotConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        let sections: [(&str, Result<(), String>); 6] = [
            ("cycle", self.cycle.validate()),
            ("lift", self.lift.validate()),
            ("slide", self.slide.validate()),
            ("grabber", self.grabber.validate()),
            ("alignment", self.alignment.validate()),
            ("drive", self.drive.validate()),
        ];
        for (name, result) in sections {
            result.map_err(|e| ConfigError::ValidationError(format!("[{name}] {e}")))?;
        }
        Ok(())
    }
}

// ─── Cycle ──────────────────────────────────────────────────────────

/// Control tick pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Tick period [ms] (default: 20).
    pub period_ms: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_CYCLE_PERIOD_MS,
        }
    }
}

impl CycleConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.period_ms < CYCLE_PERIOD_MS_MIN || self.period_ms > CYCLE_PERIOD_MS_MAX {
            return Err(format!(
                "period_ms {} out of range [{}, {}]",
                self.period_ms, CYCLE_PERIOD_MS_MIN, CYCLE_PERIOD_MS_MAX
            ));
        }
        Ok(())
    }
}

// ─── Axes ───────────────────────────────────────────────────────────

/// Lift axis tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftConfig {
    /// Position loop gains.
    pub gains: PidGains,
    /// Minimum drive magnitude outside the dead band.
    pub min_power: f64,
    /// Encoder ticks per output unit (reporting only).
    pub ticks_per_unit: f64,
    /// Optional setpoint clamp.
    pub limits: TargetLimits,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            gains: PidGains::new(0.004, 0.0, 0.0004),
            min_power: 0.1,
            ticks_per_unit: 1425.1,
            limits: TargetLimits::NONE,
        }
    }
}

impl LiftConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        validate_axis(&self.gains, self.min_power, self.ticks_per_unit, &self.limits)
    }
}

/// Slide axis tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Position loop gains (leader motor).
    pub gains: PidGains,
    /// Follower synchronization gains (default: disabled).
    pub sync: PidGains,
    /// Minimum drive magnitude outside the dead band.
    pub min_power: f64,
    /// Encoder ticks per output unit (reporting only).
    pub ticks_per_unit: f64,
    /// Manual extension limit while in floor-grab [ticks].
    pub floor_grab_limit: i32,
    /// Manual extension limit in every other mode [ticks].
    pub extend_limit: i32,
    /// Optional setpoint clamp.
    pub limits: TargetLimits,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            gains: PidGains::new(0.015, 0.0, 0.0005),
            sync: PidGains::ZERO,
            min_power: 0.5,
            ticks_per_unit: 384.5,
            floor_grab_limit: 350,
            extend_limit: 2300,
            limits: TargetLimits::NONE,
        }
    }
}

impl SlideConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        validate_axis(&self.gains, self.min_power, self.ticks_per_unit, &self.limits)?;
        self.sync.validate().map_err(|e| format!("sync: {e}"))?;
        if self.floor_grab_limit <= 0 || self.extend_limit <= 0 {
            return Err(format!(
                "manual limits must be positive (floor_grab_limit={}, extend_limit={})",
                self.floor_grab_limit, self.extend_limit
            ));
        }
        Ok(())
    }
}

fn validate_axis(
    gains: &PidGains,
    min_power: f64,
    ticks_per_unit: f64,
    limits: &TargetLimits,
) -> Result<(), String> {
    gains.validate()?;
    if !(0.0..=1.0).contains(&min_power) {
        return Err(format!("min_power {min_power} out of range [0, 1]"));
    }
    if !ticks_per_unit.is_finite() || ticks_per_unit <= 0.0 {
        return Err(format!("ticks_per_unit {ticks_per_unit} must be > 0"));
    }
    limits.validate()
}

// ─── End Effector ───────────────────────────────────────────────────

/// Grab sequence timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabberConfig {
    /// Dwell between grab phases [s] (default: 0.2).
    pub step_delay_s: f64,
}

impl Default for GrabberConfig {
    fn default() -> Self {
        Self { step_delay_s: 0.2 }
    }
}

impl GrabberConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if !self.step_delay_s.is_finite() || self.step_delay_s < 0.0 {
            return Err(format!("step_delay_s {} must be >= 0", self.step_delay_s));
        }
        Ok(())
    }
}

/// Vision-aligned claw rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Alignment enabled at session start.
    pub enabled: bool,
    /// Constant added to the normalized detection value.
    pub offset: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: 0.15,
        }
    }
}

impl AlignmentConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if !self.offset.is_finite() {
            return Err("offset must be finite".to_string());
        }
        Ok(())
    }
}

// ─── Drive ──────────────────────────────────────────────────────────

/// Drivetrain mixing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Rotation scale while speed-limited.
    pub speed_limit: f64,
    /// Speed limit active at session start.
    pub speed_limited: bool,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            speed_limit: 0.517,
            speed_limited: true,
        }
    }
}

impl DriveConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.speed_limit) {
            return Err(format!("speed_limit {} out of range [0, 1]", self.speed_limit));
        }
        Ok(())
    }
}
