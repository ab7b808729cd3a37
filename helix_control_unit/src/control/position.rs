//! Single-axis position controller with minimum-power floor.
//!
//! Pipeline per tick:
//! 1. PID on `target − measured`
//! 2. Minimum-power floor outside the ±1 tick dead band
//! 3. Leader command clamped to `[-1, 1]`
//! 4. Optional follower: `raw + sync trim`, clamped independently

use helix_common::consts::{MIN_POWER_DEADBAND_TICKS, POWER_LIMIT};
use helix_common::control::PidGains;
use helix_common::hal::Motor;
use tracing::trace;

use super::pid::PidState;
use super::sync::SyncController;

// ─── DriveOutput ────────────────────────────────────────────────────

/// Commands produced by one controller update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveOutput {
    /// Unclamped command after the minimum-power floor.
    pub raw: f64,
    /// Leader command in `[-1, 1]`.
    pub leader: f64,
    /// Follower command in `[-1, 1]`, present only with a sync loop.
    pub follower: Option<f64>,
}

// ─── PositionController ─────────────────────────────────────────────

/// PID position loop driving one motor, optionally trimming a follower.
#[derive(Debug, Clone)]
pub struct PositionController {
    gains: PidGains,
    min_power: f64,
    target: i32,
    state: PidState,
    sync: Option<SyncController>,
}

impl PositionController {
    /// Create a controller with target 0 and zeroed memory.
    pub fn new(gains: PidGains, min_power: f64) -> Self {
        Self {
            gains,
            min_power,
            target: 0,
            state: PidState::default(),
            sync: None,
        }
    }

    /// Attach a follower synchronization loop.
    pub fn with_sync(mut self, sync: SyncController) -> Self {
        self.sync = Some(sync);
        self
    }

    /// Store a new setpoint. Loop memory is kept.
    #[inline]
    pub fn set_target(&mut self, target: i32) {
        self.target = target;
    }

    #[inline]
    pub const fn target(&self) -> i32 {
        self.target
    }

    #[inline]
    pub const fn min_power(&self) -> f64 {
        self.min_power
    }

    /// Error of the most recent update.
    #[inline]
    pub const fn error(&self) -> f64 {
        self.state.error()
    }

    #[inline]
    pub const fn last_error(&self) -> f64 {
        self.state.last_error()
    }

    #[inline]
    pub const fn integral(&self) -> f64 {
        self.state.integral()
    }

    /// Run one update against measured positions.
    ///
    /// `follower_position` is ignored when no sync loop is attached.
    pub fn compute(&mut self, measured: i32, follower_position: Option<i32>) -> DriveOutput {
        let error = f64::from(self.target) - f64::from(measured);
        let mut raw = self.state.step(&self.gains, error);

        if error > MIN_POWER_DEADBAND_TICKS && raw < self.min_power {
            raw = self.min_power;
        } else if error < -MIN_POWER_DEADBAND_TICKS && raw > -self.min_power {
            raw = -self.min_power;
        }

        let leader = raw.clamp(-POWER_LIMIT, POWER_LIMIT);
        let follower = match (self.sync.as_mut(), follower_position) {
            (Some(sync), Some(position)) => {
                let trim = sync.calculate(measured, position);
                Some((raw + trim).clamp(-POWER_LIMIT, POWER_LIMIT))
            }
            _ => None,
        };

        trace!(
            "target={}, measured={}, error={:.1}, raw={:.4}, leader={:.4}",
            self.target, measured, error, raw, leader
        );

        DriveOutput {
            raw,
            leader,
            follower,
        }
    }

    /// Read the motor, update, and write its power.
    pub fn drive<M: Motor>(&mut self, motor: &mut M) -> DriveOutput {
        let out = self.compute(motor.position(), None);
        motor.set_power(out.leader);
        out
    }

    /// Read both motors, update, and write leader and follower power.
    ///
    /// Without a sync loop the follower receives the leader command.
    pub fn drive_pair<M: Motor>(&mut self, leader: &mut M, follower: &mut M) -> DriveOutput {
        let out = self.compute(leader.position(), Some(follower.position()));
        leader.set_power(out.leader);
        follower.set_power(out.follower.unwrap_or(out.leader));
        out
    }

    /// Zero error, last error and integral. The target is kept.
    pub fn reset(&mut self) {
        self.state.reset();
        if let Some(sync) = self.sync.as_mut() {
            sync.reset();
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
