//! Iteration-based PID loop state.
//!
//! One step per control tick: the integral is a plain running sum of errors
//! and the derivative a plain difference of successive errors. There is no
//! `dt` scaling and no anti-windup; bounding happens only at the consumer's
//! output clamp.

use helix_common::control::PidGains;

/// Internal memory of one PID loop.
///
/// Persists across ticks until [`PidState::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidState {
    /// Error of the most recent step.
    error: f64,
    /// Error of the step before the current one (for derivative).
    last_error: f64,
    /// Running sum of every error since the last reset.
    integral: f64,
}

impl PidState {
    /// Reset all internal state to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Error of the most recent step.
    #[inline]
    pub const fn error(&self) -> f64 {
        self.error
    }

    /// Error fed to the derivative on the next step.
    #[inline]
    pub const fn last_error(&self) -> f64 {
        self.last_error
    }

    /// Accumulated integral.
    #[inline]
    pub const fn integral(&self) -> f64 {
        self.integral
    }

    /// Run one PID step for `error` and return the unclamped output.
    #[inline]
    pub fn step(&mut self, gains: &PidGains, error: f64) -> f64 {
        self.error = error;
        self.integral += error;
        let derivative = error - self.last_error;
        self.last_error = error;

        gains.kp * error + gains.ki * self.integral + gains.kd * derivative
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
