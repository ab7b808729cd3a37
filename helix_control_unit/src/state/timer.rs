//! Phase timer polled against the session clock.
//!
//! The clock is sampled once per tick by the caller and passed in as time
//! since session start, so the timer itself holds no clock handle.

use std::time::Duration;

/// Elapsed-time tracker reset on every phase advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimer {
    started: Duration,
}

impl PhaseTimer {
    /// Timer started at `now`.
    pub const fn started_at(now: Duration) -> Self {
        Self { started: now }
    }

    /// Restart at `now`.
    #[inline]
    pub fn reset(&mut self, now: Duration) {
        self.started = now;
    }

    /// Time since the last reset. Saturates at zero if `now` is earlier.
    #[inline]
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started)
    }

    /// Strictly more than `seconds` have passed since the last reset.
    #[inline]
    pub fn exceeds(&self, now: Duration, seconds: f64) -> bool {
        self.elapsed(now).as_secs_f64() > seconds
    }
}
