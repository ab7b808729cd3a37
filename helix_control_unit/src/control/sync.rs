//! Leader/follower synchronization loop.
//!
//! Keeps two motors sharing one mechanical degree of freedom from drifting
//! apart. The returned trim is intentionally unclamped; the consuming
//! [`PositionController`](super::position::PositionController) adds it to the
//! follower's command and clamps the sum.

use helix_common::control::PidGains;

use super::pid::PidState;

/// PID on `leader − follower` producing a follower trim.
#[derive(Debug, Clone)]
pub struct SyncController {
    gains: PidGains,
    state: PidState,
}

impl SyncController {
    /// Create a controller with zeroed memory.
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            state: PidState::default(),
        }
    }

    /// Gains in use.
    #[inline]
    pub const fn gains(&self) -> &PidGains {
        &self.gains
    }

    /// Loop memory.
    #[inline]
    pub const fn state(&self) -> &PidState {
        &self.state
    }

    /// Compute the trim for one tick.
    pub fn calculate(&mut self, leader_position: i32, follower_position: i32) -> f64 {
        let error = f64::from(leader_position) - f64::from(follower_position);
        self.state.step(&self.gains, error)
    }

    /// Zero the loop memory.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}
