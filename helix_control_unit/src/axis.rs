//! Position-controlled axes.
//!
//! - [`lift::Lift`] - single motor, recovery gates sequencer targets
//! - [`slide::Slide`] - leader/follower pair with synchronization trim
//!
//! Both axes expose a recovery flag: while set, the position loop is not run
//! and the operator drives the motors directly.

pub mod lift;
pub mod slide;

/// Analog trigger pair used for manual axis drive.
///
/// Magnitudes are in `[0, 1]`; a trigger counts as active when above zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriggerInput {
    /// Extend / raise magnitude.
    pub raise: f64,
    /// Retract / lower magnitude.
    pub lower: f64,
}

impl TriggerInput {
    /// Both triggers released.
    pub const RELEASED: Self = Self {
        raise: 0.0,
        lower: 0.0,
    };

    pub const fn new(raise: f64, lower: f64) -> Self {
        Self { raise, lower }
    }

    /// Whether either trigger is pressed.
    #[inline]
    pub fn any(&self) -> bool {
        self.raise > 0.0 || self.lower > 0.0
    }
}
