//! Dual-motor slide axis.
//!
//! The leader motor closes the position loop; the follower receives the same
//! command plus a synchronization trim. Sequencer targets are applied even
//! while recovering, only the loop itself is suspended.

use helix_common::control::TargetLimits;
use helix_common::hal::Motor;
use helix_common::robot::SlideConfig;
use tracing::debug;

use super::TriggerInput;
use crate::control::position::PositionController;
use crate::control::sync::SyncController;
use crate::subsystem::Subsystem;

/// Slide axis.
#[derive(Debug)]
pub struct Slide<M: Motor> {
    leader: M,
    follower: M,
    controller: PositionController,
    limits: TargetLimits,
    ticks_per_unit: f64,
    recovering: bool,
}

impl<M: Motor> Slide<M> {
    pub fn new(leader: M, follower: M, config: &SlideConfig) -> Self {
        let controller = PositionController::new(config.gains, config.min_power)
            .with_sync(SyncController::new(config.sync));
        Self {
            leader,
            follower,
            controller,
            limits: config.limits,
            ticks_per_unit: config.ticks_per_unit,
            recovering: false,
        }
    }

    /// Store a new setpoint.
    pub fn set_target(&mut self, target: i32) {
        self.controller.set_target(self.limits.apply(target));
    }

    #[inline]
    pub fn target(&self) -> i32 {
        self.controller.target()
    }

    /// Leader encoder position [ticks].
    #[inline]
    pub fn position(&self) -> i32 {
        self.leader.position()
    }

    /// Follower encoder position [ticks].
    #[inline]
    pub fn follower_position(&self) -> i32 {
        self.follower.position()
    }

    pub fn position_units(&self) -> f64 {
        f64::from(self.leader.position()) / self.ticks_per_unit
    }

    #[inline]
    pub fn is_recovering(&self) -> bool {
        self.recovering
    }

    pub fn controller(&self) -> &PositionController {
        &self.controller
    }

    pub fn leader(&self) -> &M {
        &self.leader
    }

    pub fn follower(&self) -> &M {
        &self.follower
    }

    /// Full power outwards on both motors.
    pub fn move_up(&mut self) {
        self.set_power(1.0);
    }

    /// Full power inwards on both motors.
    pub fn move_down(&mut self) {
        self.set_power(-1.0);
    }

    /// Flip the recovery flag. Entering recovery re-zeros both encoders and
    /// clears the loop memory, which refers to the old origin.
    pub fn toggle_recovery_mode(&mut self) {
        self.recovering = !self.recovering;
        if self.recovering {
            self.leader.reset_encoder();
            self.follower.reset_encoder();
            self.controller.reset();
        }
        debug!("Slide recovery mode: {}", self.recovering);
    }

    /// Trigger drive bounded by `limit` unless recovering.
    ///
    /// With no trigger acting, the current position becomes the target and
    /// the loop runs once to hold it.
    pub fn handle_manual_control(&mut self, triggers: TriggerInput, limit: i32) {
        let position = self.leader.position();
        if triggers.raise > 0.0 && (position < limit || self.recovering) {
            self.set_power(triggers.raise);
        } else if triggers.lower > 0.0 && (position > 0 || self.recovering) {
            self.set_power(-triggers.lower);
        } else {
            self.set_target(position);
            self.controller
                .drive_pair(&mut self.leader, &mut self.follower);
        }
    }

    fn set_power(&mut self, power: f64) {
        self.leader.set_power(power);
        self.follower.set_power(power);
    }
}

impl<M: Motor> Subsystem for Slide<M> {
    fn initialize(&mut self) {
        self.leader.reset_encoder();
        self.follower.reset_encoder();
        self.controller.set_target(0);
        self.controller.reset();
        self.recovering = false;
    }

    fn update(&mut self) {
        if !self.recovering {
            self.controller
                .drive_pair(&mut self.leader, &mut self.follower);
        }
    }

    fn reset(&mut self) {
        self.set_target(0);
    }

    fn stop(&mut self) {
        self.set_power(0.0);
    }
}
