//! Single-motor lift axis.
//!
//! While recovering, sequencer targets are dropped and the operator drives
//! the motor directly through [`Lift::handle_manual_control`].

use helix_common::control::TargetLimits;
use helix_common::hal::Motor;
use helix_common::robot::LiftConfig;
use tracing::debug;

use super::TriggerInput;
use crate::control::position::PositionController;
use crate::subsystem::Subsystem;

/// Lift axis.
#[derive(Debug)]
pub struct Lift<M: Motor> {
    motor: M,
    controller: PositionController,
    limits: TargetLimits,
    ticks_per_unit: f64,
    recovering: bool,
}

impl<M: Motor> Lift<M> {
    pub fn new(motor: M, config: &LiftConfig) -> Self {
        Self {
            motor,
            controller: PositionController::new(config.gains, config.min_power),
            limits: config.limits,
            ticks_per_unit: config.ticks_per_unit,
            recovering: false,
        }
    }

    /// Store a new setpoint. Ignored while recovering.
    pub fn set_target(&mut self, target: i32) {
        if !self.recovering {
            self.controller.set_target(self.limits.apply(target));
        }
    }

    #[inline]
    pub fn target(&self) -> i32 {
        self.controller.target()
    }

    /// Encoder position [ticks].
    #[inline]
    pub fn position(&self) -> i32 {
        self.motor.position()
    }

    /// Encoder position in output units.
    pub fn position_units(&self) -> f64 {
        f64::from(self.motor.position()) / self.ticks_per_unit
    }

    #[inline]
    pub fn is_recovering(&self) -> bool {
        self.recovering
    }

    pub fn controller(&self) -> &PositionController {
        &self.controller
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Flip the recovery flag. Entering recovery re-zeros the encoder.
    pub fn toggle_recovery_mode(&mut self) {
        self.recovering = !self.recovering;
        if self.recovering {
            self.motor.reset_encoder();
        }
        debug!("Lift recovery mode: {}", self.recovering);
    }

    /// Raw trigger drive, honoured only while recovering.
    pub fn handle_manual_control(&mut self, triggers: TriggerInput) {
        if !self.recovering {
            return;
        }
        let power = if triggers.raise > 0.0 {
            triggers.raise
        } else if triggers.lower > 0.0 {
            -triggers.lower
        } else {
            0.0
        };
        self.motor.set_power(power);
    }
}

impl<M: Motor> Subsystem for Lift<M> {
    fn initialize(&mut self) {
        self.motor.reset_encoder();
        self.controller.set_target(0);
        self.controller.reset();
        self.recovering = false;
    }

    fn update(&mut self) {
        if !self.recovering {
            self.controller.drive(&mut self.motor);
        }
    }

    fn reset(&mut self) {
        self.set_target(0);
    }

    fn stop(&mut self) {
        self.motor.set_power(0.0);
    }
}
