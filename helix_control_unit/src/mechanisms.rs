//! Bound mechanisms addressed by the mode sequencer.

use helix_common::hal::{DeviceSource, HalError, Motor, Servo, names};
use helix_common::robot::RobotConfig;

use crate::axis::lift::Lift;
use crate::axis::slide::Slide;
use crate::effector::grabber::{Grabber, GrabberServos};
use crate::subsystem::Subsystem;

/// Lift, slide and end effector of one robot.
#[derive(Debug)]
pub struct Mechanisms<M: Motor, S: Servo> {
    pub lift: Lift<M>,
    pub slide: Slide<M>,
    pub grabber: Grabber<S>,
}

impl<M: Motor, S: Servo> Mechanisms<M, S> {
    /// Resolve every mechanism device by name.
    ///
    /// # Errors
    /// Returns the first `HalError` raised by the device source.
    pub fn bind<D>(devices: &D, config: &RobotConfig) -> Result<Self, HalError>
    where
        D: DeviceSource<Motor = M, Servo = S>,
    {
        let lift = Lift::new(devices.motor(names::LIFT)?, &config.lift);
        let slide = Slide::new(
            devices.motor(names::SLIDE_LEADER)?,
            devices.motor(names::SLIDE_FOLLOWER)?,
            &config.slide,
        );
        let servos = GrabberServos {
            claw: devices.servo(names::CLAW)?,
            rotate: devices.servo(names::ROTATE)?,
            elbow_1: devices.servo(names::ELBOW_1)?,
            elbow_2: devices.servo(names::ELBOW_2)?,
            wrist: devices.servo(names::WRIST)?,
        };
        Ok(Self {
            lift,
            slide,
            grabber: Grabber::new(servos, &config.grabber),
        })
    }

    /// Flip recovery on both axes together.
    pub fn toggle_recovery_mode(&mut self) {
        self.lift.toggle_recovery_mode();
        self.slide.toggle_recovery_mode();
    }

    /// Recovery state, as reported by the lift.
    #[inline]
    pub fn is_recovering(&self) -> bool {
        self.lift.is_recovering()
    }

    pub fn initialize(&mut self) {
        self.lift.initialize();
        self.slide.initialize();
        self.grabber.initialize();
    }

    pub fn stop(&mut self) {
        self.lift.stop();
        self.slide.stop();
        self.grabber.stop();
    }
}
