//! Mecanum drivetrain.
//!
//! The right stick translates and the left stick rotates. With the speed
//! limit on, the rotation contribution is scaled down.

use std::f64::consts::PI;

use helix_common::consts::POWER_LIMIT;
use helix_common::hal::{DeviceSource, HalError, Motor, names};
use helix_common::robot::DriveConfig;
use serde::Serialize;
use tracing::debug;

use crate::input::Stick;
use crate::subsystem::Subsystem;

/// Per-wheel power commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WheelPowers {
    pub left_front: f64,
    pub right_front: f64,
    pub left_rear: f64,
    pub right_rear: f64,
}

impl WheelPowers {
    pub const ZERO: Self = Self {
        left_front: 0.0,
        right_front: 0.0,
        left_rear: 0.0,
        right_rear: 0.0,
    };

    fn clamped(self) -> Self {
        let c = |v: f64| v.clamp(-POWER_LIMIT, POWER_LIMIT);
        Self {
            left_front: c(self.left_front),
            right_front: c(self.right_front),
            left_rear: c(self.left_rear),
            right_rear: c(self.right_rear),
        }
    }
}

/// Mix stick inputs into wheel powers.
///
/// `translate` and `rotate` are raw gamepad sticks (y positive down).
pub fn mecanum(translate: Stick, rotate: Stick, rotation_scale: f64) -> WheelPowers {
    let x = translate.x;
    let y = -translate.y;
    let r = x.hypot(y);
    let angle = y.atan2(x) + 3.0 * PI / 4.0;
    let turn_x = rotation_scale * rotate.x;
    let turn_y = rotation_scale * rotate.y;

    WheelPowers {
        left_front: r * angle.cos() - turn_x + turn_y,
        right_front: r * angle.sin() + turn_x + turn_y,
        left_rear: r * angle.sin() - turn_x + turn_y,
        right_rear: r * angle.cos() + turn_x + turn_y,
    }
    .clamped()
}

/// Four-motor mecanum chassis.
#[derive(Debug)]
pub struct Drive<M: Motor> {
    left_front: M,
    right_front: M,
    left_rear: M,
    right_rear: M,
    speed_limit: f64,
    speed_limited: bool,
    initially_limited: bool,
    translate: Stick,
    rotate: Stick,
}

impl<M: Motor> Drive<M> {
    /// Resolve the four wheel motors by name.
    pub fn bind<D>(devices: &D, config: &DriveConfig) -> Result<Self, HalError>
    where
        D: DeviceSource<Motor = M>,
    {
        Ok(Self {
            left_front: devices.motor(names::LEFT_FRONT)?,
            right_front: devices.motor(names::RIGHT_FRONT)?,
            left_rear: devices.motor(names::LEFT_REAR)?,
            right_rear: devices.motor(names::RIGHT_REAR)?,
            speed_limit: config.speed_limit,
            speed_limited: config.speed_limited,
            initially_limited: config.speed_limited,
            translate: Stick::default(),
            rotate: Stick::default(),
        })
    }

    pub fn toggle_speed_limit(&mut self) {
        self.speed_limited = !self.speed_limited;
        debug!("Drive speed limit: {}", self.speed_limited);
    }

    #[inline]
    pub fn is_speed_limited(&self) -> bool {
        self.speed_limited
    }

    /// Latch stick inputs for the next [`Subsystem::update`].
    pub fn set_sticks(&mut self, translate: Stick, rotate: Stick) {
        self.translate = translate;
        self.rotate = rotate;
    }

    pub fn set_motor_powers(&mut self, powers: WheelPowers) {
        self.left_front.set_power(powers.left_front);
        self.right_front.set_power(powers.right_front);
        self.left_rear.set_power(powers.left_rear);
        self.right_rear.set_power(powers.right_rear);
    }

    fn rotation_scale(&self) -> f64 {
        if self.speed_limited {
            self.speed_limit
        } else {
            1.0
        }
    }
}

impl<M: Motor> Subsystem for Drive<M> {
    fn initialize(&mut self) {
        self.speed_limited = self.initially_limited;
        self.set_sticks(Stick::default(), Stick::default());
        self.set_motor_powers(WheelPowers::ZERO);
    }

    fn update(&mut self) {
        let powers = mecanum(self.translate, self.rotate, self.rotation_scale());
        self.set_motor_powers(powers);
    }

    fn reset(&mut self) {
        self.set_motor_powers(WheelPowers::ZERO);
    }

    fn stop(&mut self) {
        self.set_motor_powers(WheelPowers::ZERO);
    }
}
