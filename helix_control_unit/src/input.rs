//! Operator input for one control tick.
//!
//! Two gamepads: the drive pad (chassis, recovery, speed limit) and the arm
//! pad (modes, claw, rotation, slide). Each tick carries the held button set
//! and the set pressed since the previous tick.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::axis::TriggerInput;

bitflags! {
    /// Digital gamepad buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        const DPAD_UP      = 0x0001;
        const DPAD_DOWN    = 0x0002;
        const DPAD_LEFT    = 0x0004;
        const DPAD_RIGHT   = 0x0008;
        const LEFT_BUMPER  = 0x0010;
        const RIGHT_BUMPER = 0x0020;
        const TRIANGLE     = 0x0040;
        const CROSS        = 0x0080;
        const CIRCLE       = 0x0100;
        const SQUARE       = 0x0200;
        /// Left stick click.
        const LEFT_STICK   = 0x0400;
        /// Right stick click.
        const RIGHT_STICK  = 0x0800;
        const TOUCHPAD     = 0x1000;
        const SHARE        = 0x2000;
        const OPTIONS      = 0x4000;
    }
}

/// Analog stick deflection, each axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stick {
    pub x: f64,
    pub y: f64,
}

/// State of one gamepad at a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadState {
    /// Buttons currently down.
    pub held: Buttons,
    /// Buttons that went down since the previous tick.
    pub pressed: Buttons,
    pub left_trigger: f64,
    pub right_trigger: f64,
    pub left_stick: Stick,
    pub right_stick: Stick,
}

impl GamepadState {
    #[inline]
    pub fn is_held(&self, buttons: Buttons) -> bool {
        self.held.contains(buttons)
    }

    #[inline]
    pub fn just_pressed(&self, buttons: Buttons) -> bool {
        self.pressed.intersects(buttons)
    }

    /// Left trigger raises, right trigger lowers.
    pub fn triggers(&self) -> TriggerInput {
        TriggerInput::new(self.left_trigger, self.right_trigger)
    }
}

/// Everything the tick consumes from the operators and sensors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperatorInput {
    pub drive: GamepadState,
    pub arm: GamepadState,
    /// Raw alignment detection in `[0, 255]`, when the vision sensor has one.
    pub detection: Option<f64>,
}

// ─── Edge Detection ─────────────────────────────────────────────────

/// Derives the pressed set from successive held sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTracker {
    previous: Buttons,
}

impl EdgeTracker {
    /// Fill `state.pressed` from `state.held` and remember the held set.
    pub fn sample(&mut self, mut state: GamepadState) -> GamepadState {
        state.pressed = state.held & !self.previous;
        self.previous = state.held;
        state
    }

    pub fn reset(&mut self) {
        self.previous = Buttons::empty();
    }
}

/// Fires once when every button of a combination becomes held.
#[derive(Debug, Clone, Copy)]
pub struct ComboToggle {
    combo: Buttons,
    last: bool,
}

impl ComboToggle {
    pub const fn new(combo: Buttons) -> Self {
        Self { combo, last: false }
    }

    /// Rising edge of "all combo buttons held".
    pub fn poll(&mut self, held: Buttons) -> bool {
        let active = held.contains(self.combo);
        let fired = active && !self.last;
        self.last = active;
        fired
    }

    pub fn reset(&mut self) {
        self.last = false;
    }
}

// ─── Bindings ───────────────────────────────────────────────────────

/// Which gamepad a binding lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pad {
    Drive,
    Arm,
}

/// Named operator actions and their button bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    FloorGrab,
    SpecimenDrop,
    SpecimenTransition,
    SpecimenGrab,
    HighBasket,
    Neutral,
    SpecScore,
    ClawOpen,
    ClawClose,
    GrabStart,
    GrabStop,
    AlignmentToggle,
    RotateRight,
    RotateLeft,
    Recovery,
    SpeedLimit,
}

/// Drive-pad combination toggling recovery on both axes.
pub const RECOVERY_COMBO: Buttons = Buttons::LEFT_BUMPER
    .union(Buttons::RIGHT_BUMPER)
    .union(Buttons::LEFT_STICK)
    .union(Buttons::RIGHT_STICK);

impl Action {
    pub const fn binding(&self) -> (Pad, Buttons) {
        match self {
            Self::FloorGrab => (Pad::Arm, Buttons::DPAD_DOWN),
            Self::SpecimenDrop => (Pad::Arm, Buttons::LEFT_BUMPER),
            Self::SpecimenTransition => (Pad::Arm, Buttons::DPAD_LEFT),
            Self::SpecimenGrab => (Pad::Arm, Buttons::RIGHT_BUMPER),
            Self::HighBasket => (Pad::Arm, Buttons::DPAD_UP),
            Self::Neutral => (Pad::Arm, Buttons::SHARE),
            Self::SpecScore => (Pad::Arm, Buttons::OPTIONS),
            Self::ClawOpen => (Pad::Arm, Buttons::TRIANGLE),
            Self::ClawClose => (Pad::Arm, Buttons::CROSS),
            Self::GrabStart => (Pad::Arm, Buttons::LEFT_STICK),
            Self::GrabStop => (Pad::Arm, Buttons::RIGHT_STICK),
            Self::AlignmentToggle => (Pad::Arm, Buttons::TOUCHPAD),
            Self::RotateRight => (Pad::Arm, Buttons::CIRCLE),
            Self::RotateLeft => (Pad::Arm, Buttons::SQUARE),
            Self::Recovery => (Pad::Drive, RECOVERY_COMBO),
            Self::SpeedLimit => (Pad::Drive, Buttons::TOUCHPAD),
        }
    }
}
