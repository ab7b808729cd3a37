//! Robot operating modes.
//!
//! Exactly one [`OperatingMode`] is active at a time. Modes are selected only
//! by external command; finishing a mode's phase sequence leaves the robot
//! parked in that mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level task the robot is currently performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OperatingMode {
    /// Approach the floor and run the end-effector grab sequence.
    FloorGrab = 0,
    /// Take a specimen off the wall.
    SpecimenGrab = 1,
    /// Carry a specimen towards the bar.
    SpecimenTransition = 2,
    /// Release a specimen on the bar.
    SpecimenDrop = 3,
    /// Present the end effector over the high basket.
    HighBasket = 4,
    /// Score a specimen (no configured sequence).
    SpecScore = 5,
    /// Retract everything to a stowed pose.
    Neutral = 6,
}

impl OperatingMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::FloorGrab,
        Self::SpecimenGrab,
        Self::SpecimenTransition,
        Self::SpecimenDrop,
        Self::HighBasket,
        Self::SpecScore,
        Self::Neutral,
    ];

    /// Mode entered at session start.
    pub const DEFAULT: Self = Self::FloorGrab;

    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::FloorGrab),
            1 => Some(Self::SpecimenGrab),
            2 => Some(Self::SpecimenTransition),
            3 => Some(Self::SpecimenDrop),
            4 => Some(Self::HighBasket),
            5 => Some(Self::SpecScore),
            6 => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Stable display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FloorGrab => "floor_grab",
            Self::SpecimenGrab => "specimen_grab",
            Self::SpecimenTransition => "specimen_transition",
            Self::SpecimenDrop => "specimen_drop",
            Self::HighBasket => "high_basket",
            Self::SpecScore => "spec_score",
            Self::Neutral => "neutral",
        }
    }
}

impl Default for OperatingMode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
