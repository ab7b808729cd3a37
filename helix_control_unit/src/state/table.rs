//! Per-mode phase tables of the competition robot.

use helix_common::mode::OperatingMode;

use super::phase::{Command, Gate, Guard, ModePolicy, Step};
use crate::effector::grabber::{GrabberPreset, PoseUpdate};

/// Floor grab reasserts its axis targets while the slide is below this.
pub const FLOOR_GRAB_SLIDE_GUARD: i32 = 200;
/// Lift setpoint held during floor grab [ticks].
pub const FLOOR_GRAB_LIFT_TARGET: i32 = -1660;
/// Slide setpoint once a floor grab finishes [ticks].
pub const GRAB_DONE_SLIDE_TARGET: i32 = 25;
/// Lift setpoint of the stowed and scoring modes [ticks].
pub const LIFT_STOW_TARGET: i32 = -50;

const NEUTRAL: &[Step] = &[
    Step {
        gate: Gate::Immediate,
        commands: &[Command::SlideTarget(0)],
    },
    Step {
        gate: Gate::After(1.0),
        commands: &[Command::LiftTarget(LIFT_STOW_TARGET)],
    },
    Step {
        gate: Gate::After(1.0),
        commands: &[Command::Pose(PoseUpdate::elbows(0.0))],
    },
    Step {
        gate: Gate::After(1.0),
        commands: &[Command::Pose(
            PoseUpdate::EMPTY.with_wrist(1.0).with_rotate(0.0),
        )],
    },
];

const SPECIMEN_GRAB: &[Step] = &[
    Step {
        gate: Gate::Immediate,
        commands: &[
            Command::SlideTarget(0),
            Command::LiftTarget(LIFT_STOW_TARGET),
        ],
    },
    Step {
        gate: Gate::After(0.2),
        commands: &[Command::Preset(GrabberPreset::SpecimenGrab)],
    },
];

const SPECIMEN_TRANSITION: &[Step] = &[
    Step {
        gate: Gate::Immediate,
        commands: &[
            Command::SlideTarget(0),
            Command::LiftTarget(LIFT_STOW_TARGET),
            Command::Pose(PoseUpdate::EMPTY.with_wrist(1.0)),
        ],
    },
    Step {
        gate: Gate::After(0.4),
        commands: &[Command::Preset(GrabberPreset::SpecimenTransition)],
    },
];

const SPECIMEN_DROP: &[Command] = &[Command::Preset(GrabberPreset::SpecimenDrop)];

const HIGH_BASKET: &[Command] = &[
    Command::LiftTarget(LIFT_STOW_TARGET),
    Command::Preset(GrabberPreset::HighBasket),
];

/// Policy for `mode`.
pub fn policy(mode: OperatingMode) -> ModePolicy {
    match mode {
        OperatingMode::FloorGrab => ModePolicy::Continuous,
        OperatingMode::SpecimenGrab => ModePolicy::Timed(SPECIMEN_GRAB),
        OperatingMode::SpecimenTransition => ModePolicy::Timed(SPECIMEN_TRANSITION),
        OperatingMode::SpecimenDrop => ModePolicy::OneShot {
            guard: Guard::Always,
            commands: SPECIMEN_DROP,
        },
        OperatingMode::HighBasket => ModePolicy::OneShot {
            guard: Guard::SlideBelow(FLOOR_GRAB_SLIDE_GUARD),
            commands: HIGH_BASKET,
        },
        OperatingMode::SpecScore => ModePolicy::Parked,
        OperatingMode::Neutral => ModePolicy::Timed(NEUTRAL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_tables_open_with_an_immediate_step() {
        for mode in OperatingMode::ALL {
            if let ModePolicy::Timed(steps) = policy(mode) {
                assert!(!steps.is_empty());
                assert_eq!(steps[0].gate, Gate::Immediate, "{mode}");
                assert!(steps[1..].iter().all(|s| s.gate != Gate::Immediate));
            }
        }
    }

    #[test]
    fn only_floor_grab_is_continuous() {
        for mode in OperatingMode::ALL {
            let continuous = matches!(policy(mode), ModePolicy::Continuous);
            assert_eq!(continuous, mode == OperatingMode::FloorGrab);
        }
    }
}
