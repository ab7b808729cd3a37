//! Phase tables: the data each operating mode runs on.
//!
//! A mode's behaviour is a [`ModePolicy`]. Timed policies carry an ordered
//! table of [`Step`]s, each a gate plus the commands issued when the gate
//! opens. Commands are plain data applied to [`Mechanisms`].

use std::time::Duration;

use helix_common::hal::{Motor, Servo};

use super::timer::PhaseTimer;
use crate::effector::grabber::{GrabberPreset, PoseUpdate};
use crate::mechanisms::Mechanisms;

// ─── Commands ───────────────────────────────────────────────────────

/// One actuator-level instruction issued by a phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Lift setpoint [ticks].
    LiftTarget(i32),
    /// Slide setpoint [ticks].
    SlideTarget(i32),
    /// Sparse servo update.
    Pose(PoseUpdate),
    /// Named end-effector configuration.
    Preset(GrabberPreset),
}

impl Command {
    pub fn apply<M: Motor, S: Servo>(&self, mech: &mut Mechanisms<M, S>) {
        match *self {
            Self::LiftTarget(t) => mech.lift.set_target(t),
            Self::SlideTarget(t) => mech.slide.set_target(t),
            Self::Pose(ref pose) => mech.grabber.apply_pose(pose),
            Self::Preset(preset) => mech.grabber.apply_preset(preset),
        }
    }
}

/// Apply a command list in order.
pub fn apply_all<M: Motor, S: Servo>(commands: &[Command], mech: &mut Mechanisms<M, S>) {
    for command in commands {
        command.apply(mech);
    }
}

// ─── Gates and Guards ───────────────────────────────────────────────

/// Condition for a timed step to fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Fires on the first update in the phase.
    Immediate,
    /// Fires once strictly more than this many seconds passed in the phase.
    After(f64),
}

impl Gate {
    #[inline]
    pub fn is_open(&self, timer: &PhaseTimer, now: Duration) -> bool {
        match *self {
            Self::Immediate => true,
            Self::After(seconds) => timer.exceeds(now, seconds),
        }
    }
}

/// Mechanism-state condition for a single-shot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// Slide leader position strictly below the given ticks.
    SlideBelow(i32),
}

impl Guard {
    pub fn holds<M: Motor, S: Servo>(&self, mech: &Mechanisms<M, S>) -> bool {
        match *self {
            Self::Always => true,
            Self::SlideBelow(limit) => mech.slide.position() < limit,
        }
    }
}

// ─── Steps and Policies ─────────────────────────────────────────────

/// One row of a timed table.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub gate: Gate,
    pub commands: &'static [Command],
}

/// How a mode advances.
#[derive(Debug, Clone, Copy)]
pub enum ModePolicy {
    /// Ordered steps; the last sets complete and parks the index at 0.
    Timed(&'static [Step]),
    /// One guarded combined step.
    OneShot {
        guard: Guard,
        commands: &'static [Command],
    },
    /// Floor grab: reasserted every tick, never gated by completion.
    Continuous,
    /// No actions.
    Parked,
}

// ─── PhaseContext ───────────────────────────────────────────────────

/// Progress through the active mode. Built fresh on every mode entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseContext {
    pub index: usize,
    pub complete: bool,
    pub timer: PhaseTimer,
}

impl PhaseContext {
    pub const fn entered_at(now: Duration) -> Self {
        Self {
            index: 0,
            complete: false,
            timer: PhaseTimer::started_at(now),
        }
    }

    /// Move to the next row, or finish when `index` was the last one.
    pub fn advance(&mut self, len: usize, now: Duration) {
        if self.index + 1 >= len {
            self.index = 0;
            self.complete = true;
        } else {
            self.index += 1;
        }
        self.timer.reset(now);
    }

    /// Finish without stepping through a table.
    pub fn finish(&mut self, now: Duration) {
        self.index = 0;
        self.complete = true;
        self.timer.reset(now);
    }
}
