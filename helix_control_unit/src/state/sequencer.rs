//! Operating-mode sequencer.
//!
//! Exactly one mode is active. Transitions happen only through
//! [`Sequencer::set_state`]; entering a different mode discards the previous
//! [`PhaseContext`] and starts a fresh one. Re-entering the active mode is a
//! no-op so a held button does not restart the sequence.

use std::time::Duration;

use helix_common::hal::{Motor, Servo};
use helix_common::mode::OperatingMode;
use tracing::{debug, trace};

use super::phase::{ModePolicy, PhaseContext, apply_all};
use super::table::{
    FLOOR_GRAB_LIFT_TARGET, FLOOR_GRAB_SLIDE_GUARD, GRAB_DONE_SLIDE_TARGET, policy,
};
use crate::effector::grabber::GrabberPreset;
use crate::mechanisms::Mechanisms;

/// Result of a mode change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Mode changed; phase progress restarted.
    Entered(OperatingMode),
    /// Already in the requested mode; nothing changed.
    Unchanged(OperatingMode),
}

/// Mode FSM with per-mode phase progress.
#[derive(Debug, Clone)]
pub struct Sequencer {
    mode: OperatingMode,
    context: PhaseContext,
}

impl Sequencer {
    /// Sequencer in the default mode.
    pub fn new(now: Duration) -> Self {
        Self {
            mode: OperatingMode::DEFAULT,
            context: PhaseContext::entered_at(now),
        }
    }

    /// Return to the default mode with fresh phase progress.
    pub fn initialize(&mut self, now: Duration) {
        self.mode = OperatingMode::DEFAULT;
        self.context = PhaseContext::entered_at(now);
    }

    /// Request a mode. No exit actions run for the previous mode.
    pub fn set_state(&mut self, mode: OperatingMode, now: Duration) -> ModeTransition {
        if mode == self.mode {
            return ModeTransition::Unchanged(mode);
        }
        debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.context = PhaseContext::entered_at(now);
        ModeTransition::Entered(mode)
    }

    #[inline]
    pub const fn mode(&self) -> OperatingMode {
        self.mode
    }

    #[inline]
    pub const fn phase_index(&self) -> usize {
        self.context.index
    }

    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.context.complete
    }

    pub const fn context(&self) -> &PhaseContext {
        &self.context
    }

    /// Time in the current phase.
    pub fn phase_elapsed(&self, now: Duration) -> Duration {
        self.context.timer.elapsed(now)
    }

    /// Run the active mode's policy once.
    pub fn update<M: Motor, S: Servo>(&mut self, mech: &mut Mechanisms<M, S>, now: Duration) {
        match policy(self.mode) {
            ModePolicy::Timed(steps) => {
                if self.context.complete {
                    return;
                }
                let Some(step) = steps.get(self.context.index) else {
                    self.context.finish(now);
                    return;
                };
                if step.gate.is_open(&self.context.timer, now) {
                    apply_all(step.commands, mech);
                    self.context.advance(steps.len(), now);
                    trace!(
                        "{}: phase -> {} (complete={})",
                        self.mode, self.context.index, self.context.complete
                    );
                }
            }
            ModePolicy::OneShot { guard, commands } => {
                if !self.context.complete && guard.holds(mech) {
                    apply_all(commands, mech);
                    self.context.finish(now);
                }
            }
            ModePolicy::Continuous => self.update_floor_grab(mech, now),
            ModePolicy::Parked => {}
        }
    }

    fn update_floor_grab<M: Motor, S: Servo>(&mut self, mech: &mut Mechanisms<M, S>, now: Duration) {
        if mech.slide.position() < FLOOR_GRAB_SLIDE_GUARD {
            mech.lift.set_target(FLOOR_GRAB_LIFT_TARGET);
            mech.slide.set_target(0);
        }

        if mech.grabber.is_grabbing() {
            if mech.grabber.update_floor_grab(now) {
                mech.slide.set_target(GRAB_DONE_SLIDE_TARGET);
            }
        } else {
            mech.grabber.apply_preset(GrabberPreset::FloorGrabHover);
        }

        if !self.context.complete {
            self.context.finish(now);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
