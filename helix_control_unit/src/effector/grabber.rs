//! End-effector servos and the floor grab sequence.
//!
//! Five servos: claw, rotate, two elbows (always written together by the
//! presets) and wrist. The floor grab runs as a nested phase machine:
//!
//! ```text
//! PoseForGrab ─▶ Closing ─▶ Lifting ─▶ Settling ─▶ done
//!   (now)       (> delay)  (> delay)   (> delay)
//! ```
//!
//! Each phase after the first waits for strictly more than the step delay
//! since the previous phase fired.

use std::time::Duration;

use helix_common::hal::Servo;
use helix_common::robot::GrabberConfig;
use serde::Serialize;
use tracing::debug;

use crate::state::timer::PhaseTimer;
use crate::subsystem::Subsystem;

// ─── Positions ──────────────────────────────────────────────────────

/// Claw open position.
pub const CLAW_OPEN: f64 = 0.95;
/// Claw closed position.
pub const CLAW_CLOSED: f64 = 0.73;

/// Rotation detents, left to right.
pub const ROTATE_DETENTS: [f64; 4] = [0.23, 0.39, 0.52, 0.65];

const GRAB_ELBOW: f64 = 0.48;
const HOVER_ELBOW: f64 = 0.6;
const LEVEL_WRIST: f64 = 1.0;

// ─── PoseUpdate ─────────────────────────────────────────────────────

/// Sparse servo update: only present fields are written.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseUpdate {
    pub claw: Option<f64>,
    pub rotate: Option<f64>,
    pub elbow_1: Option<f64>,
    pub elbow_2: Option<f64>,
    pub wrist: Option<f64>,
}

impl PoseUpdate {
    /// No fields present.
    pub const EMPTY: Self = Self {
        claw: None,
        rotate: None,
        elbow_1: None,
        elbow_2: None,
        wrist: None,
    };

    /// Both elbows to the same position.
    pub const fn elbows(position: f64) -> Self {
        Self {
            elbow_1: Some(position),
            elbow_2: Some(position),
            ..Self::EMPTY
        }
    }

    pub const fn with_claw(mut self, position: f64) -> Self {
        self.claw = Some(position);
        self
    }

    pub const fn with_rotate(mut self, position: f64) -> Self {
        self.rotate = Some(position);
        self
    }

    pub const fn with_wrist(mut self, position: f64) -> Self {
        self.wrist = Some(position);
        self
    }
}

// ─── Presets ────────────────────────────────────────────────────────

/// Named end-effector configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrabberPreset {
    /// Hover over the floor with the claw open.
    FloorGrabHover,
    SpecimenGrab,
    SpecimenTransition,
    SpecimenDrop,
    HighBasket,
}

impl GrabberPreset {
    /// Servo positions written by this preset.
    ///
    /// The hover preset additionally opens the claw, which also clears the
    /// closed flag; see [`Grabber::apply_preset`].
    pub const fn pose(&self) -> PoseUpdate {
        match self {
            Self::FloorGrabHover => PoseUpdate::elbows(HOVER_ELBOW).with_wrist(LEVEL_WRIST),
            Self::SpecimenGrab => PoseUpdate::elbows(0.99)
                .with_wrist(0.73)
                .with_rotate(ROTATE_DETENTS[0]),
            Self::SpecimenTransition => PoseUpdate::elbows(0.3).with_wrist(0.4).with_rotate(0.8),
            Self::SpecimenDrop => PoseUpdate::elbows(0.12),
            Self::HighBasket => PoseUpdate::elbows(0.5)
                .with_wrist(0.2)
                .with_rotate(ROTATE_DETENTS[2]),
        }
    }

    const fn opens_claw(&self) -> bool {
        matches!(self, Self::FloorGrabHover)
    }
}

// ─── Grab Phases ────────────────────────────────────────────────────

/// Phase of the floor grab sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrabPhase {
    /// Lower the elbows onto the piece. Fires immediately.
    #[default]
    PoseForGrab = 0,
    /// Close the claw.
    Closing = 1,
    /// Raise the elbows back to hover.
    Lifting = 2,
    /// Final dwell before reporting done.
    Settling = 3,
}

impl GrabPhase {
    #[inline]
    pub const fn index(&self) -> u8 {
        *self as u8
    }
}

// ─── Grabber ────────────────────────────────────────────────────────

/// End effector.
#[derive(Debug)]
pub struct Grabber<S: Servo> {
    claw: S,
    rotate: S,
    elbow_1: S,
    elbow_2: S,
    wrist: S,
    step_delay_s: f64,
    grabbing: bool,
    claw_closed: bool,
    phase: GrabPhase,
    done: bool,
    rotate_index: usize,
    timer: PhaseTimer,
}

/// Servo handles in binding order.
#[derive(Debug)]
pub struct GrabberServos<S: Servo> {
    pub claw: S,
    pub rotate: S,
    pub elbow_1: S,
    pub elbow_2: S,
    pub wrist: S,
}

impl<S: Servo> Grabber<S> {
    pub fn new(servos: GrabberServos<S>, config: &GrabberConfig) -> Self {
        Self {
            claw: servos.claw,
            rotate: servos.rotate,
            elbow_1: servos.elbow_1,
            elbow_2: servos.elbow_2,
            wrist: servos.wrist,
            step_delay_s: config.step_delay_s,
            grabbing: false,
            claw_closed: false,
            phase: GrabPhase::PoseForGrab,
            done: false,
            rotate_index: 0,
            timer: PhaseTimer::default(),
        }
    }

    /// Write every present field of `pose`.
    pub fn apply_pose(&mut self, pose: &PoseUpdate) {
        if let Some(p) = pose.claw {
            self.claw.set_position(p);
        }
        if let Some(p) = pose.rotate {
            self.rotate.set_position(p);
        }
        if let Some(p) = pose.elbow_1 {
            self.elbow_1.set_position(p);
        }
        if let Some(p) = pose.elbow_2 {
            self.elbow_2.set_position(p);
        }
        if let Some(p) = pose.wrist {
            self.wrist.set_position(p);
        }
    }

    pub fn apply_preset(&mut self, preset: GrabberPreset) {
        self.apply_pose(&preset.pose());
        if preset.opens_claw() {
            self.open_claw();
        }
    }

    pub fn open_claw(&mut self) {
        self.claw_closed = false;
        self.claw.set_position(CLAW_OPEN);
    }

    pub fn close_claw(&mut self) {
        self.claw_closed = true;
        self.claw.set_position(CLAW_CLOSED);
    }

    #[inline]
    pub fn is_claw_closed(&self) -> bool {
        self.claw_closed
    }

    /// Step one detent right. No-op at the last detent.
    pub fn rotate_claw_right(&mut self) {
        if self.rotate_index + 1 < ROTATE_DETENTS.len() {
            self.rotate_index += 1;
            self.rotate.set_position(ROTATE_DETENTS[self.rotate_index]);
            debug!("Claw rotated right to detent {}", self.rotate_index);
        }
    }

    /// Step one detent left. No-op at the first detent.
    pub fn rotate_claw_left(&mut self) {
        if self.rotate_index > 0 {
            self.rotate_index -= 1;
            self.rotate.set_position(ROTATE_DETENTS[self.rotate_index]);
            debug!("Claw rotated left to detent {}", self.rotate_index);
        }
    }

    #[inline]
    pub fn rotate_index(&self) -> usize {
        self.rotate_index
    }

    /// Absolute rotation. The detent index is left unchanged.
    pub fn set_rotate_position(&mut self, position: f64) {
        self.rotate.set_position(position);
    }

    /// Start or stop the grab sequence. Starting always restarts at the
    /// first phase.
    pub fn set_grabbing(&mut self, grabbing: bool) {
        self.grabbing = grabbing;
        if grabbing {
            self.done = false;
            self.phase = GrabPhase::PoseForGrab;
        }
    }

    #[inline]
    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    #[inline]
    pub fn is_grab_done(&self) -> bool {
        self.done
    }

    #[inline]
    pub fn grab_phase(&self) -> GrabPhase {
        self.phase
    }

    /// Advance the floor grab sequence. Returns `true` once it is done.
    ///
    /// While not grabbing, holds the hover pose and reports done. After the
    /// sequence finishes, returns `true` without touching any servo until the
    /// next [`set_grabbing(true)`](Self::set_grabbing).
    pub fn update_floor_grab(&mut self, now: Duration) -> bool {
        if !self.grabbing {
            self.apply_preset(GrabberPreset::FloorGrabHover);
            return true;
        }
        if self.done {
            return true;
        }

        match self.phase {
            GrabPhase::PoseForGrab => {
                self.apply_pose(&PoseUpdate::elbows(GRAB_ELBOW).with_wrist(LEVEL_WRIST));
                self.advance(GrabPhase::Closing, now);
            }
            GrabPhase::Closing => {
                if self.timer.exceeds(now, self.step_delay_s) {
                    self.close_claw();
                    self.advance(GrabPhase::Lifting, now);
                }
            }
            GrabPhase::Lifting => {
                if self.timer.exceeds(now, self.step_delay_s) {
                    self.apply_pose(&PoseUpdate::elbows(HOVER_ELBOW).with_wrist(LEVEL_WRIST));
                    self.advance(GrabPhase::Settling, now);
                }
            }
            GrabPhase::Settling => {
                if self.timer.exceeds(now, self.step_delay_s) {
                    self.timer.reset(now);
                    self.phase = GrabPhase::PoseForGrab;
                    self.done = true;
                    debug!("Floor grab done");
                }
            }
        }

        self.done
    }

    fn advance(&mut self, next: GrabPhase, now: Duration) {
        self.timer.reset(now);
        self.phase = next;
    }
}

impl<S: Servo> Subsystem for Grabber<S> {
    fn initialize(&mut self) {
        self.timer.reset(Duration::ZERO);
    }

    /// Sequencing is driven by the mode sequencer.
    fn update(&mut self) {}

    /// Move to the safe pose and clear all grab state.
    fn reset(&mut self) {
        self.apply_pose(
            &PoseUpdate::elbows(0.0)
                .with_claw(CLAW_OPEN)
                .with_rotate(ROTATE_DETENTS[0])
                .with_wrist(LEVEL_WRIST),
        );
        self.grabbing = false;
        self.claw_closed = false;
        self.done = false;
        self.phase = GrabPhase::PoseForGrab;
    }

    fn stop(&mut self) {}
}

// ─── Tests ──────────────────────────────────────────────────────────
