//! Cooperative control tick: input → modes → sequencer → axes → drive.
//!
//! [`Robot::tick`] runs the whole robot once. It is single-threaded and
//! holds no locks; time is the caller's session clock, sampled once per tick.
//!
//! ## Tick Order
//! 1. Mode-transition bindings (level-triggered, re-entry is a no-op)
//! 2. Claw and grab-sequence edges
//! 3. Alignment toggle, then claw rotation (floor grab, not grabbing)
//! 4. Mode sequencer
//! 5. Slide: manual while a trigger is held or recovering, else position loop
//! 6. Recovery and speed-limit toggles
//! 7. Lift: manual while recovering, else position loop
//! 8. Drivetrain mixing

use std::time::Duration;

use helix_common::hal::{DeviceSource, HalError, Motor, Servo};
use helix_common::mode::OperatingMode;
use helix_common::robot::RobotConfig;
use serde::Serialize;
use tracing::{debug, info};

use crate::alignment::Alignment;
use crate::drive::Drive;
use crate::effector::grabber::GrabPhase;
use crate::input::{Action, Buttons, ComboToggle, GamepadState, OperatorInput, RECOVERY_COMBO};
use crate::mechanisms::Mechanisms;
use crate::state::sequencer::Sequencer;
use crate::subsystem::Subsystem;

/// Mode selected by each arm-pad binding, in evaluation order.
const MODE_BINDINGS: [(Action, OperatingMode); 7] = [
    (Action::FloorGrab, OperatingMode::FloorGrab),
    (Action::SpecimenDrop, OperatingMode::SpecimenDrop),
    (Action::SpecimenTransition, OperatingMode::SpecimenTransition),
    (Action::SpecimenGrab, OperatingMode::SpecimenGrab),
    (Action::HighBasket, OperatingMode::HighBasket),
    (Action::Neutral, OperatingMode::Neutral),
    (Action::SpecScore, OperatingMode::SpecScore),
];

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-tick timing statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CycleStats {
    /// Total ticks executed.
    pub tick_count: u64,
    /// Last tick duration [ns].
    pub last_tick_ns: u64,
    /// Minimum tick duration [ns].
    pub min_tick_ns: u64,
    /// Maximum tick duration [ns].
    pub max_tick_ns: u64,
    /// Running sum for average computation.
    pub sum_tick_ns: u64,
    /// Ticks that took longer than the configured period.
    pub overruns: u64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            tick_count: 0,
            last_tick_ns: 0,
            min_tick_ns: u64::MAX,
            max_tick_ns: 0,
            sum_tick_ns: 0,
            overruns: 0,
        }
    }

    /// Record one tick against its budget.
    #[inline]
    pub fn record(&mut self, duration: Duration, budget: Duration) {
        let ns = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.tick_count += 1;
        self.last_tick_ns = ns;
        self.min_tick_ns = self.min_tick_ns.min(ns);
        self.max_tick_ns = self.max_tick_ns.max(ns);
        self.sum_tick_ns = self.sum_tick_ns.saturating_add(ns);
        if duration > budget {
            self.overruns += 1;
        }
    }

    /// Average tick time [ns] (0 if no ticks).
    #[inline]
    pub fn avg_tick_ns(&self) -> u64 {
        if self.tick_count == 0 {
            0
        } else {
            self.sum_tick_ns / self.tick_count
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Status ─────────────────────────────────────────────────────────

/// Snapshot of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisStatus {
    pub position: i32,
    pub target: i32,
    pub position_units: f64,
    pub power: f64,
}

/// Robot snapshot for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobotStatus {
    pub mode: OperatingMode,
    pub phase_index: usize,
    pub phase_complete: bool,
    pub phase_elapsed_s: f64,
    pub lift: AxisStatus,
    pub slide: AxisStatus,
    pub recovering: bool,
    pub grabbing: bool,
    pub grab_done: bool,
    pub grab_phase: GrabPhase,
    pub claw_closed: bool,
    pub rotate_index: usize,
    pub alignment_enabled: bool,
    pub speed_limited: bool,
}

// ─── Robot ──────────────────────────────────────────────────────────

/// Every subsystem of the robot plus the mode sequencer.
#[derive(Debug)]
pub struct Robot<M: Motor, S: Servo> {
    pub mechanisms: Mechanisms<M, S>,
    pub drive: Drive<M>,
    pub alignment: Alignment,
    pub sequencer: Sequencer,
    floor_grab_limit: i32,
    extend_limit: i32,
    recovery_toggle: ComboToggle,
    speed_limit_toggle: ComboToggle,
}

impl<M: Motor, S: Servo> Robot<M, S> {
    /// Bind every device and build the robot in its session-start state.
    ///
    /// # Errors
    /// Returns `HalError` if any device is missing or of the wrong kind.
    pub fn bind<D>(devices: &D, config: &RobotConfig) -> Result<Self, HalError>
    where
        D: DeviceSource<Motor = M, Servo = S>,
    {
        let mut robot = Self {
            mechanisms: Mechanisms::bind(devices, config)?,
            drive: Drive::bind(devices, &config.drive)?,
            alignment: Alignment::new(&config.alignment),
            sequencer: Sequencer::new(Duration::ZERO),
            floor_grab_limit: config.slide.floor_grab_limit,
            extend_limit: config.slide.extend_limit,
            recovery_toggle: ComboToggle::new(RECOVERY_COMBO),
            speed_limit_toggle: ComboToggle::new(Buttons::TOUCHPAD),
        };
        robot.initialize(Duration::ZERO);
        Ok(robot)
    }

    /// Re-zero the axes and return to the default mode.
    pub fn initialize(&mut self, now: Duration) {
        self.mechanisms.initialize();
        self.drive.initialize();
        self.sequencer.initialize(now);
        self.recovery_toggle.reset();
        self.speed_limit_toggle.reset();
        info!("Robot initialized in {}", self.sequencer.mode());
    }

    /// Run one control tick.
    pub fn tick(&mut self, input: &OperatorInput, now: Duration) {
        let arm = &input.arm;
        let drive = &input.drive;

        self.check_mode_transitions(arm, now);
        self.handle_grabber_buttons(arm);
        self.handle_rotation(arm, input.detection);

        self.sequencer.update(&mut self.mechanisms, now);

        let slide_triggers = arm.triggers();
        if slide_triggers.any() || self.mechanisms.slide.is_recovering() {
            let limit = self.slide_limit();
            self.mechanisms
                .slide
                .handle_manual_control(slide_triggers, limit);
        } else {
            self.mechanisms.slide.update();
        }

        if self.recovery_toggle.poll(drive.held) {
            self.mechanisms.toggle_recovery_mode();
        }
        if self.speed_limit_toggle.poll(drive.held) {
            self.drive.toggle_speed_limit();
        }

        if self.mechanisms.is_recovering() {
            self.mechanisms.lift.handle_manual_control(drive.triggers());
        } else {
            self.mechanisms.lift.update();
        }

        self.drive.set_sticks(drive.right_stick, drive.left_stick);
        self.drive.update();
    }

    /// Cut every actuator.
    pub fn stop(&mut self) {
        self.mechanisms.stop();
        self.drive.stop();
        info!("Robot stopped");
    }

    /// Manual slide extension limit for the active mode [ticks].
    pub fn slide_limit(&self) -> i32 {
        if self.sequencer.mode() == OperatingMode::FloorGrab {
            self.floor_grab_limit
        } else {
            self.extend_limit
        }
    }

    pub fn status(&self, now: Duration) -> RobotStatus {
        let lift = &self.mechanisms.lift;
        let slide = &self.mechanisms.slide;
        let grabber = &self.mechanisms.grabber;
        RobotStatus {
            mode: self.sequencer.mode(),
            phase_index: self.sequencer.phase_index(),
            phase_complete: self.sequencer.is_complete(),
            phase_elapsed_s: self.sequencer.phase_elapsed(now).as_secs_f64(),
            lift: AxisStatus {
                position: lift.position(),
                target: lift.target(),
                position_units: lift.position_units(),
                power: lift.motor().power(),
            },
            slide: AxisStatus {
                position: slide.position(),
                target: slide.target(),
                position_units: slide.position_units(),
                power: slide.leader().power(),
            },
            recovering: self.mechanisms.is_recovering(),
            grabbing: grabber.is_grabbing(),
            grab_done: grabber.is_grab_done(),
            grab_phase: grabber.grab_phase(),
            claw_closed: grabber.is_claw_closed(),
            rotate_index: grabber.rotate_index(),
            alignment_enabled: self.alignment.is_enabled(),
            speed_limited: self.drive.is_speed_limited(),
        }
    }

    fn check_mode_transitions(&mut self, arm: &GamepadState, now: Duration) {
        for (action, mode) in MODE_BINDINGS {
            let (_, buttons) = action.binding();
            if arm.is_held(buttons) {
                self.sequencer.set_state(mode, now);
                if mode == OperatingMode::FloorGrab {
                    self.mechanisms.grabber.set_grabbing(false);
                }
            }
        }
    }

    fn handle_grabber_buttons(&mut self, arm: &GamepadState) {
        let grabber = &mut self.mechanisms.grabber;
        if arm.just_pressed(Action::ClawOpen.binding().1) {
            grabber.open_claw();
        }
        if arm.just_pressed(Action::ClawClose.binding().1) {
            grabber.close_claw();
        }
        if arm.just_pressed(Action::GrabStart.binding().1) {
            grabber.set_grabbing(true);
            debug!("Floor grab started");
        } else if arm.just_pressed(Action::GrabStop.binding().1) {
            grabber.set_grabbing(false);
        }
    }

    fn handle_rotation(&mut self, arm: &GamepadState, detection: Option<f64>) {
        if arm.just_pressed(Action::AlignmentToggle.binding().1) {
            self.alignment.toggle();
        }

        let grabber = &mut self.mechanisms.grabber;
        if self.sequencer.mode() != OperatingMode::FloorGrab || grabber.is_grabbing() {
            return;
        }
        if self.alignment.is_enabled() {
            if let Some(position) = self.alignment.rotate_position(detection) {
                grabber.set_rotate_position(position);
            }
        } else if arm.just_pressed(Action::RotateRight.binding().1) {
            grabber.rotate_claw_right();
        } else if arm.just_pressed(Action::RotateLeft.binding().1) {
            grabber.rotate_claw_left();
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
