//! Scripted operator sessions.
//!
//! A scenario is a TOML list of timed events replayed against the robot in
//! place of live gamepads:
//!
//! ```toml
//! [[events]]
//! at_s = 0.5
//! press = "grab_start"
//!
//! [[events]]
//! at_s = 3.0
//! raise_trigger = 0.8        # arm pad unless `pad = "drive"`
//! ```
//!
//! Buttons stay held from `press` until a matching `release`; trigger and
//! detection values persist until the next event that sets them.

use std::path::Path;
use std::time::Duration;

use helix_common::config::{ConfigError, ConfigLoader};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::input::{Action, EdgeTracker, GamepadState, OperatorInput, Pad};

/// Scenario loading errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("event {index}: {reason}")]
    InvalidEvent { index: usize, reason: String },
}

fn default_pad() -> Pad {
    Pad::Arm
}

/// One timed operator event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioEvent {
    /// Seconds since session start.
    pub at_s: f64,
    #[serde(default)]
    pub press: Option<Action>,
    #[serde(default)]
    pub release: Option<Action>,
    /// Pad whose triggers the trigger fields address.
    #[serde(default = "default_pad")]
    pub pad: Pad,
    #[serde(default)]
    pub raise_trigger: Option<f64>,
    #[serde(default)]
    pub lower_trigger: Option<f64>,
    /// Raw alignment detection; a negative value clears it.
    #[serde(default)]
    pub detection: Option<f64>,
}

impl ScenarioEvent {
    fn validate(&self) -> Result<(), String> {
        if Duration::try_from_secs_f64(self.at_s).is_err() {
            return Err(format!("at_s {} is not a valid session time", self.at_s));
        }
        for (name, value) in [
            ("raise_trigger", self.raise_trigger),
            ("lower_trigger", self.lower_trigger),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(format!("{name} {v} out of range [0, 1]"));
                }
            }
        }
        if self.press.is_none()
            && self.release.is_none()
            && self.raise_trigger.is_none()
            && self.lower_trigger.is_none()
            && self.detection.is_none()
        {
            return Err("event does nothing".to_string());
        }
        Ok(())
    }
}

/// Ordered list of events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    /// Load, validate and time-order a scenario file.
    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        Self::load(path)?.validated()
    }

    /// Parse, validate and time-order a scenario string.
    pub fn parse(content: &str) -> Result<Self, ScenarioError> {
        Self::from_toml(content)?.validated()
    }

    fn validated(mut self) -> Result<Self, ScenarioError> {
        for (index, event) in self.events.iter().enumerate() {
            event
                .validate()
                .map_err(|reason| ScenarioError::InvalidEvent { index, reason })?;
        }
        self.events.sort_by(|a, b| a.at_s.total_cmp(&b.at_s));
        Ok(self)
    }

    /// Time of the last event.
    pub fn duration(&self) -> Duration {
        self.events
            .last()
            .and_then(|e| Duration::try_from_secs_f64(e.at_s).ok())
            .unwrap_or(Duration::ZERO)
    }
}

// ─── Player ─────────────────────────────────────────────────────────

/// Replays a scenario as per-tick [`OperatorInput`].
#[derive(Debug)]
pub struct ScenarioPlayer {
    events: Vec<ScenarioEvent>,
    next: usize,
    arm: GamepadState,
    drive: GamepadState,
    detection: Option<f64>,
    arm_edges: EdgeTracker,
    drive_edges: EdgeTracker,
}

impl ScenarioPlayer {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            events: scenario.events,
            next: 0,
            arm: GamepadState::default(),
            drive: GamepadState::default(),
            detection: None,
            arm_edges: EdgeTracker::default(),
            drive_edges: EdgeTracker::default(),
        }
    }

    /// Every event has been applied.
    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }

    /// Apply events due by `now` and produce this tick's input.
    pub fn input_at(&mut self, now: Duration) -> OperatorInput {
        let now_s = now.as_secs_f64();
        while let Some(event) = self.events.get(self.next) {
            if event.at_s > now_s {
                break;
            }
            let event = event.clone();
            self.apply(&event);
            self.next += 1;
        }
        OperatorInput {
            arm: self.arm_edges.sample(self.arm),
            drive: self.drive_edges.sample(self.drive),
            detection: self.detection,
        }
    }

    fn apply(&mut self, event: &ScenarioEvent) {
        debug!("Scenario event at {:.2}s: {:?}", event.at_s, event);
        if let Some(action) = event.press {
            let (pad, buttons) = action.binding();
            self.pad_mut(pad).held |= buttons;
        }
        if let Some(action) = event.release {
            let (pad, buttons) = action.binding();
            self.pad_mut(pad).held &= !buttons;
        }
        let pad = self.pad_mut(event.pad);
        if let Some(v) = event.raise_trigger {
            pad.left_trigger = v;
        }
        if let Some(v) = event.lower_trigger {
            pad.right_trigger = v;
        }
        if let Some(d) = event.detection {
            self.detection = (d >= 0.0).then_some(d);
        }
    }

    fn pad_mut(&mut self, pad: Pad) -> &mut GamepadState {
        match pad {
            Pad::Arm => &mut self.arm,
            Pad::Drive => &mut self.drive,
        }
    }
}
