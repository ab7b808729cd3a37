//! Simulated encoder motor.
//!
//! A `SimMotor` is a cheap, cloneable handle onto shared motor state. The
//! control core owns one clone and drives it through the [`Motor`] trait,
//! while the [`SimulationDriver`](super::SimulationDriver) keeps another to
//! integrate physics between ticks. Tests keep a third to inject encoder
//! readings.

use helix_common::consts::POWER_LIMIT;
use helix_common::hal::Motor;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// First-order motor plant: velocity proportional to power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorPlant {
    /// Encoder speed at full power [ticks/s].
    pub max_ticks_per_second: f64,
    /// Mechanical stop below which the encoder cannot travel [ticks, raw].
    pub lower_stop: Option<f64>,
    /// Mechanical stop above which the encoder cannot travel [ticks, raw].
    pub upper_stop: Option<f64>,
}

impl Default for MotorPlant {
    fn default() -> Self {
        Self {
            max_ticks_per_second: 2800.0,
            lower_stop: None,
            upper_stop: None,
        }
    }
}

#[derive(Debug)]
struct MotorState {
    plant: MotorPlant,
    /// Absolute shaft position [ticks].
    raw_position: f64,
    /// Raw position captured at the last encoder reset.
    zero_offset: f64,
    /// Last commanded power.
    power: f64,
    /// Number of encoder resets.
    resets: u32,
}

/// Shared handle onto a simulated motor.
#[derive(Debug, Clone)]
pub struct SimMotor {
    name: Arc<str>,
    state: Arc<Mutex<MotorState>>,
}

impl SimMotor {
    /// Create a motor at raw position 0.
    pub fn new(name: &str, plant: MotorPlant) -> Self {
        Self {
            name: Arc::from(name),
            state: Arc::new(Mutex::new(MotorState {
                plant,
                raw_position: 0.0,
                zero_offset: 0.0,
                power: 0.0,
                resets: 0,
            })),
        }
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Force the encoder reading (relative to the current zero) [ticks].
    pub fn set_encoder(&self, ticks: i32) {
        let mut s = self.state.lock();
        s.raw_position = s.zero_offset + f64::from(ticks);
    }

    /// Absolute shaft position, unaffected by encoder resets [ticks].
    pub fn raw_position(&self) -> f64 {
        self.state.lock().raw_position
    }

    /// Number of encoder resets since creation.
    pub fn reset_count(&self) -> u32 {
        self.state.lock().resets
    }

    /// Integrate the plant over `dt` using the last commanded power.
    pub fn step(&self, dt: Duration) {
        let mut s = self.state.lock();
        let velocity = s.power * s.plant.max_ticks_per_second;
        let mut next = s.raw_position + velocity * dt.as_secs_f64();
        if let Some(lower) = s.plant.lower_stop {
            next = next.max(lower);
        }
        if let Some(upper) = s.plant.upper_stop {
            next = next.min(upper);
        }
        s.raw_position = next;
        trace!(
            "Motor {}: power={:.3}, raw={:.1}",
            self.name, s.power, s.raw_position
        );
    }
}

impl Motor for SimMotor {
    fn position(&self) -> i32 {
        let s = self.state.lock();
        (s.raw_position - s.zero_offset).round() as i32
    }

    fn set_power(&mut self, power: f64) {
        self.state.lock().power = power.clamp(-POWER_LIMIT, POWER_LIMIT);
    }

    fn power(&self) -> f64 {
        self.state.lock().power
    }

    fn reset_encoder(&mut self) {
        let mut s = self.state.lock();
        s.zero_offset = s.raw_position;
        s.resets += 1;
    }
}
