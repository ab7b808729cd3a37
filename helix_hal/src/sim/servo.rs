//! Simulated position servo.

use helix_common::consts::{SERVO_MAX, SERVO_MIN};
use helix_common::hal::Servo;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct ServoState {
    position: f64,
    writes: u64,
}

/// Shared handle onto a simulated servo.
///
/// Records every write so callers can verify that a pose was not re-applied.
#[derive(Debug, Clone)]
pub struct SimServo {
    name: Arc<str>,
    state: Arc<Mutex<ServoState>>,
}

impl SimServo {
    /// Create a servo at position 0 with no recorded writes.
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            state: Arc::new(Mutex::new(ServoState::default())),
        }
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of position writes since creation.
    pub fn write_count(&self) -> u64 {
        self.state.lock().writes
    }
}

impl Servo for SimServo {
    fn set_position(&mut self, position: f64) {
        let mut s = self.state.lock();
        s.position = position.clamp(SERVO_MIN, SERVO_MAX);
        s.writes += 1;
    }

    fn position(&self) -> f64 {
        self.state.lock().position
    }
}
