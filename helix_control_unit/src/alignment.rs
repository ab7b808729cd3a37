//! Vision-aligned claw rotation.
//!
//! The vision sensor reports a raw orientation in `[0, 255]`; the claw
//! rotation is `detection / 255 + offset`.

use helix_common::robot::AlignmentConfig;
use tracing::debug;

const DETECTION_FULL_SCALE: f64 = 255.0;

#[derive(Debug, Clone)]
pub struct Alignment {
    enabled: bool,
    offset: f64,
}

impl Alignment {
    pub fn new(config: &AlignmentConfig) -> Self {
        Self {
            enabled: config.enabled,
            offset: config.offset,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        debug!("Vision alignment: {}", self.enabled);
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Nudge the offset by `delta`.
    pub fn adjust_offset(&mut self, delta: f64) {
        self.offset += delta;
    }

    /// Rotate servo position for a detection, or `None` when disabled or
    /// nothing was detected.
    pub fn rotate_position(&self, detection: Option<f64>) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        detection.map(|d| d / DETECTION_FULL_SCALE + self.offset)
    }
}
