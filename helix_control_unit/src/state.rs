//! State machine module root.
//!
//! Operating-mode sequencing: mode tables, phase progress and timers.

pub mod phase;
pub mod sequencer;
pub mod table;
pub mod timer;
