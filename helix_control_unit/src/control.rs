//! Control engine root.
//!
//! Iteration-based PID position loop with a minimum-power floor, plus the
//! leader/follower synchronization loop for paired motors.

pub mod pid;
pub mod position;
pub mod sync;
