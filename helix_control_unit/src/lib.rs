//! # HELIX Control Unit Library
//!
//! Motion-sequencing and closed-loop control core of the HELIX competition
//! robot. Turns operator intent ("go to floor grab", "score specimen") into
//! time-gated actuator commands, while driving the lift and the dual-motor
//! slide to their setpoints with PID position loops.
//!
//! ## Layers
//!
//! 1. **Sequencer** ([`state`]) - operating-mode FSM over per-mode phase tables
//! 2. **Mechanisms** ([`axis`], [`effector`]) - lift, slide and end effector
//! 3. **Control** ([`control`]) - PID position loop with follower sync
//! 4. **Cycle** ([`cycle`]) - the per-tick pipeline tying them together
//!
//! Per tick, data flows one way: input selects the mode, the sequencer
//! advances, targets and poses go to the mechanisms, and the mechanisms run
//! their own loops before commands reach the hardware traits.

pub mod alignment;
pub mod axis;
pub mod config;
pub mod control;
pub mod cycle;
pub mod drive;
pub mod effector;
pub mod input;
pub mod mechanisms;
pub mod scenario;
pub mod state;
pub mod subsystem;
