//! HELIX Common Library
//!
//! Shared types, configuration loading and hardware traits for all HELIX
//! workspace crates.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and shared fields
//! - [`consts`] - System-wide numeric limits
//! - [`control`] - PID gains and setpoint limits
//! - [`hal`] - `Motor` / `Servo` traits and binding errors
//! - [`mode`] - Robot operating modes
//! - [`robot`] - Robot configuration structures
//! - [`prelude`] - Common re-exports for convenience

pub mod config;
pub mod consts;
pub mod control;
pub mod hal;
pub mod mode;
pub mod prelude;
pub mod robot;
