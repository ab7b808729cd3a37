//! TOML configuration loader with validation.
//!
//! Loads `RobotConfig` from a single TOML file and validates parameter
//! bounds before any device is bound.

use std::path::Path;

use helix_common::config::{ConfigError, ConfigLoader, LogLevel};
use helix_common::robot::RobotConfig;
use tracing::Level;

/// Load and validate the robot configuration.
///
/// # Errors
/// `ConfigError::FileNotFound` / `ParseError` from the loader, or
/// `ValidationError` naming the offending section.
pub fn load_config(path: &Path) -> Result<RobotConfig, ConfigError> {
    let config = RobotConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate an in-memory configuration.
pub fn parse_config(content: &str) -> Result<RobotConfig, ConfigError> {
    let config = RobotConfig::from_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// Base tracing level for the configured `shared.log_level`.
pub fn tracing_level(level: LogLevel) -> Level {
    level.as_directive().parse().unwrap_or(Level::INFO)
}
