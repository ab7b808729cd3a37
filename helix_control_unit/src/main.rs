//! # HELIX Control Unit
//!
//! Runs the robot's control cycle against the simulated hardware layer.
//!
//! Loads a single robot TOML via `helix_control_unit::config::load_config()`,
//! binds every device from `SimulationDriver::competition_robot()`, and ticks
//! the robot at the configured period. Operator input comes from an optional
//! scenario file; without one the gamepads stay idle and the robot holds its
//! default mode.

use clap::Parser;
use helix_common::config::LogLevel;
use helix_common::consts::DEFAULT_CONFIG_PATH;
use helix_common::robot::RobotConfig;
use helix_control_unit::config::{load_config, tracing_level};
use helix_control_unit::cycle::{CycleStats, Robot};
use helix_control_unit::input::OperatorInput;
use helix_control_unit::scenario::{Scenario, ScenarioPlayer};
use helix_hal::SimulationDriver;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Time simulated after the last scenario event.
const SCENARIO_TAIL: Duration = Duration::from_secs(2);

/// Session length without a scenario.
const IDLE_SESSION: Duration = Duration::from_secs(5);

/// HELIX Control Unit: robot motion sequencing on simulated hardware
#[derive(Parser, Debug)]
#[command(name = "helix_control_unit")]
#[command(author = "HELIX")]
#[command(version)]
#[command(about = "Mode sequencing and position control for the HELIX robot")]
struct Args {
    /// Path to the robot configuration TOML.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Scenario TOML with timed operator events.
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Simulated session length in seconds (default: scenario end + 2 s).
    #[arg(long, value_name = "SECONDS")]
    duration_s: Option<f64>,

    /// Pace ticks to wall-clock time instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging (DEBUG level, overrides `shared.log_level`).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    // Loaded before tracing so the configured level applies from the first line.
    let config = load_config(&args.config);
    let log_level = config
        .as_ref()
        .map_or(LogLevel::default(), |c| c.shared.log_level);
    setup_tracing(&args, log_level);

    info!("HELIX Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = match config {
        Ok(config) => run(&args, &config),
        Err(e) => Err(e.into()),
    };
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("HELIX Control Unit shutdown complete");
}

fn run(args: &Args, config: &RobotConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Config OK: service={}, period={}ms, log_level={}",
        config.shared.service_name,
        config.cycle.period_ms,
        config.shared.log_level.as_directive()
    );
    let period = Duration::from_millis(u64::from(config.cycle.period_ms));

    let scenario = match args.scenario {
        Some(ref path) => {
            let scenario = Scenario::from_file(path)?;
            info!(
                "Loaded scenario {} ({} events, {:.2}s)",
                path.display(),
                scenario.events.len(),
                scenario.duration().as_secs_f64()
            );
            Some(scenario)
        }
        None => {
            warn!("No scenario given; gamepads stay idle");
            None
        }
    };

    let session = match args.duration_s {
        Some(secs) => Duration::try_from_secs_f64(secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| format!("--duration-s {secs} must be a positive number of seconds"))?,
        None => scenario
            .as_ref()
            .map_or(IDLE_SESSION, |s| s.duration().saturating_add(SCENARIO_TAIL)),
    };

    let mut driver = SimulationDriver::competition_robot();
    let mut robot = Robot::bind(&driver, config)?;
    let mut player = scenario.map(ScenarioPlayer::new);
    info!(
        "Robot bound, entering cycle loop (period={}ms, session={:.2}s)",
        config.cycle.period_ms,
        session.as_secs_f64()
    );

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut stats = CycleStats::new();
    let mut now = Duration::ZERO;
    while now <= session && running.load(Ordering::SeqCst) {
        let started = Instant::now();

        let input = player
            .as_mut()
            .map_or_else(OperatorInput::default, |p| p.input_at(now));
        robot.tick(&input, now);
        driver.step(period);

        let elapsed = started.elapsed();
        stats.record(elapsed, period);
        if args.realtime {
            if let Some(rest) = period.checked_sub(elapsed) {
                std::thread::sleep(rest);
            }
        }
        now += period;
    }

    robot.stop();
    info!(
        "Cycle stats: ticks={}, avg={}ns, max={}ns, overruns={}",
        stats.tick_count,
        stats.avg_tick_ns(),
        stats.max_tick_ns,
        stats.overruns
    );
    println!("{}", serde_json::to_string_pretty(&robot.status(now))?);
    Ok(())
}

fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        tracing_level(log_level)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
