//! Command-line simulator.
//!
//! Usage:
//!   cargo run -p corner_pilot_sitl -- [SCENARIO] [OPTIONS]
//!
//! Without a scenario file the robot is placed in a back corner and runs
//! the autonomous routine followed by an idle manual phase.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use corner_pilot_core::parameters::RobotParams;
use corner_pilot_sitl::{logging, run, Placement, Scenario, SimulatorError};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartCorner {
    LeftBack,
    RightBack,
}

impl StartCorner {
    fn placement(self) -> Placement {
        match self {
            StartCorner::LeftBack => Placement {
                x: -5.0,
                y: -10.0,
                heading: 0.0,
            },
            StartCorner::RightBack => Placement {
                x: -5.0,
                y: 10.0,
                heading: 180.0,
            },
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON)
    scenario: Option<PathBuf>,

    /// Start corner when no scenario file is given
    #[arg(long, value_enum, default_value_t = StartCorner::LeftBack)]
    corner: StartCorner,

    /// Run the autonomous routine before manual operation
    #[arg(long, short)]
    autonomous: bool,

    /// Length of the manual phase in milliseconds (overrides the scenario)
    #[arg(long)]
    duration_ms: Option<u64>,

    /// RNG seed for sensor noise (overrides the scenario)
    #[arg(long)]
    seed: Option<u64>,

    /// Distance sensor noise in millimeters (overrides the scenario)
    #[arg(long)]
    noise_mm: Option<f32>,

    /// Log level
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn build_scenario(args: &Args) -> Result<Scenario, SimulatorError> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => {
            let mut scenario = Scenario::idle(args.corner.placement(), 1000);
            scenario.name = format!("{:?}", args.corner);
            scenario.autonomous = true;
            scenario
        }
    };
    if args.autonomous {
        scenario.autonomous = true;
    }
    if let Some(duration_ms) = args.duration_ms {
        scenario.duration_ms = duration_ms;
    }
    if let Some(seed) = args.seed {
        scenario.sim.seed = Some(seed);
    }
    if let Some(noise_mm) = args.noise_mm {
        scenario.sim.distance_noise_mm = noise_mm;
    }
    scenario.validate()?;
    Ok(scenario)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SimulatorError> {
    let args = Args::parse();
    logging::init(args.log_level)?;

    let scenario = build_scenario(&args)?;

    tokio::select! {
        result = run(&scenario, RobotParams::default()) => {
            let summary = result?;
            if let Some(playback) = &summary.playback {
                log::info!(
                    "autonomous: {} steps, {} timeouts",
                    playback.steps_run,
                    playback.timeout_count
                );
            }
        }
        _ = tokio::signal::ctrl_c() => {
            log::warn!("interrupted");
        }
    }
    Ok(())
}
