//! Arena Retina Simulator driver
//!
//! Steps the agent through a steering schedule and forwards every frame to
//! the selected sinks.
//!
//! Examples:
//!   cargo run -p retina-sim -- --steps 500 --ascii-every 50
//!   cargo run -p retina-sim -- --steering random-walk --frames-out run.jsonl

use clap::{Parser, ValueEnum};
use retina_frames::FrameLogger;
use retina_sim::{
    default_config_toml, steering, AgentSimulator, AsciiDisplay, FrameSink, NullSink, Rendered,
    SimConfig, SteeringMode, Tee,
};
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SteeringArg {
    Sine,
    RandomWalk,
}

impl From<SteeringArg> for SteeringMode {
    fn from(arg: SteeringArg) -> Self {
        match arg {
            SteeringArg::Sine => SteeringMode::Sine,
            SteeringArg::RandomWalk => SteeringMode::RandomWalk,
        }
    }
}

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "arena_sim")]
#[command(about = "Raycast retina simulator for an agent in a polygonal arena")]
struct Args {
    /// TOML config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of steps to simulate (overrides config)
    #[arg(long)]
    steps: Option<u64>,

    /// Steering schedule (overrides config)
    #[arg(long, value_enum)]
    steering: Option<SteeringArg>,

    /// Random seed for random-walk steering (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Record every frame to this JSONL file
    #[arg(long)]
    frames_out: Option<PathBuf>,

    /// Print the retina to stdout every N steps (0 disables)
    #[arg(long, default_value_t = 0)]
    ascii_every: u64,

    /// Write the default config to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();

    if let Some(path) = &args.write_default_config {
        fs::write(path, default_config_toml())?;
        info!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = load_config(&args)?;
    config.validate()?;

    info!(
        steps = config.driver.steps,
        steering = ?config.driver.steering,
        num_walls = config.arena.num_walls,
        "Starting arena simulation"
    );

    let sim = AgentSimulator::new(config.clone())?;
    let sink = build_sink(&args)?;
    let mut rendered = Rendered::new(sim, sink);
    let mut schedule = steering::from_config(&config.driver);

    let mut blocked = 0u64;
    for step in 0..config.driver.steps {
        let command = schedule.next_command(step);
        rendered.apply(command)?;
        if !rendered.simulator().last_motion_accepted() {
            blocked += 1;
        }
    }

    let (sim, _) = rendered.finish()?;
    let position = sim.position();
    if blocked == config.driver.steps && blocked > 0 {
        warn!("Every proposed motion was blocked by the walls");
    }
    info!(
        steps = sim.step_count(),
        blocked,
        x = position.x,
        y = position.y,
        direction = sim.direction(),
        "Simulation complete"
    );

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(args: &Args) -> Result<SimConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => {
            let default_path = Path::new(retina_sim::config::DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                info!("Loading {}", default_path.display());
                SimConfig::from_file(default_path)?
            } else {
                SimConfig::default()
            }
        }
    };

    if let Some(steps) = args.steps {
        config.driver.steps = steps;
    }
    if let Some(mode) = args.steering {
        config.driver.steering = mode.into();
    }
    if let Some(seed) = args.seed {
        config.driver.seed = seed;
    }
    Ok(config)
}

fn build_sink(args: &Args) -> Result<Box<dyn FrameSink>, Box<dyn Error>> {
    let logger: Box<dyn FrameSink> = match &args.frames_out {
        Some(path) => {
            info!("Recording frames to {}", path.display());
            Box::new(FrameLogger::new(path)?)
        }
        None => Box::new(NullSink),
    };

    if args.ascii_every == 0 {
        return Ok(logger);
    }
    let display = AsciiDisplay::new(io::stdout().lock(), args.ascii_every);
    Ok(Box::new(Tee(logger, display)))
}
