//! Planet Sim headless driver
//!
//! Runs a scenario for a fixed number of ticks, logging what happens and
//! printing the surviving bodies as JSON.
//!
//! Run `planet-sim --help` for usage.

use clap::Parser;
use glam::DVec2;

use planet_sim::Result;
use planet_sim::renderer::build_instances;
use planet_sim::scenario::Scenario;
use planet_sim::sim::{Body, SimEvent, TickInput, tick};

/// Canvas the original sandbox laid bodies out on
const VIEW_WIDTH: f64 = 1280.0;
const VIEW_HEIGHT: f64 = 720.0;
const DEFAULT_TICKS: u64 = 600;
const RANDOM_BODIES: usize = 24;

#[derive(Parser, Debug)]
#[command(name = "planet-sim", about = "Headless 2D n-body planet sandbox")]
struct Args {
    /// `demo`, `random`, or a path to a scenario JSON file
    #[arg(default_value = "demo")]
    scenario: String,

    /// Seed for the `random` scenario
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,
}

impl Args {
    fn load_scenario(&self) -> Result<Scenario> {
        match self.scenario.as_str() {
            "demo" => Ok(Scenario::demo(VIEW_WIDTH)),
            "random" => Ok(Scenario::random(
                self.seed,
                RANDOM_BODIES,
                DVec2::new(VIEW_WIDTH, VIEW_HEIGHT),
            )),
            path => Scenario::load(path),
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let scenario = args.load_scenario()?;
    let ticks = args.ticks;

    let mut state = scenario.into_state()?;
    log::info!("Running {} bodies for {} ticks", state.len(), ticks);

    let input = TickInput::default();
    for _ in 0..ticks {
        tick(&mut state, &input);
        for event in state.drain_events() {
            match event {
                SimEvent::Absorbed {
                    survivor,
                    casualty,
                    mass,
                } => log::info!(
                    "tick {}: {} absorbed {} -> {:e} kg",
                    state.time_ticks(),
                    survivor,
                    casualty,
                    mass
                ),
                SimEvent::Diverged { id } => {
                    log::warn!("tick {}: {} diverged", state.time_ticks(), id)
                }
                SimEvent::Spawned { .. } | SimEvent::Cleared { .. } => {}
            }
        }
        if state.is_empty() {
            log::info!("No bodies left after {} ticks", state.time_ticks());
            break;
        }
    }

    let instances = build_instances(&state);
    log::info!(
        "Finished at tick {}: {} bodies, {} draw instances, total mass {:e} kg",
        state.time_ticks(),
        state.len(),
        instances.len(),
        state.total_mass()
    );

    let bodies: Vec<&Body> = state.bodies().collect();
    println!("{}", serde_json::to_string_pretty(&bodies)?);
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::init();
    log::info!("Planet Sim (headless) starting...");

    if let Err(err) = run(&args) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
