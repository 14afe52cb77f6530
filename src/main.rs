use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use frostcolony::{
    components::WorkerState,
    engine::{EngineBuilder, EngineSettings},
    scenario::{Scenario, ScenarioLoader},
    snapshot::JsonSnapshotWriter,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Frost colony simulation runner")]
struct Cli {
    /// Path to the scenario YAML file (built-in colony when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override snapshot interval in ticks, 0 disables snapshots
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long, default_value = "snapshots")]
    snapshot_dir: PathBuf,

    /// Log filter, e.g. `frostcolony=debug` (falls back to RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("frostcolony=info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => Scenario::default(),
    };
    let mut world = scenario.build_world();
    let ticks = scenario.ticks(cli.ticks);

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        snapshot_interval_ticks: cli
            .snapshot_interval
            .unwrap_or(scenario.snapshot_interval_ticks),
    };

    let mut engine = EngineBuilder::new(settings)
        .with_colony_systems()
        .with_commands(scenario.commands.iter().cloned())
        .with_sink(JsonSnapshotWriter::new(&cli.snapshot_dir))
        .build();

    info!(scenario = %scenario.name, ticks, seed = scenario.seed, "starting run");
    engine.run(&mut world, ticks)?;
    engine.finish(&world);

    let clock = world.clock();
    let resources = world.resources();
    println!(
        "Scenario '{}' completed for {} ticks (day {} {:02}:{:02}, {}°C).",
        scenario.name,
        ticks,
        clock.day,
        clock.hour,
        clock.minute,
        world.temperature().celsius()
    );
    println!(
        "Stock: coal {}, wood {}, food {}. Workers alive: {}/{}, sheltering: {}.",
        resources.coal,
        resources.wood,
        resources.food,
        world.workers_alive(),
        world.workers().len(),
        world.workers_in(WorkerState::InShelter) + world.workers_in(WorkerState::SeekingShelter)
    );
    Ok(())
}
