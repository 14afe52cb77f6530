use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    commands::ScheduledCommand,
    rng::{RngManager, SystemRng},
    snapshot::{ColonyView, SessionRecord, SnapshotSink},
    systems::{BuildingSystem, EnvironmentSystem, HeatingSystem, TreeSystem, WorkerSystem},
    world::World,
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    /// Ticks between session records; 0 disables them.
    pub snapshot_interval_ticks: u64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
    commands: Vec<ScheduledCommand>,
    sink: Option<Box<dyn SnapshotSink>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
            commands: Vec::new(),
            sink: None,
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Registers the standard colony pipeline in tick order.
    pub fn with_colony_systems(self) -> Self {
        self.with_system(EnvironmentSystem::new())
            .with_system(WorkerSystem::new())
            .with_system(BuildingSystem::new())
            .with_system(TreeSystem::new())
            .with_system(HeatingSystem::new())
    }

    pub fn with_commands(mut self, commands: impl IntoIterator<Item = ScheduledCommand>) -> Self {
        self.commands.extend(commands);
        self
    }

    pub fn with_sink(mut self, sink: impl SnapshotSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(mut self) -> Engine {
        self.commands.sort_by_key(|scheduled| scheduled.tick);
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            commands: self.commands,
            next_command: 0,
            sink: self.sink,
            started_at: Utc::now(),
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    commands: Vec<ScheduledCommand>,
    next_command: usize,
    sink: Option<Box<dyn SnapshotSink>>,
    started_at: DateTime<Utc>,
    settings: EngineSettings,
}

impl Engine {
    pub fn run(&mut self, world: &mut World, ticks: u64) -> Result<()> {
        self.run_with_hook(world, ticks, |_| {})
    }

    /// Runs `ticks` ticks, handing a fresh view to `hook` after each one.
    pub fn run_with_hook<F>(&mut self, world: &mut World, ticks: u64, mut hook: F) -> Result<()>
    where
        F: FnMut(&ColonyView),
    {
        for _ in 0..ticks {
            self.step(world)?;
            hook(&ColonyView::capture(world));
        }
        Ok(())
    }

    /// Advances the world by exactly one tick and returns its number.
    pub fn step(&mut self, world: &mut World) -> Result<u64> {
        let tick = world.begin_tick();
        self.apply_due_commands(world, tick);

        for system in &mut self.systems {
            let mut rng_stream = self.rng.stream(system.name());
            let ctx = SystemContext {
                tick,
                scenario_name: &self.settings.scenario_name,
            };
            system.run(&ctx, world, &mut rng_stream)?;
        }

        self.maybe_record(world, tick);
        Ok(tick)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn session_record(&self, world: &World) -> SessionRecord {
        SessionRecord::capture(world, &self.settings.scenario_name, self.started_at)
    }

    /// Closes the session: stamps the end time and hands the final record to the sink.
    pub fn finish(&mut self, world: &World) -> SessionRecord {
        let mut record = self.session_record(world);
        record.ended_at = Some(record.recorded_at);
        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.record(&record) {
                warn!(tick = record.tick, error = %err, "failed to persist final session record");
            }
        }
        info!(
            scenario = %record.scenario,
            tick = record.tick,
            workers_alive = record.workers_alive,
            "session finished"
        );
        record
    }

    fn apply_due_commands(&mut self, world: &mut World, tick: u64) {
        while let Some(scheduled) = self.commands.get(self.next_command) {
            if scheduled.tick > tick {
                break;
            }
            match world.apply(&scheduled.command) {
                Ok(()) => debug!(tick, command = ?scheduled.command, "command applied"),
                Err(err) => warn!(tick, command = ?scheduled.command, %err, "command rejected"),
            }
            self.next_command += 1;
        }
    }

    fn maybe_record(&mut self, world: &World, tick: u64) {
        let interval = self.settings.snapshot_interval_ticks;
        if interval == 0 || tick % interval != 0 {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let record = SessionRecord::capture(world, &self.settings.scenario_name, self.started_at);
        if let Err(err) = sink.record(&record) {
            warn!(tick, error = %err, "failed to persist session record");
        }
    }
}

pub struct SystemContext<'a> {
    pub tick: u64,
    pub scenario_name: &'a str,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}
