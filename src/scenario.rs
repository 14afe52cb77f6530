use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    commands::ScheduledCommand,
    components::{
        BuildingKind, Clock, Position, ResourceLedger, Temperature, Tree, WorkerTuning, MAX_WOOD,
    },
    rng::RngManager,
    world::{ForestSettings, Playfield, World},
};

fn default_snapshot_interval_ticks() -> u64 {
    3_600
}

fn default_resources() -> ResourceLedger {
    ResourceLedger::new(50, 100, 30)
}

fn default_day() -> u32 {
    1
}

fn default_hour() -> u32 {
    6
}

fn default_temperature() -> i32 {
    -10
}

fn default_worker_count() -> usize {
    5
}

fn default_worker_origin() -> Position {
    Position::new(100.0, 200.0)
}

fn default_worker_spacing() -> f32 {
    50.0
}

fn default_buildings() -> Vec<BuildingSetup> {
    vec![
        BuildingSetup {
            kind: BuildingKind::House,
            x: 150.0,
            y: 150.0,
        },
        BuildingSetup {
            kind: BuildingKind::Storage,
            x: 200.0,
            y: 150.0,
        },
    ]
}

fn default_tree_attempts() -> usize {
    12
}

fn default_wood() -> u32 {
    MAX_WOOD
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
    #[serde(default)]
    pub start: StartConditions,
    #[serde(default = "default_resources")]
    pub resources: ResourceLedger,
    #[serde(default)]
    pub workers: WorkerSetup,
    #[serde(default = "default_buildings")]
    pub buildings: Vec<BuildingSetup>,
    #[serde(default)]
    pub trees: TreeSetup,
    #[serde(default)]
    pub playfield: Playfield,
    #[serde(default)]
    pub commands: Vec<ScheduledCommand>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartConditions {
    #[serde(default = "default_day")]
    pub day: u32,
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default = "default_temperature")]
    pub temperature: i32,
}

impl Default for StartConditions {
    fn default() -> Self {
        Self {
            day: default_day(),
            hour: default_hour(),
            minute: 0,
            temperature: default_temperature(),
        }
    }
}

/// Workers spawn in a row starting at `origin`, `spacing` apart on x.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerSetup {
    #[serde(default = "default_worker_count")]
    pub count: usize,
    #[serde(default = "default_worker_origin")]
    pub origin: Position,
    #[serde(default = "default_worker_spacing")]
    pub spacing: f32,
    #[serde(default)]
    pub tuning: WorkerTuning,
}

impl Default for WorkerSetup {
    fn default() -> Self {
        Self {
            count: default_worker_count(),
            origin: default_worker_origin(),
            spacing: default_worker_spacing(),
            tuning: WorkerTuning::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildingSetup {
    pub kind: BuildingKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeSetup {
    /// Random placement attempts at world generation; ignored when `fixed` is set.
    #[serde(default = "default_tree_attempts")]
    pub attempts: usize,
    #[serde(default)]
    pub fixed: Vec<FixedTree>,
    #[serde(default)]
    pub forest: ForestSettings,
}

impl Default for TreeSetup {
    fn default() -> Self {
        Self {
            attempts: default_tree_attempts(),
            fixed: Vec::new(),
            forest: ForestSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixedTree {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_wood")]
    pub wood: u32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("scenario must start with at least one worker")]
    NoWorkers,
    #[error("scenario must place at least one building")]
    NoBuildings,
    #[error("playfield {width}x{height} (ui margin {ui_margin}) leaves no room to place trees")]
    Playfield {
        width: f32,
        height: f32,
        ui_margin: f32,
    },
    #[error("start time {hour:02}:{minute:02} is not a valid time of day")]
    StartTime { hour: u32, minute: u32 },
    #[error("worker speed must be positive, got {0}")]
    WorkerSpeed(f32),
    #[error("tree spawn chance must lie in [0, 1], got {0}")]
    SpawnChance(f64),
}

impl Default for Scenario {
    /// The stock colony: five workers, a house and a storehouse in the cold.
    fn default() -> Self {
        Self {
            name: "frozen_outpost".into(),
            description: None,
            seed: 0,
            ticks: None,
            snapshot_interval_ticks: default_snapshot_interval_ticks(),
            start: StartConditions::default(),
            resources: default_resources(),
            workers: WorkerSetup::default(),
            buildings: default_buildings(),
            trees: TreeSetup::default(),
            playfield: Playfield::default(),
            commands: Vec::new(),
        }
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario = Scenario::from_yaml(&data)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.workers.count == 0 {
            return Err(ScenarioError::NoWorkers);
        }
        if self.buildings.is_empty() {
            return Err(ScenarioError::NoBuildings);
        }
        if !self.playfield.is_valid() {
            return Err(ScenarioError::Playfield {
                width: self.playfield.width,
                height: self.playfield.height,
                ui_margin: self.playfield.ui_margin,
            });
        }
        if self.start.hour >= 24 || self.start.minute >= 60 {
            return Err(ScenarioError::StartTime {
                hour: self.start.hour,
                minute: self.start.minute,
            });
        }
        let speed = self.workers.tuning.speed;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ScenarioError::WorkerSpeed(speed));
        }
        let chance = self.trees.forest.spawn_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ScenarioError::SpawnChance(chance));
        }
        Ok(())
    }

    /// Generates the starting colony. Tree placement is seeded by `seed`.
    pub fn build_world(&self) -> World {
        let clock = Clock::new(self.start.day, self.start.hour, self.start.minute);
        let mut world = World::new(clock, Temperature::new(self.start.temperature), self.resources)
            .with_playfield(self.playfield)
            .with_forest(self.trees.forest)
            .with_tuning(self.workers.tuning.clone());

        for i in 0..self.workers.count {
            let origin = self.workers.origin;
            world.spawn_worker(Position::new(
                origin.x + self.workers.spacing * i as f32,
                origin.y,
            ));
        }

        for building in &self.buildings {
            world.place_building(building.kind, Position::new(building.x, building.y));
        }

        if self.trees.fixed.is_empty() {
            let mut streams = RngManager::new(self.seed);
            let mut rng = streams.stream("worldgen");
            for _ in 0..self.trees.attempts {
                world.try_plant_random_tree(&mut rng);
            }
        } else {
            for tree in &self.trees.fixed {
                world.plant_tree(Tree::with_wood(Position::new(tree.x, tree.y), tree.wood));
            }
        }
        world
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(36_000)
    }
}
