//! Read-only views of the colony for renderers and the session store.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::components::{
    BuildingId, BuildingKind, Position, ResourceLedger, TreeId, WorkerId, WorkerState,
    TICKS_PER_SECOND,
};
use crate::world::World;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerView {
    pub id: WorkerId,
    pub position: Position,
    pub target: Position,
    pub state: WorkerState,
    pub health: f32,
    pub energy: f32,
    pub hunger: f32,
    pub assigned_building: Option<BuildingId>,
    pub assigned_tree: Option<TreeId>,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingView {
    pub id: BuildingId,
    pub kind: BuildingKind,
    pub position: Position,
    pub workers: usize,
    pub max_workers: usize,
    pub health: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeView {
    pub id: TreeId,
    pub position: Position,
    pub wood: u32,
    pub depleted: bool,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColonyView {
    pub tick: u64,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub daytime: bool,
    pub temperature: i32,
    pub resources: ResourceLedger,
    pub workers: Vec<WorkerView>,
    pub buildings: Vec<BuildingView>,
    pub trees: Vec<TreeView>,
}

impl ColonyView {
    pub fn capture(world: &World) -> Self {
        let clock = world.clock();
        let selected = world.selected_worker();
        Self {
            tick: world.tick(),
            day: clock.day,
            hour: clock.hour,
            minute: clock.minute,
            daytime: clock.is_daytime(),
            temperature: world.temperature().celsius(),
            resources: *world.resources(),
            workers: world
                .workers()
                .iter()
                .map(|w| WorkerView {
                    id: w.id,
                    position: w.position,
                    target: w.target,
                    state: w.state,
                    health: w.health,
                    energy: w.energy,
                    hunger: w.hunger,
                    assigned_building: w.assigned_building,
                    assigned_tree: w.assigned_tree,
                    selected: selected == Some(w.id),
                })
                .collect(),
            buildings: world
                .buildings()
                .iter()
                .enumerate()
                .map(|(index, b)| BuildingView {
                    id: BuildingId(index),
                    kind: b.kind,
                    position: b.position,
                    workers: b.workers().len(),
                    max_workers: b.kind.max_workers(),
                    health: b.health(),
                })
                .collect(),
            trees: world
                .trees()
                .iter()
                .enumerate()
                .map(|(index, t)| TreeView {
                    id: TreeId(index),
                    position: t.position,
                    wood: t.wood(),
                    depleted: t.is_depleted(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: WorkerId,
    pub state: WorkerState,
    pub health: f32,
    pub energy: f32,
    pub hunger: f32,
}

/// Periodic session summary handed to the persistence backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub scenario: String,
    pub started_at: DateTime<Utc>,
    pub recorded_at: DateTime<Utc>,
    /// Set only on the record written when the session closes.
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    pub tick: u64,
    pub day: u32,
    pub hour: u32,
    pub temperature: i32,
    pub resources: ResourceLedger,
    pub worker_count: usize,
    pub workers_alive: usize,
    pub mean_worker_health: f32,
    pub building_count: usize,
    /// Whole simulated minutes of play.
    pub duration_minutes: u64,
    pub workers: Vec<WorkerRecord>,
}

impl SessionRecord {
    pub fn capture(world: &World, scenario: &str, started_at: DateTime<Utc>) -> Self {
        let workers = world.workers();
        let mean_worker_health = if workers.is_empty() {
            0.0
        } else {
            workers.iter().map(|w| w.health).sum::<f32>() / workers.len() as f32
        };
        let clock = world.clock();
        Self {
            scenario: scenario.to_string(),
            started_at,
            recorded_at: Utc::now(),
            ended_at: None,
            tick: world.tick(),
            day: clock.day,
            hour: clock.hour,
            temperature: world.temperature().celsius(),
            resources: *world.resources(),
            worker_count: workers.len(),
            workers_alive: world.workers_alive(),
            mean_worker_health,
            building_count: world.buildings().len(),
            duration_minutes: world.tick() / (TICKS_PER_SECOND * 60),
            workers: workers
                .iter()
                .map(|w| WorkerRecord {
                    id: w.id,
                    state: w.state,
                    health: w.health,
                    energy: w.energy,
                    hunger: w.hunger,
                })
                .collect(),
        }
    }
}

/// Destination for session records. Failures never stop the simulation.
pub trait SnapshotSink {
    fn record(&mut self, record: &SessionRecord) -> Result<()>;
}

/// Writes each record as `<dir>/<scenario>/tick_XXXXXX.json`.
pub struct JsonSnapshotWriter {
    dir: PathBuf,
}

impl JsonSnapshotWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, scenario: &str, tick: u64) -> PathBuf {
        self.dir.join(scenario).join(format!("tick_{tick:06}.json"))
    }
}

impl SnapshotSink for JsonSnapshotWriter {
    fn record(&mut self, record: &SessionRecord) -> Result<()> {
        let path = self.path_for(&record.scenario, record.tick);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
