use serde::{Deserialize, Serialize};

use super::{climate, Position, ResourceKind, ResourceLedger, Temperature, WorkerId, TILE_SIZE};

pub const MAX_HEALTH: f32 = 100.0;
const COLD_DECAY_PER_TICK: f32 = 0.1;
const COLD_EFFICIENCY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    CoalMine,
    Sawmill,
    Farm,
    House,
    Storage,
}

impl BuildingKind {
    /// Maximum simultaneous workers
    pub fn max_workers(self) -> usize {
        match self {
            BuildingKind::CoalMine => 3,
            BuildingKind::Sawmill => 2,
            BuildingKind::Farm => 4,
            BuildingKind::House | BuildingKind::Storage => 0,
        }
    }

    /// Resource produced by staffing this building, if any
    pub fn output(self) -> Option<ResourceKind> {
        match self {
            BuildingKind::CoalMine => Some(ResourceKind::Coal),
            BuildingKind::Sawmill => Some(ResourceKind::Wood),
            BuildingKind::Farm => Some(ResourceKind::Food),
            BuildingKind::House | BuildingKind::Storage => None,
        }
    }

    pub fn needs_heating(self) -> bool {
        matches!(self, BuildingKind::House | BuildingKind::Farm)
    }

    /// Materials consumed by construction
    pub fn construction_cost(self) -> Vec<(ResourceKind, u32)> {
        match self {
            BuildingKind::House => vec![(ResourceKind::Wood, 10)],
            BuildingKind::Sawmill => vec![(ResourceKind::Wood, 15)],
            BuildingKind::CoalMine => vec![(ResourceKind::Wood, 20)],
            BuildingKind::Farm => vec![(ResourceKind::Wood, 12)],
            BuildingKind::Storage => vec![(ResourceKind::Wood, 8)],
        }
    }
}

/// A placed building. `position` is the top-left corner of its tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub position: Position,
    workers: Vec<WorkerId>,
    health: f32,
}

impl Building {
    pub fn new(kind: BuildingKind, position: Position) -> Self {
        Self {
            kind,
            position,
            workers: Vec::new(),
            health: MAX_HEALTH,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(
            self.position.x + TILE_SIZE / 2.0,
            self.position.y + TILE_SIZE / 2.0,
        )
    }

    pub fn workers(&self) -> &[WorkerId] {
        &self.workers
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn needs_heating(&self) -> bool {
        self.kind.needs_heating()
    }

    pub fn needs_worker(&self) -> bool {
        self.kind.output().is_some() && self.workers.len() < self.kind.max_workers()
    }

    /// Adds a worker to the roster when there is room; otherwise does nothing.
    pub fn assign_worker(&mut self, worker: WorkerId) {
        if self.workers.len() < self.kind.max_workers() && !self.workers.contains(&worker) {
            self.workers.push(worker);
        }
    }

    pub fn release_worker(&mut self, worker: WorkerId) {
        self.workers.retain(|id| *id != worker);
    }

    pub fn efficiency(&self, temperature: Temperature) -> f32 {
        if self.needs_heating() && temperature.celsius() < climate::EFFICIENCY_THRESHOLD {
            COLD_EFFICIENCY
        } else {
            1.0
        }
    }

    /// Completes one production cycle, returning the units credited to the ledger.
    pub fn produce(&self, ledger: &mut ResourceLedger, temperature: Temperature) -> u32 {
        let Some(output) = self.kind.output() else {
            return 0;
        };
        if self.workers.is_empty() {
            return 0;
        }
        ledger.add_fractional(output, self.workers.len() as f32 * self.efficiency(temperature))
    }

    pub fn tick(&mut self, temperature: Temperature) {
        if self.needs_heating() && temperature.celsius() < climate::DECAY_THRESHOLD {
            self.health = (self.health - COLD_DECAY_PER_TICK).max(0.0);
        }
    }
}
