mod building;
pub mod climate;
mod clock;
mod ledger;
mod tree;
mod worker;

use serde::{Deserialize, Serialize};

pub use building::{Building, BuildingKind};
pub use climate::Temperature;
pub use clock::Clock;
pub use ledger::{ResourceKind, ResourceLedger};
pub use tree::{Tree, MAX_WOOD, REGROWTH_TICKS};
pub use worker::{Worker, WorkerState, WorkerTuning, WorldContext};

/// Simulation ticks per simulated second.
pub const TICKS_PER_SECOND: u64 = 60;

/// Edge length of a building footprint.
pub const TILE_SIZE: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both axis offsets are strictly below `reach`.
    pub fn within_box(self, other: Position, reach: f32) -> bool {
        (self.x - other.x).abs() < reach && (self.y - other.y).abs() < reach
    }
}
