use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::components::{
    Building, BuildingId, BuildingKind, Clock, Position, ResourceKind, ResourceLedger,
    Temperature, Tree, TreeId, Worker, WorkerId, WorkerState, WorkerTuning, TILE_SIZE,
};

fn default_width() -> f32 {
    1024.0
}

fn default_height() -> f32 {
    768.0
}

fn default_ui_margin() -> f32 {
    100.0
}

/// Placeable area of the map. The top `ui_margin` strip is kept clear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_ui_margin")]
    pub ui_margin: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            ui_margin: default_ui_margin(),
        }
    }
}

impl Playfield {
    pub fn is_valid(&self) -> bool {
        self.x_range().0 < self.x_range().1 && self.y_range().0 < self.y_range().1
    }

    fn x_range(&self) -> (f32, f32) {
        (50.0, self.width - 100.0)
    }

    fn y_range(&self) -> (f32, f32) {
        (self.ui_margin + 50.0, self.height - 100.0)
    }

    /// Samples a whole-unit point inside the plantable area, if there is one.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        if !self.is_valid() {
            return None;
        }
        let (x_min, x_max) = self.x_range();
        let (y_min, y_max) = self.y_range();
        let x = rng.gen_range(x_min as i32..=x_max as i32);
        let y = rng.gen_range(y_min as i32..=y_max as i32);
        Some(Position::new(x as f32, y as f32))
    }
}

fn default_tree_cap() -> usize {
    12
}

fn default_spawn_chance() -> f64 {
    0.001
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestSettings {
    /// Random planting stops once this many trees exist.
    #[serde(default = "default_tree_cap")]
    pub cap: usize,
    /// Per-tick probability of attempting a random planting.
    #[serde(default = "default_spawn_chance")]
    pub spawn_chance: f64,
}

impl Default for ForestSettings {
    fn default() -> Self {
        Self {
            cap: default_tree_cap(),
            spawn_chance: default_spawn_chance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("not enough {resource}: need {needed}, have {available}")]
    Unaffordable {
        resource: ResourceKind,
        needed: u32,
        available: u32,
    },
    #[error("site ({x}, {y}) overlaps an existing building or tree")]
    Occupied { x: f32, y: f32 },
}

/// The whole colony: environment, stock and every entity.
///
/// Entities are kept in creation order and never removed, so ids stay
/// valid and list scans are deterministic.
#[derive(Debug, Clone)]
pub struct World {
    tick: u64,
    pub(crate) clock: Clock,
    pub(crate) temperature: Temperature,
    pub(crate) ledger: ResourceLedger,
    pub(crate) workers: Vec<Worker>,
    pub(crate) buildings: Vec<Building>,
    pub(crate) trees: Vec<Tree>,
    pub(crate) playfield: Playfield,
    pub(crate) forest: ForestSettings,
    pub(crate) tuning: WorkerTuning,
    selected_worker: Option<WorkerId>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(
            Clock::default(),
            Temperature::default(),
            ResourceLedger::default(),
        )
    }
}

impl World {
    pub fn new(clock: Clock, temperature: Temperature, ledger: ResourceLedger) -> Self {
        Self {
            tick: 0,
            clock,
            temperature,
            ledger,
            workers: Vec::new(),
            buildings: Vec::new(),
            trees: Vec::new(),
            playfield: Playfield::default(),
            forest: ForestSettings::default(),
            tuning: WorkerTuning::default(),
            selected_worker: None,
        }
    }

    pub fn with_playfield(mut self, playfield: Playfield) -> Self {
        self.playfield = playfield;
        self
    }

    pub fn with_forest(mut self, forest: ForestSettings) -> Self {
        self.forest = forest;
        self
    }

    pub fn with_tuning(mut self, tuning: WorkerTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Increments the tick counter and returns the tick about to run.
    pub(crate) fn begin_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn is_daytime(&self) -> bool {
        self.clock.is_daytime()
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: Temperature) {
        self.temperature = temperature;
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn resources_mut(&mut self) -> &mut ResourceLedger {
        &mut self.ledger
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.get(id.0)
    }

    pub fn worker_mut(&mut self, id: WorkerId) -> Option<&mut Worker> {
        self.workers.get_mut(id.0)
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.0)
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn tree(&self, id: TreeId) -> Option<&Tree> {
        self.trees.get(id.0)
    }

    pub fn selected_worker(&self) -> Option<WorkerId> {
        self.selected_worker
    }

    pub fn workers_alive(&self) -> usize {
        self.workers.iter().filter(|w| w.is_alive()).count()
    }

    pub fn spawn_worker(&mut self, position: Position) -> WorkerId {
        let id = WorkerId(self.workers.len());
        self.workers.push(Worker::new(id, position));
        id
    }

    /// Places a building without charging for it (world generation).
    pub fn place_building(&mut self, kind: BuildingKind, position: Position) -> BuildingId {
        let id = BuildingId(self.buildings.len());
        self.buildings.push(Building::new(kind, position));
        id
    }

    pub fn plant_tree(&mut self, tree: Tree) -> TreeId {
        let id = TreeId(self.trees.len());
        self.trees.push(tree);
        id
    }

    fn near_building(&self, position: Position) -> bool {
        self.buildings
            .iter()
            .any(|b| b.position.within_box(position, TILE_SIZE * 2.0))
    }

    /// One random planting attempt; skipped when the spot crowds a building.
    pub fn try_plant_random_tree<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<TreeId> {
        let position = self.playfield.sample(rng)?;
        if self.near_building(position) {
            return None;
        }
        Some(self.plant_tree(Tree::new(position)))
    }

    /// Planting attempt used by the regrowth cycle, bounded by the forest cap.
    pub fn spread_forest<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<TreeId> {
        if self.trees.len() >= self.forest.cap {
            return None;
        }
        self.try_plant_random_tree(rng)
    }

    pub(crate) fn forest(&self) -> &ForestSettings {
        &self.forest
    }

    /// Charges the construction cost and places a building at `position`.
    pub fn construct_building(
        &mut self,
        kind: BuildingKind,
        position: Position,
    ) -> Result<BuildingId, ConstructionError> {
        let cost = kind.construction_cost();
        for (resource, needed) in &cost {
            let available = self.ledger.get(*resource);
            if available < *needed {
                return Err(ConstructionError::Unaffordable {
                    resource: *resource,
                    needed: *needed,
                    available,
                });
            }
        }

        let occupied = self
            .buildings
            .iter()
            .map(|b| b.position)
            .chain(self.trees.iter().map(|t| t.position))
            .any(|other| other.within_box(position, TILE_SIZE));
        if occupied {
            return Err(ConstructionError::Occupied {
                x: position.x,
                y: position.y,
            });
        }

        for (resource, amount) in &cost {
            self.ledger.consume(*resource, *amount);
        }
        let id = self.place_building(kind, position);
        info!(building = id.0, ?kind, x = position.x, y = position.y, "building constructed");
        Ok(id)
    }

    pub fn select_worker(&mut self, id: WorkerId) -> bool {
        if self.worker(id).is_none() {
            return false;
        }
        self.selected_worker = Some(id);
        true
    }

    /// Manually sends a worker to a standing tree.
    pub fn assign_worker_to_tree(&mut self, worker: WorkerId, tree: TreeId) -> bool {
        let Some(target) = self.trees.get(tree.0) else {
            return false;
        };
        if target.is_depleted() {
            return false;
        }
        let Some(agent) = self.workers.get_mut(worker.0) else {
            return false;
        };
        agent.assign_to_tree(tree, target, &mut self.buildings);
        debug!(worker = worker.0, tree = tree.0, "manual tree assignment");
        true
    }

    /// Manually staffs a building. Fails for full or non-producing buildings.
    pub fn assign_worker_to_building(&mut self, worker: WorkerId, building: BuildingId) -> bool {
        let Some(agent) = self.workers.get_mut(worker.0) else {
            return false;
        };
        let accepted = agent.assign_to_building(building, &mut self.buildings);
        debug!(worker = worker.0, building = building.0, accepted, "manual building assignment");
        accepted
    }

    /// Sends a worker to eat. Sheltering workers are left alone.
    pub fn feed_worker(&mut self, worker: WorkerId) -> bool {
        match self.workers.get_mut(worker.0) {
            Some(agent) if !agent.state.is_sheltering() => {
                agent.send_to_eat(&mut self.buildings);
                true
            }
            _ => false,
        }
    }

    pub fn workers_in(&self, state: WorkerState) -> usize {
        self.workers.iter().filter(|w| w.state == state).count()
    }
}
