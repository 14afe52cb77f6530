use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    Building, BuildingId, BuildingKind, Position, ResourceKind, ResourceLedger, Temperature,
    Tree, TreeId, WorkerId,
};

pub const MAX_STAT: f32 = 100.0;

const ARRIVAL_RADIUS: f32 = 2.0;
const SHELTER_RADIUS: f32 = 5.0;

const WORK_CYCLE_TICKS: u32 = 60;
const CHOP_CYCLE_TICKS: u32 = 120;
const HEALING_CYCLE_TICKS: u32 = 300;

const EXHAUSTED_BELOW: f32 = 20.0;
const RESTED_AT: f32 = 80.0;
const REST_GAIN: f32 = 2.0;
const MEAL_HUNGER_RELIEF: f32 = 30.0;
const MEAL_HEALTH_GAIN: f32 = 10.0;
const SHELTER_HEALTH_GAIN: f32 = 20.0;
const EMERGENCY_HEALTH: f32 = 20.0;

const HUNGER_PER_TICK: f32 = 0.1;
const FATIGUE_PER_TICK: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    Idle,
    Working,
    Eating,
    Resting,
    Gathering,
    SeekingShelter,
    InShelter,
}

impl WorkerState {
    pub fn is_sheltering(self) -> bool {
        matches!(self, WorkerState::SeekingShelter | WorkerState::InShelter)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Idle => "idle",
            WorkerState::Working => "working",
            WorkerState::Eating => "eating",
            WorkerState::Resting => "resting",
            WorkerState::Gathering => "gathering",
            WorkerState::SeekingShelter => "seeking_shelter",
            WorkerState::InShelter => "in_shelter",
        };
        f.write_str(name)
    }
}

fn default_speed() -> f32 {
    1.0
}

/// Per-scenario knobs for worker behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerTuning {
    /// Distance covered per tick while walking.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// When set, idle workers at or above this hunger go eat if food is stocked.
    #[serde(default)]
    pub auto_eat_hunger: Option<f32>,
}

impl Default for WorkerTuning {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            auto_eat_hunger: None,
        }
    }
}

/// Cold exposure band: damage dealt every `interval` ticks outside shelter.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColdBand {
    interval: u32,
    health_loss: f32,
    energy_loss: f32,
}

fn cold_band(celsius: i32) -> Option<ColdBand> {
    match celsius {
        5..=14 => Some(ColdBand {
            interval: 120,
            health_loss: 5.0,
            energy_loss: 2.0,
        }),
        -15..=4 => Some(ColdBand {
            interval: 180,
            health_loss: 10.0,
            energy_loss: 5.0,
        }),
        c if c < -15 => Some(ColdBand {
            interval: 120,
            health_loss: 15.0,
            energy_loss: 8.0,
        }),
        _ => None,
    }
}

/// Shared colony state a worker reads and mutates during its update.
pub struct WorldContext<'a> {
    pub daytime: bool,
    pub temperature: Temperature,
    pub ledger: &'a mut ResourceLedger,
    pub buildings: &'a mut [Building],
    pub trees: &'a mut [Tree],
    /// Trees currently assigned to other workers.
    pub claimed_trees: &'a [TreeId],
    pub tuning: &'a WorkerTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub position: Position,
    pub target: Position,
    pub state: WorkerState,
    pub health: f32,
    pub hunger: f32,
    pub energy: f32,
    pub assigned_building: Option<BuildingId>,
    pub assigned_tree: Option<TreeId>,
    pub shelter: Option<BuildingId>,
    pub work_progress: u32,
    pub manual_assignment: bool,
    pub cold_timer: u32,
    pub healing_timer: u32,
}

impl Worker {
    pub fn new(id: WorkerId, position: Position) -> Self {
        Self {
            id,
            position,
            target: position,
            state: WorkerState::Idle,
            health: MAX_STAT,
            hunger: 0.0,
            energy: MAX_STAT,
            assigned_building: None,
            assigned_tree: None,
            shelter: None,
            work_progress: 0,
            manual_assignment: false,
            cold_timer: 0,
            healing_timer: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Runs one tick of movement, behaviour, needs and cold exposure.
    pub fn update(&mut self, ctx: &mut WorldContext<'_>) {
        self.step_towards_target(ctx.tuning.speed);

        if ctx.daytime {
            self.run_state(ctx);
        } else {
            self.nightfall(ctx.buildings);
        }

        self.hunger += HUNGER_PER_TICK;
        self.energy -= FATIGUE_PER_TICK;

        self.apply_cold(ctx.temperature);

        if self.health <= EMERGENCY_HEALTH && !self.state.is_sheltering() {
            self.seek_emergency_shelter(ctx.buildings);
        }

        self.hunger = self.hunger.min(MAX_STAT);
        self.energy = self.energy.max(0.0);
        self.health = self.health.max(0.0);
    }

    fn step_towards_target(&mut self, speed: f32) {
        let distance = self.position.distance_to(self.target);
        if distance > ARRIVAL_RADIUS {
            self.position.x += (self.target.x - self.position.x) / distance * speed;
            self.position.y += (self.target.y - self.position.y) / distance * speed;
        } else {
            self.position = self.target;
        }
    }

    fn nightfall(&mut self, buildings: &mut [Building]) {
        self.state = WorkerState::Resting;
        self.release_building(buildings);
        self.assigned_tree = None;
        self.manual_assignment = false;
    }

    fn run_state(&mut self, ctx: &mut WorldContext<'_>) {
        match self.state {
            WorkerState::Idle => {
                if !self.manual_assignment {
                    self.look_for_work(ctx);
                }
            }
            WorkerState::Working => self.work(ctx),
            WorkerState::Gathering => self.gather(ctx),
            WorkerState::Eating => self.eat(ctx.ledger),
            WorkerState::Resting => self.rest(),
            WorkerState::SeekingShelter => self.approach_shelter(ctx.buildings),
            WorkerState::InShelter => self.heal(),
        }
    }

    fn look_for_work(&mut self, ctx: &mut WorldContext<'_>) {
        if let Some(threshold) = ctx.tuning.auto_eat_hunger {
            if self.hunger >= threshold && ctx.ledger.food > 0 {
                self.state = WorkerState::Eating;
                return;
            }
        }

        if let Some(index) = ctx.buildings.iter().position(Building::needs_worker) {
            let id = BuildingId(index);
            let building = &mut ctx.buildings[index];
            self.assigned_building = Some(id);
            self.target = building.center();
            self.state = WorkerState::Working;
            self.work_progress = 0;
            building.assign_worker(self.id);
            debug!(worker = self.id.0, building = index, kind = ?building.kind, "worker took a job");
            return;
        }

        let open_tree = ctx.trees.iter().enumerate().find(|(index, tree)| {
            !tree.is_depleted() && !ctx.claimed_trees.contains(&TreeId(*index))
        });
        if let Some((index, tree)) = open_tree {
            self.assigned_tree = Some(TreeId(index));
            self.target = tree.position;
            self.state = WorkerState::Gathering;
            self.work_progress = 0;
            debug!(worker = self.id.0, tree = index, "worker heading to a tree");
        }
    }

    fn work(&mut self, ctx: &mut WorldContext<'_>) {
        let building = match self.assigned_building {
            Some(id) if self.energy >= EXHAUSTED_BELOW => id,
            _ => {
                self.state = WorkerState::Resting;
                self.release_building(ctx.buildings);
                return;
            }
        };

        self.work_progress += 1;
        if self.work_progress >= WORK_CYCLE_TICKS {
            if let Some(building) = ctx.buildings.get(building.0) {
                building.produce(ctx.ledger, ctx.temperature);
            }
            self.work_progress = 0;
        }
    }

    fn gather(&mut self, ctx: &mut WorldContext<'_>) {
        let tree = match self.assigned_tree {
            Some(id) if self.energy >= EXHAUSTED_BELOW => id,
            _ => {
                self.state = WorkerState::Resting;
                self.assigned_tree = None;
                return;
            }
        };

        self.work_progress += 1;
        if self.work_progress >= CHOP_CYCLE_TICKS {
            let gained = ctx.trees.get_mut(tree.0).map_or(0, Tree::chop);
            ctx.ledger.add(ResourceKind::Wood, gained);
            self.work_progress = 0;
            self.assigned_tree = None;
            self.state = WorkerState::Idle;
        }
    }

    fn eat(&mut self, ledger: &mut ResourceLedger) {
        if ledger.consume(ResourceKind::Food, 1) == 1 {
            self.hunger = (self.hunger - MEAL_HUNGER_RELIEF).max(0.0);
            self.health = (self.health + MEAL_HEALTH_GAIN).min(MAX_STAT);
        }
        self.state = WorkerState::Idle;
    }

    fn rest(&mut self) {
        self.energy = (self.energy + REST_GAIN).min(MAX_STAT);
        if self.energy >= RESTED_AT {
            self.state = WorkerState::Idle;
        }
    }

    fn approach_shelter(&mut self, buildings: &[Building]) {
        let Some(center) = self
            .shelter
            .and_then(|id| buildings.get(id.0))
            .map(Building::center)
        else {
            return;
        };
        if self.position.distance_to(center) < SHELTER_RADIUS {
            self.state = WorkerState::InShelter;
            self.position = center;
        }
    }

    fn heal(&mut self) {
        self.healing_timer += 1;
        if self.healing_timer < HEALING_CYCLE_TICKS {
            return;
        }
        self.health += SHELTER_HEALTH_GAIN;
        self.healing_timer = 0;
        if self.health >= MAX_STAT {
            self.health = MAX_STAT;
            self.state = WorkerState::Idle;
            self.shelter = None;
            self.manual_assignment = false;
            debug!(worker = self.id.0, "worker recovered and left shelter");
        }
    }

    fn apply_cold(&mut self, temperature: Temperature) {
        self.cold_timer += 1;
        if self.state == WorkerState::InShelter {
            self.cold_timer = 0;
            return;
        }
        match cold_band(temperature.celsius()) {
            Some(band) => {
                if self.cold_timer >= band.interval {
                    self.health -= band.health_loss;
                    self.energy -= band.energy_loss;
                    self.cold_timer = 0;
                }
            }
            None => self.cold_timer = 0,
        }
    }

    fn seek_emergency_shelter(&mut self, buildings: &mut [Building]) {
        let mut nearest: Option<(usize, f32)> = None;
        for (index, building) in buildings.iter().enumerate() {
            if building.kind != BuildingKind::House {
                continue;
            }
            let distance = self.position.distance_to(building.position);
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }

        let Some((index, _)) = nearest else {
            return;
        };
        self.shelter = Some(BuildingId(index));
        self.target = buildings[index].center();
        self.state = WorkerState::SeekingShelter;
        self.release_building(buildings);
        self.assigned_tree = None;
        self.manual_assignment = false;
        debug!(worker = self.id.0, house = index, health = self.health, "worker seeking shelter");
    }

    fn release_building(&mut self, buildings: &mut [Building]) {
        if let Some(id) = self.assigned_building.take() {
            if let Some(building) = buildings.get_mut(id.0) {
                building.release_worker(self.id);
            }
        }
    }

    /// Sends the worker to chop `tree`. Never refused by the tree itself.
    pub fn assign_to_tree(&mut self, id: TreeId, tree: &Tree, buildings: &mut [Building]) {
        self.release_building(buildings);
        self.assigned_tree = Some(id);
        self.target = tree.position;
        self.state = WorkerState::Gathering;
        self.work_progress = 0;
        self.manual_assignment = true;
    }

    /// Staffs `building`. Returns false, changing nothing, when it takes no more workers.
    pub fn assign_to_building(&mut self, id: BuildingId, buildings: &mut [Building]) -> bool {
        match buildings.get(id.0) {
            Some(building) if building.needs_worker() => {}
            _ => return false,
        }
        self.release_building(buildings);
        let building = &mut buildings[id.0];
        self.assigned_tree = None;
        self.assigned_building = Some(id);
        self.target = building.center();
        self.state = WorkerState::Working;
        self.work_progress = 0;
        self.manual_assignment = true;
        building.assign_worker(self.id);
        true
    }

    /// Drops any task and takes a meal on the next daytime update.
    pub fn send_to_eat(&mut self, buildings: &mut [Building]) {
        self.release_building(buildings);
        self.assigned_tree = None;
        self.state = WorkerState::Eating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::MAX_WOOD;

    struct Colony {
        ledger: ResourceLedger,
        buildings: Vec<Building>,
        trees: Vec<Tree>,
        tuning: WorkerTuning,
    }

    impl Colony {
        fn new() -> Self {
            Self {
                ledger: ResourceLedger::default(),
                buildings: Vec::new(),
                trees: Vec::new(),
                tuning: WorkerTuning::default(),
            }
        }

        fn step(&mut self, worker: &mut Worker, daytime: bool, celsius: i32) {
            let mut ctx = WorldContext {
                daytime,
                temperature: Temperature::new(celsius),
                ledger: &mut self.ledger,
                buildings: &mut self.buildings,
                trees: &mut self.trees,
                claimed_trees: &[],
                tuning: &self.tuning,
            };
            worker.update(&mut ctx);
        }
    }

    #[test]
    fn cold_bands_match_exposure_table() {
        assert_eq!(cold_band(10).map(|b| b.interval), Some(120));
        assert_eq!(cold_band(4).map(|b| b.health_loss), Some(10.0));
        assert_eq!(cold_band(-15).map(|b| b.interval), Some(180));
        assert_eq!(cold_band(-16).map(|b| b.energy_loss), Some(8.0));
        assert!(cold_band(15).is_none());
        assert!(cold_band(30).is_none());
    }

    #[test]
    fn chill_band_strikes_every_180_ticks() {
        let mut colony = Colony::new();
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.manual_assignment = true;
        for _ in 0..179 {
            colony.step(&mut worker, true, 0);
        }
        assert_eq!(worker.health, MAX_STAT);
        assert_eq!(worker.cold_timer, 179);

        colony.step(&mut worker, true, 0);
        assert_eq!(worker.health, 90.0);
        assert_eq!(worker.cold_timer, 0);
        // 180 ticks of fatigue plus the cold hit.
        assert!((worker.energy - 86.0).abs() < 1e-2);
    }

    #[test]
    fn mild_weather_resets_the_cold_timer() {
        let mut colony = Colony::new();
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.manual_assignment = true;
        worker.cold_timer = 170;
        for _ in 0..50 {
            colony.step(&mut worker, true, 20);
            assert_eq!(worker.cold_timer, 0);
        }
        assert_eq!(worker.health, MAX_STAT);
    }

    #[test]
    fn exhausted_gatherer_drops_the_tree() {
        let mut colony = Colony::new();
        colony.trees.push(Tree::new(Position::new(5.0, 5.0)));
        let tree = colony.trees[0].clone();
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.assign_to_tree(TreeId(0), &tree, &mut colony.buildings);
        worker.energy = 19.0;
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.state, WorkerState::Resting);
        assert_eq!(worker.assigned_tree, None);
        assert_eq!(colony.trees[0].wood(), MAX_WOOD);
    }

    #[test]
    fn shelter_heals_twenty_every_300_ticks() {
        let mut colony = Colony::new();
        colony
            .buildings
            .push(Building::new(BuildingKind::House, Position::default()));
        let mut worker = Worker::new(WorkerId(0), Position::new(16.0, 16.0));
        worker.state = WorkerState::InShelter;
        worker.shelter = Some(BuildingId(0));
        worker.health = 40.0;

        for _ in 0..299 {
            colony.step(&mut worker, true, 20);
        }
        assert_eq!(worker.health, 40.0);
        assert_eq!(worker.healing_timer, 299);

        colony.step(&mut worker, true, 20);
        assert_eq!(worker.health, 60.0);
        assert_eq!(worker.healing_timer, 0);
        assert_eq!(worker.state, WorkerState::InShelter);

        for _ in 0..300 {
            colony.step(&mut worker, true, 20);
        }
        assert_eq!(worker.health, 80.0);
        assert_eq!(worker.state, WorkerState::InShelter);

        for _ in 0..300 {
            colony.step(&mut worker, true, 20);
        }
        assert_eq!(worker.health, MAX_STAT);
        assert_eq!(worker.state, WorkerState::Idle);
        assert_eq!(worker.shelter, None);
    }

    #[test]
    fn walks_at_fixed_speed_and_snaps_on_arrival() {
        let mut colony = Colony::new();
        let mut worker = Worker::new(WorkerId(0), Position::new(0.0, 0.0));
        worker.manual_assignment = true;
        worker.target = Position::new(10.0, 0.0);
        colony.step(&mut worker, true, 20);
        assert!((worker.position.x - 1.0).abs() < 1e-4);
        for _ in 0..7 {
            colony.step(&mut worker, true, 20);
        }
        // 8 units walked, within snapping distance of the target.
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.position, Position::new(10.0, 0.0));
    }

    #[test]
    fn night_forces_rest_and_clears_assignments() {
        let mut colony = Colony::new();
        colony
            .buildings
            .push(Building::new(BuildingKind::Farm, Position::default()));
        let mut worker = Worker::new(WorkerId(0), Position::default());
        assert!(worker.assign_to_building(BuildingId(0), &mut colony.buildings));
        assert_eq!(colony.buildings[0].workers().len(), 1);

        colony.step(&mut worker, false, 20);
        assert_eq!(worker.state, WorkerState::Resting);
        assert_eq!(worker.assigned_building, None);
        assert!(!worker.manual_assignment);
        assert!(colony.buildings[0].workers().is_empty());
    }

    #[test]
    fn idle_worker_prefers_buildings_over_trees() {
        let mut colony = Colony::new();
        colony
            .buildings
            .push(Building::new(BuildingKind::House, Position::default()));
        colony
            .buildings
            .push(Building::new(BuildingKind::Sawmill, Position::new(64.0, 0.0)));
        colony.trees.push(Tree::new(Position::new(5.0, 5.0)));
        let mut worker = Worker::new(WorkerId(3), Position::default());
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.state, WorkerState::Working);
        assert_eq!(worker.assigned_building, Some(BuildingId(1)));
        assert_eq!(worker.target, Position::new(80.0, 16.0));
        assert_eq!(colony.buildings[1].workers(), &[WorkerId(3)]);
    }

    #[test]
    fn idle_worker_skips_claimed_and_depleted_trees() {
        let mut ledger = ResourceLedger::default();
        let mut buildings = Vec::new();
        let mut trees = vec![
            Tree::with_wood(Position::new(1.0, 1.0), 0),
            Tree::new(Position::new(2.0, 2.0)),
            Tree::new(Position::new(3.0, 3.0)),
        ];
        let tuning = WorkerTuning::default();
        let claimed = [TreeId(1)];
        let mut worker = Worker::new(WorkerId(0), Position::default());
        let mut ctx = WorldContext {
            daytime: true,
            temperature: Temperature::new(20),
            ledger: &mut ledger,
            buildings: &mut buildings,
            trees: &mut trees,
            claimed_trees: &claimed,
            tuning: &tuning,
        };
        worker.update(&mut ctx);
        assert_eq!(worker.state, WorkerState::Gathering);
        assert_eq!(worker.assigned_tree, Some(TreeId(2)));
    }

    #[test]
    fn exhausted_worker_stops_working() {
        let mut colony = Colony::new();
        colony
            .buildings
            .push(Building::new(BuildingKind::CoalMine, Position::default()));
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.assign_to_building(BuildingId(0), &mut colony.buildings);
        worker.energy = 19.0;
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.state, WorkerState::Resting);
        assert_eq!(worker.assigned_building, None);
        assert!(colony.buildings[0].needs_worker());
    }

    #[test]
    fn resting_recovers_until_eighty() {
        let mut colony = Colony::new();
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.state = WorkerState::Resting;
        worker.energy = 70.0;
        for _ in 0..5 {
            colony.step(&mut worker, true, 20);
        }
        assert_eq!(worker.state, WorkerState::Resting);
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.state, WorkerState::Idle);
        assert!(worker.energy >= RESTED_AT);
    }

    #[test]
    fn eating_uses_food_and_always_returns_to_idle() {
        let mut colony = Colony::new();
        colony.ledger.food = 1;
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.manual_assignment = true;
        worker.hunger = 50.0;
        worker.health = 95.0;
        worker.send_to_eat(&mut colony.buildings);
        colony.step(&mut worker, true, 20);
        assert_eq!(colony.ledger.food, 0);
        assert_eq!(worker.state, WorkerState::Idle);
        assert!((worker.hunger - 20.1).abs() < 1e-3);
        assert_eq!(worker.health, MAX_STAT);

        worker.send_to_eat(&mut colony.buildings);
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.state, WorkerState::Idle);
        assert!(worker.hunger > 20.0);
    }

    #[test]
    fn auto_eat_threshold_sends_hungry_idle_workers_to_eat() {
        let mut colony = Colony::new();
        colony.tuning.auto_eat_hunger = Some(60.0);
        colony.ledger.food = 2;
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.hunger = 65.0;
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.state, WorkerState::Eating);
        colony.step(&mut worker, true, 20);
        assert_eq!(colony.ledger.food, 1);
        assert_eq!(worker.state, WorkerState::Idle);
    }

    #[test]
    fn shelter_blocks_cold_damage() {
        let mut colony = Colony::new();
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.state = WorkerState::InShelter;
        worker.health = 50.0;
        for _ in 0..299 {
            colony.step(&mut worker, true, -30);
        }
        assert_eq!(worker.health, 50.0);
        assert_eq!(worker.cold_timer, 0);
    }

    #[test]
    fn no_house_means_no_shelter() {
        let mut colony = Colony::new();
        colony
            .buildings
            .push(Building::new(BuildingKind::Storage, Position::default()));
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.manual_assignment = true;
        worker.health = 15.0;
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.state, WorkerState::Idle);
        assert_eq!(worker.shelter, None);
    }

    #[test]
    fn emergency_shelter_picks_nearest_house() {
        let mut colony = Colony::new();
        colony
            .buildings
            .push(Building::new(BuildingKind::House, Position::new(300.0, 0.0)));
        colony
            .buildings
            .push(Building::new(BuildingKind::House, Position::new(40.0, 0.0)));
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.manual_assignment = true;
        worker.health = 20.0;
        colony.step(&mut worker, true, 20);
        assert_eq!(worker.state, WorkerState::SeekingShelter);
        assert_eq!(worker.shelter, Some(BuildingId(1)));
        assert_eq!(worker.target, Position::new(56.0, 16.0));
        assert!(!worker.manual_assignment);
    }

    #[test]
    fn stats_stay_clamped() {
        let mut colony = Colony::new();
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.manual_assignment = true;
        worker.hunger = 99.95;
        worker.energy = 0.01;
        worker.health = 3.0;
        worker.cold_timer = 119;
        colony.step(&mut worker, true, -20);
        assert_eq!(worker.hunger, MAX_STAT);
        assert_eq!(worker.energy, 0.0);
        assert_eq!(worker.health, 0.0);
    }

    #[test]
    fn manual_building_assignment_rejects_full_buildings() {
        let mut buildings = vec![Building::new(BuildingKind::Sawmill, Position::default())];
        let mut first = Worker::new(WorkerId(0), Position::default());
        let mut second = Worker::new(WorkerId(1), Position::default());
        let mut third = Worker::new(WorkerId(2), Position::default());
        assert!(first.assign_to_building(BuildingId(0), &mut buildings));
        assert!(second.assign_to_building(BuildingId(0), &mut buildings));
        assert!(!third.assign_to_building(BuildingId(0), &mut buildings));
        assert_eq!(third.state, WorkerState::Idle);
        assert!(!third.manual_assignment);
    }

    #[test]
    fn reassigning_to_a_tree_frees_the_building_slot() {
        let mut buildings = vec![Building::new(BuildingKind::Sawmill, Position::default())];
        let tree = Tree::new(Position::new(50.0, 50.0));
        let mut worker = Worker::new(WorkerId(0), Position::default());
        worker.assign_to_building(BuildingId(0), &mut buildings);
        worker.assign_to_tree(TreeId(0), &tree, &mut buildings);
        assert_eq!(worker.state, WorkerState::Gathering);
        assert_eq!(worker.assigned_building, None);
        assert_eq!(worker.assigned_tree, Some(TreeId(0)));
        assert!(buildings[0].workers().is_empty());
    }
}
