pub mod commands;
pub mod components;
pub mod engine;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod world;

pub use commands::{Command, CommandError, ScheduledCommand};
pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use scenario::{Scenario, ScenarioLoader};
pub use snapshot::{ColonyView, SessionRecord};
pub use world::World;
