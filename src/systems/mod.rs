mod buildings;
mod environment;
mod heating;
mod trees;
mod workers;

pub use buildings::BuildingSystem;
pub use environment::EnvironmentSystem;
pub use heating::HeatingSystem;
pub use trees::TreeSystem;
pub use workers::WorkerSystem;
