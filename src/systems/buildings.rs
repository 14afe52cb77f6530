use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Structural cold decay of heated buildings.
pub struct BuildingSystem;

impl BuildingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for BuildingSystem {
    fn name(&self) -> &str {
        "buildings"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let temperature = world.temperature;
        for building in &mut world.buildings {
            building.tick(temperature);
        }
        Ok(())
    }
}
