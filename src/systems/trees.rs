use anyhow::Result;
use rand::Rng;
use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Regrowth of depleted trees and occasional new saplings.
pub struct TreeSystem;

impl TreeSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TreeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for TreeSystem {
    fn name(&self) -> &str {
        "trees"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for tree in &mut world.trees {
            tree.tick();
        }

        let chance = world.forest().spawn_chance;
        if rng.gen::<f64>() < chance {
            if let Some(id) = world.spread_forest(rng) {
                debug!(tick = ctx.tick, tree = id.0, "a new tree sprouted");
            }
        }
        Ok(())
    }
}
