use anyhow::Result;

use crate::{
    components::{TreeId, WorldContext},
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Runs every worker's state machine once, in list order.
pub struct WorkerSystem;

impl WorkerSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorkerSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WorkerSystem {
    fn name(&self) -> &str {
        "workers"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let daytime = world.clock.is_daytime();
        let temperature = world.temperature;
        let mut claimed: Vec<TreeId> = Vec::with_capacity(world.workers.len());

        for index in 0..world.workers.len() {
            // Claims are read fresh so earlier workers' picks this tick count.
            claimed.clear();
            claimed.extend(
                world
                    .workers
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .filter_map(|(_, w)| w.assigned_tree),
            );

            let mut ctx = WorldContext {
                daytime,
                temperature,
                ledger: &mut world.ledger,
                buildings: &mut world.buildings,
                trees: &mut world.trees,
                claimed_trees: &claimed,
                tuning: &world.tuning,
            };
            world.workers[index].update(&mut ctx);
        }
        Ok(())
    }
}
