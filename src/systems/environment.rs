use anyhow::Result;
use tracing::{debug, info};

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Advances the clock and the temperature random walk.
pub struct EnvironmentSystem;

impl EnvironmentSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvironmentSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for EnvironmentSystem {
    fn name(&self) -> &str {
        "environment"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let was_daytime = world.clock.is_daytime();
        let day = world.clock.day;
        world.clock.advance(ctx.tick);
        if world.clock.day != day {
            info!(
                day = world.clock.day,
                alive = world.workers_alive(),
                "a new day begins"
            );
        }
        if was_daytime != world.clock.is_daytime() {
            debug!(tick = ctx.tick, daytime = world.clock.is_daytime(), "light changed");
        }

        if world.temperature.update(ctx.tick, rng) {
            debug!(
                tick = ctx.tick,
                celsius = world.temperature.celsius(),
                "temperature shifted"
            );
        }
        Ok(())
    }
}
