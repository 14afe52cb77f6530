use anyhow::Result;
use tracing::debug;

use crate::{
    components::{climate, ResourceKind},
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Ticks between coal draws.
pub const HEATING_INTERVAL_TICKS: u64 = 300;

/// Burns one coal per heated building while it is bitterly cold.
pub struct HeatingSystem;

impl HeatingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeatingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for HeatingSystem {
    fn name(&self) -> &str {
        "heating"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        if ctx.tick % HEATING_INTERVAL_TICKS != 0 {
            return Ok(());
        }
        if world.temperature.celsius() >= climate::EFFICIENCY_THRESHOLD {
            return Ok(());
        }
        let heated = world.buildings.iter().filter(|b| b.needs_heating()).count() as u32;
        let burned = world.ledger.consume(ResourceKind::Coal, heated);
        debug!(tick = ctx.tick, heated, burned, "heating drew coal");
        Ok(())
    }
}
