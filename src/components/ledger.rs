use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Coal,
    Wood,
    Food,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Coal => "coal",
            ResourceKind::Wood => "wood",
            ResourceKind::Food => "food",
        };
        f.write_str(name)
    }
}

/// Colony-wide stock of every resource kind.
///
/// Quantities are unsigned, and consumption saturates at zero instead of
/// failing, so the ledger can never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceLedger {
    #[serde(default)]
    pub coal: u32,
    #[serde(default)]
    pub wood: u32,
    #[serde(default)]
    pub food: u32,
}

impl ResourceLedger {
    pub fn new(coal: u32, wood: u32, food: u32) -> Self {
        Self { coal, wood, food }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Coal => self.coal,
            ResourceKind::Wood => self.wood,
            ResourceKind::Food => self.food,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Coal => &mut self.coal,
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Food => &mut self.food,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Stores fractional output rounded down to whole units and returns them.
    pub fn add_fractional(&mut self, kind: ResourceKind, amount: f32) -> u32 {
        if !(amount.is_finite() && amount > 0.0) {
            return 0;
        }
        let whole = amount.floor() as u32;
        self.add(kind, whole);
        whole
    }

    /// Removes up to `amount` units and returns how many were actually taken.
    pub fn consume(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let slot = self.slot_mut(kind);
        let taken = amount.min(*slot);
        *slot -= taken;
        taken
    }
}
