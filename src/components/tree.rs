use serde::{Deserialize, Serialize};

use super::Position;

pub const MAX_WOOD: u32 = 200;
pub const REGROWTH_TICKS: u32 = 1_800;

/// A harvestable tree. Depleted trees regrow to full after a fixed delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub position: Position,
    wood: u32,
    depleted: bool,
    regrowth_timer: u32,
}

impl Tree {
    pub fn new(position: Position) -> Self {
        Self::with_wood(position, MAX_WOOD)
    }

    pub fn with_wood(position: Position, wood: u32) -> Self {
        let wood = wood.min(MAX_WOOD);
        Self {
            position,
            wood,
            depleted: wood == 0,
            regrowth_timer: 0,
        }
    }

    pub fn wood(&self) -> u32 {
        self.wood
    }

    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    pub fn regrowth_timer(&self) -> u32 {
        self.regrowth_timer
    }

    /// Takes one unit of wood. Returns the yield, which is 0 for a depleted tree.
    pub fn chop(&mut self) -> u32 {
        if self.depleted || self.wood == 0 {
            return 0;
        }
        self.wood -= 1;
        if self.wood == 0 {
            self.depleted = true;
        }
        1
    }

    pub fn tick(&mut self) {
        if !self.depleted {
            return;
        }
        self.regrowth_timer += 1;
        if self.regrowth_timer >= REGROWTH_TICKS {
            self.regrowth_timer = 0;
            self.depleted = false;
            self.wood = MAX_WOOD;
        }
    }
}
