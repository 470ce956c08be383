//! Loot tables and the inventories they are credited to.

use bevy::prelude::*;
use rand::Rng;

use crate::common::error::{CombatError, CombatResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Wood,
    Stone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LootItem {
    Gold(u32),
    Resource { kind: ResourceKind, amount: u32 },
}

/// What a defender drops when destroyed.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub enum LootTable {
    #[default]
    Empty,
    Guaranteed(Vec<LootItem>),
    Gold(u32),
    /// Each item drops independently with its probability in `[0, 1]`.
    Chance(Vec<(LootItem, f32)>),
}

impl LootTable {
    /// Lazily evaluated drops, rolled with the thread RNG.
    ///
    /// Each call is a fresh evaluation: `Chance` tables may yield different items every time.
    pub fn result(&self) -> Box<dyn Iterator<Item = LootItem> + '_> {
        self.result_with(rand::rng())
    }

    pub fn result_with<'a, R: Rng + 'a>(
        &'a self,
        mut rng: R,
    ) -> Box<dyn Iterator<Item = LootItem> + 'a> {
        match self {
            Self::Empty => Box::new(std::iter::empty()),
            Self::Guaranteed(items) => Box::new(items.iter().copied()),
            Self::Gold(amount) => Box::new(std::iter::once(LootItem::Gold(*amount))),
            Self::Chance(rolls) => Box::new(rolls.iter().filter_map(move |(item, chance)| {
                rng.random_bool(f64::from(chance.clamp(0.0, 1.0)))
                    .then_some(*item)
            })),
        }
    }
}

/// Gold plus capacity-bounded resources.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    pub gold: u32,
    pub wood: u32,
    pub stone: u32,
    /// Upper bound on `wood + stone`. Gold is not limited.
    pub capacity: u32,
}

impl Inventory {
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity,
            ..default()
        }
    }

    pub fn resources(&self) -> u32 {
        self.wood + self.stone
    }

    /// Credit one evaluation of `table`. See [`Inventory::credit`].
    pub fn add_loot(&mut self, table: &LootTable) -> CombatResult<usize> {
        self.credit(table.result())
    }

    /// Credit `items`, returning how many were credited in full.
    ///
    /// Items that do not fit are credited partially (up to capacity) and reported as
    /// `InventoryFull`. What was credited stays credited.
    pub fn credit(&mut self, items: impl IntoIterator<Item = LootItem>) -> CombatResult<usize> {
        let mut credited = 0;
        let mut dropped = 0;

        for item in items {
            match item {
                LootItem::Gold(amount) => {
                    self.gold = self.gold.saturating_add(amount);
                    credited += 1;
                }
                LootItem::Resource { kind, amount } => {
                    let room = self.capacity.saturating_sub(self.resources());
                    let fits = amount.min(room);
                    match kind {
                        ResourceKind::Wood => self.wood += fits,
                        ResourceKind::Stone => self.stone += fits,
                    }
                    if fits == amount {
                        credited += 1;
                    } else {
                        dropped += 1;
                    }
                }
            }
        }

        if dropped > 0 {
            return Err(CombatError::InventoryFull { dropped });
        }
        Ok(credited)
    }
}
