//! Collision filter model.
//!
//! Every entity kind owns exactly one canonical [`CollisionFilter`]. These constructors are the
//! single source of truth for which kinds may physically interact; avian's `CollisionLayers`
//! are derived from them, and the group rule (which avian layers cannot express) is enforced
//! by the collision hooks in `plugins::physics`.
//!
//! ```text
//!               Player Tower Npc Projectile Harvestable Item OuterWall
//! Player          -     x    x      -           x        x      x
//! Tower           x     -    x      -           -        -      x
//! Npc             x     x    -g     x           x        -      x
//! Projectile      -     -    x      -g          x        -      x
//! ```
//! `x` = collide, `-` = reject by category/mask, `-g` = reject by shared group.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{bits, Layer};

/// No group: only categories and masks decide.
pub const NO_GROUP: u32 = 0;
/// All NPCs share a group so a crowd never collides with itself.
pub const NPC_GROUP: u32 = 1;
pub const PROJECTILE_GROUP: u32 = 2;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CollisionFilter {
    pub group: u32,
    pub categories: u32,
    pub mask: u32,
}

impl CollisionFilter {
    pub const fn new(group: u32, categories: u32, mask: u32) -> Self {
        Self {
            group,
            categories,
            mask,
        }
    }

    /// True when `a` and `b` must not interact.
    ///
    /// Both category/mask directions are evaluated explicitly: a one-sided match is a reject.
    #[inline]
    pub fn reject(a: &Self, b: &Self) -> bool {
        (a.group != NO_GROUP && a.group == b.group)
            || a.categories & b.mask == 0
            || b.categories & a.mask == 0
    }

    pub fn player() -> Self {
        Self::new(
            NO_GROUP,
            Layer::Player.to_bits(),
            bits(&[
                Layer::Tower,
                Layer::Npc,
                Layer::Harvestable,
                Layer::Item,
                Layer::OuterWall,
            ]),
        )
    }

    /// Towers and the castle.
    pub fn tower() -> Self {
        Self::new(
            NO_GROUP,
            Layer::Tower.to_bits(),
            bits(&[Layer::Player, Layer::Npc, Layer::OuterWall]),
        )
    }

    pub fn npc() -> Self {
        Self::new(
            NPC_GROUP,
            Layer::Npc.to_bits(),
            bits(&[
                Layer::Player,
                Layer::Tower,
                Layer::Projectile,
                Layer::Harvestable,
                Layer::OuterWall,
            ]),
        )
    }

    pub fn projectile() -> Self {
        Self::new(
            PROJECTILE_GROUP,
            Layer::Projectile.to_bits(),
            bits(&[Layer::Npc, Layer::Harvestable, Layer::OuterWall]),
        )
    }

    pub fn harvestable() -> Self {
        Self::new(
            NO_GROUP,
            Layer::Harvestable.to_bits(),
            bits(&[Layer::Player, Layer::Npc, Layer::Projectile]),
        )
    }

    pub fn item() -> Self {
        Self::new(NO_GROUP, Layer::Item.to_bits(), Layer::Player.to_bits())
    }

    pub fn outer_wall() -> Self {
        Self::new(
            NO_GROUP,
            Layer::OuterWall.to_bits(),
            bits(&[Layer::Player, Layer::Tower, Layer::Npc, Layer::Projectile]),
        )
    }

    /// Passive filter used by targeting: sees NPCs without being a physical shape.
    pub fn scanner() -> Self {
        Self::new(NO_GROUP, Layer::all_bits(), Layer::Npc.to_bits())
    }

    /// avian layers for the category/mask half of the filter.
    pub fn layers(&self) -> CollisionLayers {
        CollisionLayers::new(LayerMask(self.categories), LayerMask(self.mask))
    }

    /// Spatial query filter for the category/mask half. Groups are checked by the caller.
    pub fn query_filter(&self) -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask(LayerMask(self.mask))
    }
}

/// Closed set of game entity kinds.
///
/// Doubles as the collision-type tag that `plugins::bridge` keys its handlers on.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    /// Towers and the castle.
    Tower,
    Npc,
    Projectile,
    Harvestable,
    Item,
    OuterWall,
}

/// Which combat components an entity kind carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Exposes attack power (`AttackPower`).
    pub attacker: bool,
    /// Has health and armor and can be destroyed (`CombatStats`).
    pub defender: bool,
    /// Drops a `LootTable` when destroyed.
    pub lootable: bool,
    /// Can receive loot (`Inventory`).
    pub inventory: bool,
}

impl EntityKind {
    pub const ALL: [Self; 7] = [
        Self::Player,
        Self::Tower,
        Self::Npc,
        Self::Projectile,
        Self::Harvestable,
        Self::Item,
        Self::OuterWall,
    ];

    pub fn filter(self) -> CollisionFilter {
        match self {
            Self::Player => CollisionFilter::player(),
            Self::Tower => CollisionFilter::tower(),
            Self::Npc => CollisionFilter::npc(),
            Self::Projectile => CollisionFilter::projectile(),
            Self::Harvestable => CollisionFilter::harvestable(),
            Self::Item => CollisionFilter::item(),
            Self::OuterWall => CollisionFilter::outer_wall(),
        }
    }

    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Player => Capabilities {
                attacker: false,
                defender: true,
                lootable: false,
                inventory: true,
            },
            Self::Tower => Capabilities {
                attacker: false,
                defender: true,
                lootable: false,
                inventory: true,
            },
            Self::Npc => Capabilities {
                attacker: true,
                defender: true,
                lootable: true,
                inventory: false,
            },
            Self::Projectile => Capabilities {
                attacker: true,
                defender: false,
                lootable: false,
                inventory: false,
            },
            Self::Harvestable => Capabilities {
                attacker: false,
                defender: true,
                lootable: true,
                inventory: false,
            },
            Self::Item => Capabilities {
                attacker: false,
                defender: false,
                lootable: true,
                inventory: false,
            },
            Self::OuterWall => Capabilities {
                attacker: false,
                defender: false,
                lootable: false,
                inventory: false,
            },
        }
    }
}
