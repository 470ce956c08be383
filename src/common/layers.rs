//! Collision categories.
//!
//! One category per entity kind. The bit values feed both avian's `CollisionLayers`
//! and the `group`/`categories`/`mask` filters in `plugins::collision`.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Tower,
    Npc,
    Projectile,
    Harvestable,
    Item,
    OuterWall,
}

/// Bitmask of several layers.
pub fn bits(layers: &[Layer]) -> u32 {
    layers.iter().fold(0, |acc, layer| acc | layer.to_bits())
}
