//! Damage & loot pipeline.
//!
//! - `components`: `CombatStats`, `AttackPower` and the `Attacker`/`Defender` capabilities.
//! - `damage`: the pure formula plus `DamagePipeline`, which applies it to the world.
//! - `loot`: loot tables and inventories.
//! - `log`: the damage log presentation drains.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::collision::EntityKind;

pub mod components;
pub mod damage;
pub mod log;
pub mod loot;

pub use components::{AttackPower, Attacker, CombatStats, Defender};
pub use damage::{DamageOutcome, DamagePipeline, apply_damage};

/// A defender reached zero health and its removal was queued. Written once per entity.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct EntityDestroyed {
    pub entity: Entity,
    pub kind: EntityKind,
}

pub fn plugin(app: &mut App) {
    app.add_message::<EntityDestroyed>();
    app.init_resource::<log::DamageLog>();

    app.add_systems(
        FixedPostUpdate,
        log::expire_damage_records
            .after(crate::plugins::bridge::BridgeSystems)
            .run_if(in_state(GameState::InGame)),
    );
}
