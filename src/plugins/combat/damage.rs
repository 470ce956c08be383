//! Damage formula and its application to the world.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{Attacker, CombatStats, Defender};
use super::log::{DamageLog, DamageRecord};
use super::loot::{Inventory, LootTable};
use super::EntityDestroyed;
use crate::common::error::{CombatError, CombatResult};
use crate::plugins::collision::EntityKind;
use crate::plugins::entities::EntityManager;

/// `power - armor` taken off the defender's health.
///
/// No floor: when armor exceeds power the damage is negative and heals the defender
/// (still capped at max health).
pub fn apply_damage(
    attacker: &impl Attacker,
    defender: &mut impl Defender,
    now: f32,
    position: Vec2,
) -> DamageRecord {
    let damage = attacker.power() - defender.armor();
    defender.set_health(defender.health() - damage);

    DamageRecord {
        game_time: now,
        damage,
        position,
        fatal: defender.health() <= 0.0,
    }
}

/// Result of one [`DamagePipeline::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct DamageOutcome {
    pub record: DamageRecord,
    /// True only for the hit that queued the defender's removal.
    pub destroyed: bool,
    /// Loot crediting, when the defender was destroyed and the attacker's owner has an
    /// inventory. A failure here does not undo the damage.
    pub loot: Option<CombatResult<usize>>,
}

/// Everything needed to apply damage, destroy defenders and hand out loot.
#[derive(SystemParam)]
pub struct DamagePipeline<'w, 's> {
    defenders: Query<
        'w,
        's,
        (
            &'static mut CombatStats,
            &'static EntityKind,
            Option<&'static Position>,
        ),
    >,
    loot: Query<'w, 's, &'static LootTable>,
    inventories: Query<'w, 's, &'static mut Inventory>,
    log: Option<ResMut<'w, DamageLog>>,
    entities: EntityManager<'w, 's>,
    destroyed: MessageWriter<'w, EntityDestroyed>,
}

impl<'w, 's> DamagePipeline<'w, 's> {
    /// Damage `defender` with `attacker`; credit loot to `owner` on a kill.
    pub fn apply(
        &mut self,
        attacker: &impl Attacker,
        owner: Option<Entity>,
        defender: Entity,
    ) -> CombatResult<DamageOutcome> {
        let Some(log) = self.log.as_mut() else {
            return Err(CombatError::MissingContext("damage log"));
        };
        let Ok((mut stats, kind, position)) = self.defenders.get_mut(defender) else {
            return Err(CombatError::CapabilityMismatch {
                entity: defender,
                capability: "defender",
            });
        };

        let now = self.entities.ingame_time();
        let position = position.map_or(Vec2::ZERO, |p| p.0);
        let record = apply_damage(attacker, &mut *stats, now, position);
        log.push(record);

        let mut outcome = DamageOutcome {
            record,
            destroyed: false,
            loot: None,
        };
        if !record.fatal {
            return Ok(outcome);
        }

        let kind = *kind;
        // Ok(false): already dying from an earlier hit this tick.
        outcome.destroyed = self.entities.remove_entity(defender)?;
        if !outcome.destroyed {
            return Ok(outcome);
        }

        debug!(?defender, ?kind, "destroyed");
        self.destroyed.write(EntityDestroyed {
            entity: defender,
            kind,
        });

        if let Some(owner) = owner {
            outcome.loot = self.credit_loot(owner, defender);
        }
        Ok(outcome)
    }

    fn credit_loot(&mut self, owner: Entity, defender: Entity) -> Option<CombatResult<usize>> {
        let mut inventory = self.inventories.get_mut(owner).ok()?;
        let table = self.loot.get(defender).ok()?;
        Some(inventory.add_loot(table))
    }

    /// Current stats of a defender, if it is one.
    pub fn stats(&self, entity: Entity) -> Option<CombatStats> {
        self.defenders.get(entity).ok().map(|(stats, _, _)| *stats)
    }

    pub fn entities(&mut self) -> &mut EntityManager<'w, 's> {
        &mut self.entities
    }
}
