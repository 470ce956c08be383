//! Dispatch of avian collision messages into combat.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::registry::{BeginHandler, CollisionHandlers, WildcardHandler};
use crate::common::error::{CombatError, CombatResult};
use crate::plugins::collision::EntityKind;
use crate::plugins::combat::{AttackPower, DamageOutcome, DamagePipeline};
use crate::plugins::entities::EntityManager;
use crate::plugins::projectiles::lifecycle::{expire_projectile, resolve_projectile};
use crate::plugins::projectiles::{Projectile, ProjectileState};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    /// The entity carrying gameplay components: the rigid body if there is one.
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn owners(ev: &CollisionStart) -> (Entity, Entity) {
    let first = CollisionTarget {
        collider: ev.collider1,
        body: ev.body1,
    };
    let second = CollisionTarget {
        collider: ev.collider2,
        body: ev.body2,
    };
    (first.gameplay_owner(), second.gameplay_owner())
}

/// Begin phase: run the registered pair handler for each new contact.
///
/// Failures are logged and the contact is skipped; the tick always continues.
pub fn resolve_begin_contacts(
    mut started: MessageReader<CollisionStart>,
    handlers: Option<Res<CollisionHandlers>>,
    kinds: Query<&EntityKind>,
    mut projectiles: Query<(&Projectile, &mut ProjectileState, Option<&AttackPower>)>,
    mut pipeline: DamagePipeline,
) {
    let Some(handlers) = handlers else {
        warn!("no collision handlers registered, skipping {} contacts", started.len());
        started.clear();
        return;
    };

    for ev in started.read() {
        let (a, b) = owners(ev);
        let (Ok(&kind_a), Ok(&kind_b)) = (kinds.get(a), kinds.get(b)) else {
            continue;
        };
        let Some((handler, swapped)) = handlers.begin(kind_a, kind_b) else {
            continue;
        };
        let (first, second) = if swapped { (b, a) } else { (a, b) };

        match handler {
            BeginHandler::ProjectileHit => {
                match projectile_hit(first, second, &mut projectiles, &mut pipeline) {
                    Ok(Some(outcome)) => {
                        trace!(
                            projectile = ?first,
                            target = ?second,
                            damage = outcome.record.damage,
                            "hit"
                        );
                        if let Some(Err(err)) = outcome.loot {
                            warn!(target = ?second, "loot not fully credited: {err}");
                        }
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!(projectile = ?first, target = ?second, "projectile hit skipped: {err}");
                    }
                }
            }
        }
    }
}

/// Damage `creature` with `projectile`, then resolve the projectile.
///
/// `Ok(None)` when the projectile was already claimed or hit its own owner.
fn projectile_hit(
    projectile: Entity,
    creature: Entity,
    projectiles: &mut Query<(&Projectile, &mut ProjectileState, Option<&AttackPower>)>,
    pipeline: &mut DamagePipeline,
) -> CombatResult<Option<DamageOutcome>> {
    let Ok((data, mut state, power)) = projectiles.get_mut(projectile) else {
        return Err(CombatError::CapabilityMismatch {
            entity: projectile,
            capability: "projectile",
        });
    };
    if !state.is_live() || data.owner == creature {
        return Ok(None);
    }
    let Some(power) = power else {
        return Err(CombatError::CapabilityMismatch {
            entity: projectile,
            capability: "attacker",
        });
    };

    let outcome = pipeline.apply(power, Some(data.owner), creature)?;
    resolve_projectile(projectile, &mut state, pipeline.entities())?;
    Ok(Some(outcome))
}

/// Post-solve cleanup: expire live projectiles nothing claimed this tick.
///
/// A projectile touching its own owner is left alone.
pub fn expire_unclaimed_projectiles(
    mut started: MessageReader<CollisionStart>,
    handlers: Option<Res<CollisionHandlers>>,
    kinds: Query<&EntityKind>,
    mut projectiles: Query<(&Projectile, &mut ProjectileState)>,
    mut entities: EntityManager,
) {
    let Some(handlers) = handlers else {
        started.clear();
        return;
    };

    for ev in started.read() {
        let (a, b) = owners(ev);

        for (this, other) in [(a, b), (b, a)] {
            let Ok(&kind) = kinds.get(this) else {
                continue;
            };
            if handlers.wildcard(kind) != Some(WildcardHandler::ExpireProjectile) {
                continue;
            }
            let Ok((projectile, mut state)) = projectiles.get_mut(this) else {
                warn!(entity = ?this, "{kind:?} without projectile state");
                continue;
            };
            if projectile.owner == other || !state.is_live() {
                continue;
            }

            if let Err(err) = expire_projectile(this, &mut state, &mut entities) {
                warn!(projectile = ?this, "cleanup failed: {err}");
            } else {
                trace!(projectile = ?this, partner = ?other, "expired on contact");
            }
        }
    }
}
