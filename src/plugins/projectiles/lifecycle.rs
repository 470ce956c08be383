//! Flight and termination.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Projectile, ProjectileState, Steering};
use crate::common::error::CombatResult;
use crate::common::tunables::Tunables;
use crate::plugins::entities::{EntityManager, PendingDespawn};

/// Hit a combat target: Resolved → Destroyed, removal requested.
pub fn resolve_projectile(
    entity: Entity,
    state: &mut ProjectileState,
    entities: &mut EntityManager,
) -> CombatResult<()> {
    state.resolve()?;
    terminate(entity, state, entities)
}

/// Ended without a hit: Expired → Destroyed, removal requested.
pub fn expire_projectile(
    entity: Entity,
    state: &mut ProjectileState,
    entities: &mut EntityManager,
) -> CombatResult<()> {
    state.expire()?;
    terminate(entity, state, entities)
}

fn terminate(
    entity: Entity,
    state: &mut ProjectileState,
    entities: &mut EntityManager,
) -> CombatResult<()> {
    let removed = entities.remove_entity(entity);
    state.destroy()?;
    removed.map(|_| ())
}

/// Unit heading for this tick, or `None` to keep the current velocity.
///
/// `reach` is the distance covered in one tick. A destination within reach is treated as
/// passed, and so is a homing target that can no longer be found: both switch to `Straight`.
pub fn steer(
    projectile: &mut Projectile,
    from: Vec2,
    reach: f32,
    target_position: impl Fn(Entity) -> Option<Vec2>,
) -> Option<Vec2> {
    match projectile.steering {
        Steering::Destination(point) => {
            let offset = point - from;
            if offset.length_squared() <= reach * reach {
                projectile.steering = Steering::Straight;
                return None;
            }
            offset.try_normalize()
        }
        Steering::Homing(target) => match target_position(target) {
            Some(point) => (point - from).try_normalize(),
            None => {
                projectile.steering = Steering::Straight;
                None
            }
        },
        Steering::Straight => None,
    }
}

/// Recompute every live projectile's velocity.
pub fn steer_projectiles(
    time: Res<Time>,
    mut projectiles: Query<(
        Entity,
        &mut Projectile,
        &mut ProjectileState,
        &Position,
        &mut LinearVelocity,
    )>,
    targets: Query<&Position, (Without<Projectile>, Without<PendingDespawn>)>,
) {
    for (entity, mut projectile, mut state, position, mut velocity) in &mut projectiles {
        if !state.is_live() {
            continue;
        }
        if *state == ProjectileState::Spawned {
            if let Err(err) = state.launch() {
                warn!(?entity, "projectile launch: {err}");
                continue;
            }
        }

        let reach = projectile.speed * time.delta_secs();
        let lookup = |target: Entity| targets.get(target).ok().map(|p| p.0);
        if let Some(heading) = steer(&mut projectile, position.0, reach, lookup) {
            velocity.0 = heading * projectile.speed;
        }
    }
}

/// Expire projectiles that left the play area or outlived their flight time.
pub fn expire_projectiles(
    tunables: Res<Tunables>,
    mut projectiles: Query<(Entity, &Projectile, &mut ProjectileState, &Position)>,
    mut entities: EntityManager,
) {
    let now = entities.ingame_time();

    for (entity, projectile, mut state, position) in &mut projectiles {
        if !state.is_live() {
            continue;
        }

        let out_of_play = !tunables.play_area.contains(position.0);
        let timed_out = now - projectile.spawned_at >= tunables.projectile_lifetime;
        if !(out_of_play || timed_out) {
            continue;
        }

        if let Err(err) = expire_projectile(entity, &mut state, &mut entities) {
            warn!(?entity, "projectile expiry: {err}");
        }
    }
}
