//! Consumer side of [`SpawnProjectileRequest`].

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::{Projectile, ProjectileState};
use super::messages::SpawnProjectileRequest;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::collision::{CollisionFilter, EntityKind};
use crate::plugins::combat::AttackPower;
use crate::plugins::entities::EntityManager;

/// Spawn one sensor body per request, at the request origin.
///
/// Projectiles are sensors: their contacts raise collision events but never push anything.
pub fn spawn_requested_projectiles(
    mut requests: MessageReader<SpawnProjectileRequest>,
    tunables: Res<Tunables>,
    mut entities: EntityManager,
) {
    let now = entities.ingame_time();
    let filter = CollisionFilter::projectile();
    let radius = tunables.projectile_radius;

    for request in requests.read() {
        let entity = entities.add_entity((
            (
                Name::new("Projectile"),
                EntityKind::Projectile,
                Projectile {
                    gun: request.gun,
                    owner: request.owner,
                    speed: tunables.projectile_speed,
                    steering: request.steering,
                    spawned_at: now,
                },
                ProjectileState::Spawned,
                AttackPower(request.power),
                filter,
                filter.layers(),
                DespawnOnExit(GameState::InGame),
            ),
            (
                RigidBody::Dynamic,
                Collider::circle(radius),
                Sensor,
                CollisionEventsEnabled,
                ActiveCollisionHooks::FILTER_PAIRS,
                Position(request.origin),
                LinearVelocity(request.heading * tunables.projectile_speed),
                Transform::from_translation(request.origin.extend(2.0)),
                Sprite::from_color(Color::srgb(1.0, 0.85, 0.35), Vec2::splat(radius * 2.0)),
            ),
        ));
        trace!(?entity, gun = ?request.gun, "projectile spawned");
    }
}
