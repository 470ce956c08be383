//! Gun controller: fire-rate limited shooting at hostile NPCs.
//!
//! Guns are their own entities pointing at an owner (tower, castle, player). Each fixed tick
//! every gun polls [`Gun::shoot`]; reloading and "nothing in range" are ordinary outcomes.
//! Shots become `SpawnProjectileRequest`s, so no gun ever spawns an entity itself.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::clock::IngameClock;
use crate::common::error::CombatError;
use crate::common::state::GameState;
use crate::plugins::combat::CombatStats;
use crate::plugins::entities::{EntityManager, PendingDespawn};
use crate::plugins::projectiles::SpawnProjectileRequest;
use crate::plugins::projectiles::spawn::spawn_requested_projectiles;
use crate::plugins::targeting::Targeting;

pub mod components;

pub use components::{Facing, FirePattern, Gun, Shot, Volley};

/// A gun fired this tick. Drives firing animations.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct GunFired {
    pub gun: Entity,
    pub facing: Facing,
}

pub fn fire_guns(
    clock: Res<IngameClock>,
    mut guns: Query<(Entity, &mut Gun)>,
    owners: Query<(&Position, &CombatStats), Without<PendingDespawn>>,
    targeting: Targeting,
    mut requests: MessageWriter<SpawnProjectileRequest>,
    mut fired: MessageWriter<GunFired>,
) {
    let now = clock.now();

    for (entity, mut gun) in &mut guns {
        let Ok((position, stats)) = owners.get(gun.owner()) else {
            continue;
        };
        let origin = position.0;
        let range = gun.fire_range();

        let volley = match gun.shoot(now, origin, |k| targeting.nearest_k(origin, range, k)) {
            Ok(Some(volley)) => volley,
            Ok(None) => continue,
            Err(CombatError::Reloading { .. }) => continue,
            Err(err) => {
                warn!(gun = ?entity, "shoot failed: {err}");
                continue;
            }
        };

        for shot in &volley.shots {
            requests.write(SpawnProjectileRequest {
                gun: entity,
                owner: gun.owner(),
                origin,
                heading: shot.heading,
                steering: shot.steering,
                power: stats.power,
            });
        }
        fired.write(GunFired {
            gun: entity,
            facing: volley.facing,
        });
        trace!(gun = ?entity, shots = volley.shots.len(), "fired");
    }
}

/// Remove guns whose owner is gone or dying.
pub fn remove_orphaned_guns(
    guns: Query<(Entity, &Gun), Without<PendingDespawn>>,
    owners: Query<(), (With<CombatStats>, Without<PendingDespawn>)>,
    mut entities: EntityManager,
) {
    for (entity, gun) in &guns {
        let owner = gun.owner();
        if owners.contains(owner) && !entities.is_pending(owner) {
            continue;
        }
        if let Err(err) = entities.remove_entity(entity) {
            warn!(gun = ?entity, "orphaned gun: {err}");
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<GunFired>();

    app.add_systems(
        FixedUpdate,
        (remove_orphaned_guns, fire_guns)
            .chain()
            .before(spawn_requested_projectiles)
            .run_if(in_state(GameState::InGame)),
    );
}
