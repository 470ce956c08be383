//! Projectile lifecycle: message-based spawning, steering, expiry.
//!
//! ```text
//! FixedUpdate
//!   guns::fire_guns                 writes SpawnProjectileRequest
//!   spawn_requested_projectiles     Spawned  (sensor body at the gun owner)
//!   steer_projectiles               Spawned -> Flying, velocity toward destination/target
//!   expire_projectiles              Flying -> Expired -> Destroyed (left play / timed out)
//! FixedPostUpdate
//!   avian step, CollisionStart
//!   bridge begin handler            Flying -> Resolved -> Destroyed (hit)
//!   bridge post-solve cleanup       Flying -> Expired -> Destroyed (anything else)
//! FixedLast
//!   entities::flush_removals        despawn
//! ```
//!
//! A destroyed projectile is skipped by every system above; touching its state again is an
//! error (`CombatError::ProjectileDestroyed`), not something callers retry.

pub mod components;
pub mod lifecycle;
pub mod messages;
pub mod spawn;

use bevy::prelude::*;

use crate::common::state::GameState;

pub use components::{Projectile, ProjectileState, Steering};
pub use messages::SpawnProjectileRequest;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpawnProjectileRequest>();

        app.add_systems(
            FixedUpdate,
            (
                spawn::spawn_requested_projectiles,
                lifecycle::steer_projectiles,
                lifecycle::expire_projectiles,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}
