//! Physics event bridge: avian collision messages in, combat effects out.
//!
//! ```text
//! FixedPostUpdate
//!   avian step ─► CollisionStart
//!   [BridgeSystems]
//!     resolve_begin_contacts        pair handlers (Projectile, Npc) -> DamagePipeline
//!     expire_unclaimed_projectiles  wildcard Projectile cleanup, owner excluded
//! ```
//!
//! Both systems write `ProjectileState` directly instead of through commands, so the cleanup
//! pass sees the begin pass's claims within the same tick. Removal is only requested; the
//! despawn happens in `FixedLast`.
//!
//! The physical response side lives in `plugins::physics::hooks`, driven by the same registry.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub mod handlers;
pub mod registry;

pub use registry::{BeginHandler, CollisionHandlers, Response, WildcardHandler};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BridgeSystems;

pub fn plugin(app: &mut App) {
    app.insert_resource(CollisionHandlers::combat());

    app.add_systems(
        FixedPostUpdate,
        (
            handlers::resolve_begin_contacts,
            handlers::expire_unclaimed_projectiles,
        )
            .chain()
            .in_set(BridgeSystems)
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}
