//! Entity manager: the only place structural removal happens.
//!
//! Combat code never despawns. It asks [`EntityManager::remove_entity`], which queues the
//! entity and tags it [`PendingDespawn`]. The queue is flushed in `FixedLast`, after every
//! collision handler and update pass of the tick has finished iterating.

use bevy::ecs::system::SystemParam;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::clock::IngameClock;
use crate::common::error::{CombatError, CombatResult};

pub mod spawn;

/// Marker: queued for removal at the end of the tick.
///
/// Inserted through commands, so it becomes visible from the next command flush on.
/// Queries that must ignore dying entities filter `Without<PendingDespawn>`.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Entities waiting to be despawned, in request order.
#[derive(Resource, Debug, Default)]
pub struct RemovalQueue {
    order: Vec<Entity>,
    queued: HashSet<Entity>,
}

impl RemovalQueue {
    /// Returns `false` when `entity` was already queued.
    pub fn push(&mut self, entity: Entity) -> bool {
        if !self.queued.insert(entity) {
            return false;
        }
        self.order.push(entity);
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.queued.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Entity> {
        self.queued.clear();
        std::mem::take(&mut self.order)
    }
}

/// Add/remove entities and read the in-game clock.
#[derive(SystemParam)]
pub struct EntityManager<'w, 's> {
    commands: Commands<'w, 's>,
    clock: Res<'w, IngameClock>,
    queue: ResMut<'w, RemovalQueue>,
    live: Query<'w, 's, Entity>,
}

impl EntityManager<'_, '_> {
    /// Request removal of `entity`.
    ///
    /// `Ok(true)` when newly queued, `Ok(false)` when a removal is already pending (destroying
    /// twice is a no-op), `Err` for a handle that no longer refers to a live entity.
    pub fn remove_entity(&mut self, entity: Entity) -> CombatResult<bool> {
        if self.queue.contains(entity) {
            return Ok(false);
        }
        if !self.live.contains(entity) {
            return Err(CombatError::EntityNotFound(entity));
        }

        self.queue.push(entity);
        self.commands.entity(entity).try_insert(PendingDespawn);
        trace!(?entity, "removal queued");
        Ok(true)
    }

    pub fn add_entity(&mut self, bundle: impl Bundle) -> Entity {
        self.commands.spawn(bundle).id()
    }

    #[inline]
    pub fn ingame_time(&self) -> f32 {
        self.clock.now()
    }

    pub fn is_pending(&self, entity: Entity) -> bool {
        self.queue.contains(entity)
    }
}

/// Despawn everything queued during the tick.
pub fn flush_removals(
    mut commands: Commands,
    mut queue: ResMut<RemovalQueue>,
    live: Query<Entity>,
) {
    if queue.is_empty() {
        return;
    }

    for entity in queue.drain() {
        if live.contains(entity) {
            commands.entity(entity).despawn();
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<RemovalQueue>();
    app.add_systems(FixedLast, flush_removals);
}
