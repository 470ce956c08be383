//! Collision hooks: the physical half of collision filtering.
//!
//! avian's `CollisionLayers` cover categories and masks. Groups and the per-kind response
//! rules need the full filter and the handler registry, so they run here.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::plugins::bridge::{CollisionHandlers, Response};
use crate::plugins::collision::{CollisionFilter, EntityKind};

#[derive(SystemParam)]
pub struct CombatHooks<'w, 's> {
    filters: Query<'w, 's, &'static CollisionFilter>,
    kinds: Query<'w, 's, &'static EntityKind>,
    handlers: Option<Res<'w, CollisionHandlers>>,
}

impl CombatHooks<'_, '_> {
    /// False when the canonical filters reject the pair. Entities without one are left to
    /// avian's layers.
    pub fn allows_pair(&self, a: Entity, b: Entity) -> bool {
        match (self.filters.get(a), self.filters.get(b)) {
            (Ok(a), Ok(b)) => !CollisionFilter::reject(a, b),
            _ => true,
        }
    }

    pub fn response(&self, a: Entity, b: Entity) -> Response {
        let (Ok(a), Ok(b)) = (self.kinds.get(a), self.kinds.get(b)) else {
            return Response::Allow;
        };
        self.handlers
            .as_ref()
            .map_or(Response::Allow, |handlers| handlers.response(*a, *b))
    }
}

impl CollisionHooks for CombatHooks<'_, '_> {
    fn filter_pairs(&self, collider1: Entity, collider2: Entity, _commands: &mut Commands) -> bool {
        self.allows_pair(collider1, collider2)
    }

    fn modify_contacts(&self, contacts: &mut ContactPair, _commands: &mut Commands) -> bool {
        self.response(contacts.collider1, contacts.collider2) == Response::Allow
    }
}
