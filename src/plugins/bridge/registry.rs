//! Collision handler registry.
//!
//! Built once when the bridge plugin is added and owned by the world as a resource.
//! Lookups do not depend on registration order.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::plugins::collision::EntityKind;

/// Handlers that run when a contact between two specific kinds begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeginHandler {
    /// Projectile hits a creature: apply damage, then resolve the projectile.
    ProjectileHit,
}

/// Handlers that run for every contact involving one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WildcardHandler {
    /// Post-solve: expire a projectile nothing else claimed.
    ExpireProjectile,
    /// Never produce a physical response.
    Suppress,
}

/// Whether the solver should respond physically to a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    Allow,
    Suppress,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct CollisionHandlers {
    begin: HashMap<(EntityKind, EntityKind), BeginHandler>,
    wildcards: HashMap<EntityKind, WildcardHandler>,
}

impl CollisionHandlers {
    /// Handlers the combat core registers.
    pub fn combat() -> Self {
        let mut handlers = Self::default();
        handlers
            .on_begin(EntityKind::Projectile, EntityKind::Npc, BeginHandler::ProjectileHit)
            .on_any(EntityKind::Projectile, WildcardHandler::ExpireProjectile)
            .on_any(EntityKind::Item, WildcardHandler::Suppress);
        handlers
    }

    pub fn on_begin(&mut self, a: EntityKind, b: EntityKind, handler: BeginHandler) -> &mut Self {
        self.begin.insert((a, b), handler);
        self
    }

    pub fn on_any(&mut self, kind: EntityKind, handler: WildcardHandler) -> &mut Self {
        self.wildcards.insert(kind, handler);
        self
    }

    /// Begin handler for the pair, plus whether `(a, b)` had to be swapped to match the
    /// registered order.
    pub fn begin(&self, a: EntityKind, b: EntityKind) -> Option<(BeginHandler, bool)> {
        if let Some(handler) = self.begin.get(&(a, b)) {
            return Some((*handler, false));
        }
        self.begin.get(&(b, a)).map(|handler| (*handler, true))
    }

    pub fn wildcard(&self, kind: EntityKind) -> Option<WildcardHandler> {
        self.wildcards.get(&kind).copied()
    }

    /// Combat pairs and suppressed kinds never get a physical response.
    pub fn response(&self, a: EntityKind, b: EntityKind) -> Response {
        let suppressed = |kind| self.wildcard(kind) == Some(WildcardHandler::Suppress);
        if suppressed(a) || suppressed(b) || self.begin(a, b).is_some() {
            return Response::Suppress;
        }
        Response::Allow
    }
}
