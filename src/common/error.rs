//! Combat error taxonomy.

use bevy::prelude::*;
use thiserror::Error;

use crate::plugins::projectiles::components::ProjectileState;

/// Errors surfaced by combat operations.
///
/// Systems never abort a tick on these: they log and move on to the next contact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    /// Rejected constructor arguments.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The gun is still inside its cooldown window.
    #[error("gun is reloading: {remaining:.3}s remaining")]
    Reloading { remaining: f32 },
    /// A collision partner lacks the component a handler expected.
    #[error("entity {entity} does not implement the {capability} capability")]
    CapabilityMismatch {
        entity: Entity,
        capability: &'static str,
    },
    /// A resource the collision handlers depend on is absent.
    #[error("space context is missing {0}")]
    MissingContext(&'static str),
    #[error("entity {0} does not exist")]
    EntityNotFound(Entity),
    #[error("inventory full: {dropped} loot item(s) not credited")]
    InventoryFull { dropped: usize },
    #[error("damage log index {index} out of bounds (len {len})")]
    LogIndexOutOfBounds { index: usize, len: usize },
    /// Any operation on a projectile after it reached `Destroyed`.
    #[error("projectile already destroyed")]
    ProjectileDestroyed,
    #[error("projectile cannot go from {from:?} to {to:?}")]
    InvalidTransition {
        from: ProjectileState,
        to: ProjectileState,
    },
}

pub type CombatResult<T> = Result<T, CombatError>;
