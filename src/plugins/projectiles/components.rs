use bevy::prelude::*;

use crate::common::error::{CombatError, CombatResult};

/// How a projectile picks its heading each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Steering {
    /// Toward a fixed point (spread patterns).
    Destination(Vec2),
    /// Pure pursuit of a live target. The target is looked up, never owned.
    Homing(Entity),
    /// Keep the current heading. Homing falls back to this once its target is gone.
    Straight,
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    /// Gun that fired it.
    pub gun: Entity,
    /// The gun's owner: loot goes here, and collisions with it never end the projectile.
    pub owner: Entity,
    pub speed: f32,
    pub steering: Steering,
    /// In-game time of the spawn, for the flight time limit.
    pub spawned_at: f32,
}

/// Spawned → Flying → {Resolved | Expired} → Destroyed.
///
/// `Destroyed` is terminal: every transition out of it is an error.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProjectileState {
    #[default]
    Spawned,
    Flying,
    /// Hit a combat target.
    Resolved,
    /// Ended without a hit (wall, left play, timed out).
    Expired,
    Destroyed,
}

impl ProjectileState {
    /// Still in the air and unclaimed.
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Spawned | Self::Flying)
    }

    pub fn launch(&mut self) -> CombatResult<()> {
        self.transition(Self::Flying)
    }

    pub fn resolve(&mut self) -> CombatResult<()> {
        self.transition(Self::Resolved)
    }

    pub fn expire(&mut self) -> CombatResult<()> {
        self.transition(Self::Expired)
    }

    pub fn destroy(&mut self) -> CombatResult<()> {
        self.transition(Self::Destroyed)
    }

    fn transition(&mut self, to: Self) -> CombatResult<()> {
        use ProjectileState::*;

        let allowed = match (*self, to) {
            (Destroyed, _) => return Err(CombatError::ProjectileDestroyed),
            (Spawned, Flying) => true,
            (Spawned | Flying, Resolved | Expired) => true,
            (Resolved | Expired, Destroyed) => true,
            _ => false,
        };
        if !allowed {
            return Err(CombatError::InvalidTransition { from: *self, to });
        }

        *self = to;
        Ok(())
    }
}
