use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::common::error::{CombatError, CombatResult};
use crate::plugins::projectiles::Steering;
use crate::plugins::targeting::Target;

/// What one trigger pull spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirePattern {
    /// One homing projectile at the nearest target.
    Single,
    /// One homing projectile per target, nearest `targets` first.
    Volley { targets: usize },
    /// `count` projectiles toward fixed points spread evenly around the owner.
    Area { count: usize },
}

/// 4-way orientation toward the target, for firing animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn toward(delta: Vec2) -> Self {
        if delta.x.abs() >= delta.y.abs() {
            if delta.x < 0.0 { Self::Left } else { Self::Right }
        } else if delta.y < 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

/// One projectile of a volley.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub heading: Vec2,
    pub steering: Steering,
}

/// Everything a successful [`Gun::shoot`] produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Volley {
    pub shots: Vec<Shot>,
    pub facing: Facing,
}

/// Fire-rate limited weapon mounted on an owner.
///
/// Reload state is derived from `last_fired_at` and the clock, never stored.
#[derive(Component, Debug, Clone)]
pub struct Gun {
    owner: Entity,
    fire_rate_per_second: f32,
    fire_range: f32,
    last_fired_at: Option<f32>,
    pattern: FirePattern,
    /// Unit directions for `FirePattern::Area`, computed once.
    directions: Vec<Vec2>,
}

impl Gun {
    pub fn new(
        owner: Option<Entity>,
        fire_rate_per_second: f32,
        fire_range: f32,
        pattern: FirePattern,
    ) -> CombatResult<Self> {
        let owner = owner.ok_or(CombatError::InvalidConfig("gun needs an owner"))?;
        if fire_rate_per_second.is_nan() || fire_rate_per_second <= 0.0 {
            return Err(CombatError::InvalidConfig("fire rate must be positive"));
        }
        if fire_range.is_nan() || fire_range <= 0.0 {
            return Err(CombatError::InvalidConfig("fire range must be positive"));
        }

        let directions = match pattern {
            FirePattern::Single => Vec::new(),
            FirePattern::Volley { targets: 0 } => {
                return Err(CombatError::InvalidConfig("volley needs at least one target"));
            }
            FirePattern::Volley { .. } => Vec::new(),
            FirePattern::Area { count: 0 } => {
                return Err(CombatError::InvalidConfig("area gun needs at least one projectile"));
            }
            FirePattern::Area { count } => (0..count)
                .map(|i| Vec2::from_angle(TAU * i as f32 / count as f32))
                .collect(),
        };

        Ok(Self {
            owner,
            fire_rate_per_second,
            fire_range,
            last_fired_at: None,
            pattern,
            directions,
        })
    }

    #[inline]
    pub fn owner(&self) -> Entity {
        self.owner
    }

    #[inline]
    pub fn fire_range(&self) -> f32 {
        self.fire_range
    }

    pub fn last_fired_at(&self) -> Option<f32> {
        self.last_fired_at
    }

    /// Seconds until the gun can fire again.
    pub fn cooldown_remaining(&self, now: f32) -> f32 {
        self.last_fired_at.map_or(0.0, |at| {
            (1.0 / self.fire_rate_per_second - (now - at)).max(0.0)
        })
    }

    #[inline]
    pub fn is_reloading(&self, now: f32) -> bool {
        self.last_fired_at
            .is_some_and(|at| now - at < 1.0 / self.fire_rate_per_second)
    }

    /// Pull the trigger.
    ///
    /// `acquire(k)` returns up to `k` targets, nearest first. Fails with `Reloading` inside
    /// the cooldown. No target is not an error: `Ok(None)` and the cooldown is not started.
    pub fn shoot(
        &mut self,
        now: f32,
        origin: Vec2,
        acquire: impl FnOnce(usize) -> Vec<Target>,
    ) -> CombatResult<Option<Volley>> {
        if self.is_reloading(now) {
            return Err(CombatError::Reloading {
                remaining: self.cooldown_remaining(now),
            });
        }

        let wanted = match self.pattern {
            FirePattern::Volley { targets } => targets,
            FirePattern::Single | FirePattern::Area { .. } => 1,
        };
        let targets = acquire(wanted);
        let Some(first) = targets.first() else {
            return Ok(None);
        };
        let facing = Facing::toward(first.position - origin);

        let shots = match self.pattern {
            FirePattern::Single | FirePattern::Volley { .. } => targets
                .iter()
                .take(wanted)
                .map(|target| Shot {
                    heading: (target.position - origin).try_normalize().unwrap_or(Vec2::X),
                    steering: Steering::Homing(target.entity),
                })
                .collect(),
            FirePattern::Area { .. } => self
                .directions
                .iter()
                .map(|&dir| Shot {
                    heading: dir,
                    steering: Steering::Destination(origin + dir * self.fire_range),
                })
                .collect(),
        };

        self.last_fired_at = Some(now);
        Ok(Some(Volley { shots, facing }))
    }
}
