use bevy::prelude::*;

/// Exposes the power an attack is made with.
pub trait Attacker {
    fn power(&self) -> f32;
}

/// Something with health and armor that can be damaged.
pub trait Defender {
    fn armor(&self) -> f32;
    fn health(&self) -> f32;
    fn set_health(&mut self, health: f32);
}

/// Combat stats shared by creatures and buildings.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CombatStats {
    pub armor: f32,
    pub power: f32,
    health: f32,
    pub max_health: f32,
    /// Attacks per second.
    pub attack_speed: f32,
    /// World units per second.
    pub movement_speed: f32,
}

impl CombatStats {
    /// Full health, everything else zero.
    pub fn new(max_health: f32) -> Self {
        Self {
            armor: 0.0,
            power: 0.0,
            health: max_health,
            max_health,
            attack_speed: 0.0,
            movement_speed: 0.0,
        }
    }

    pub fn with_armor(mut self, armor: f32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    pub fn with_attack_speed(mut self, attack_speed: f32) -> Self {
        self.attack_speed = attack_speed;
        self
    }

    pub fn with_movement_speed(mut self, movement_speed: f32) -> Self {
        self.movement_speed = movement_speed;
        self
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Clamps to `max_health`. There is no lower clamp: `<= 0` means destroyed.
    #[inline]
    pub fn set_health(&mut self, health: f32) {
        self.health = health.min(self.max_health);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

impl Attacker for CombatStats {
    fn power(&self) -> f32 {
        self.power
    }
}

impl Defender for CombatStats {
    fn armor(&self) -> f32 {
        self.armor
    }

    fn health(&self) -> f32 {
        CombatStats::health(self)
    }

    fn set_health(&mut self, health: f32) {
        CombatStats::set_health(self, health);
    }
}

/// Attack power carried by things that are attackers but not defenders (projectiles).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AttackPower(pub f32);

impl Attacker for AttackPower {
    fn power(&self) -> f32 {
        self.0
    }
}
