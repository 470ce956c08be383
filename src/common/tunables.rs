//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    /// Maximum flight time before a projectile expires on its own.
    pub projectile_lifetime: f32,
    /// Projectiles outside this rectangle have left play.
    pub play_area: Rect,
    /// How long a damage record stays visible as floating text.
    pub damage_text_ttl: f32,
    pub npc_spawn_interval: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            projectile_speed: 600.0,
            projectile_radius: 4.0,
            projectile_lifetime: 4.0,
            play_area: Rect::new(-1100.0, -650.0, 1100.0, 650.0),
            damage_text_ttl: 0.8,
            npc_spawn_interval: 3.0,
        }
    }
}
