//! Buffered spawn requests.
//!
//! Guns only express intent; the spawner is the single place projectile entities are created.
//! Producer → queue → consumer.

use bevy::prelude::*;

use super::components::Steering;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub gun: Entity,
    pub owner: Entity,
    pub origin: Vec2,
    /// Unit vector for the initial velocity.
    pub heading: Vec2,
    pub steering: Steering,
    pub power: f32,
}
