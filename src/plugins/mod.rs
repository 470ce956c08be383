//! Feature plugins.
//!
//! Combat core, leaf-first: `collision`, `bridge`, `combat`, `targeting`, `projectiles`, `guns`.
//! `entities` owns structural changes. The rest is the game around the core.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod bridge;
pub mod collision;
pub mod combat;
pub mod core;
pub mod entities;
pub mod guns;
pub mod npcs;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod targeting;
pub mod world;

// Render-only
pub mod camera;
pub mod presentation;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    entities::plugin(app);
    combat::plugin(app);
    bridge::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    guns::plugin(app);
    world::plugin(app);
    player::plugin(app);
    npcs::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    presentation::plugin(app);
}
