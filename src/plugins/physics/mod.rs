use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub mod hooks;

pub use hooks::CombatHooks;

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(
        PhysicsPlugins::default()
            .with_length_unit(ppm)
            .with_collision_hooks::<CombatHooks>(),
    );
    app.insert_resource(Gravity(Vec2::ZERO));
}

#[cfg(test)]
mod tests;
