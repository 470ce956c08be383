//! Test helpers.
//!
//! `World::run_system_once` (via the `RunSystemOnce` trait) executes a system without building
//! a schedule. Systems that use `Commands` only enqueue structural changes, so we flush the
//! world afterwards to apply them before assertions.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::clock::IngameClock;
use crate::common::tunables::Tunables;
use crate::plugins::bridge::CollisionHandlers;
use crate::plugins::combat::log::DamageLog;
use crate::plugins::entities::RemovalQueue;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A world carrying every resource the combat systems read.
pub fn combat_world(now: f32) -> World {
    let mut world = World::new();
    world.init_resource::<Time>();
    world.insert_resource(IngameClock::at(now));
    world.insert_resource(Tunables::default());
    world.insert_resource(DamageLog::default());
    world.insert_resource(RemovalQueue::default());
    world.insert_resource(CollisionHandlers::combat());
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<crate::plugins::combat::EntityDestroyed>>();
    world
}

/// Queue a `CollisionStart` the way avian's narrow phase would.
pub fn write_collision_start(world: &mut World, a: Entity, b: Entity) {
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}
