use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use pretty_assertions::assert_eq;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::collision::{CollisionFilter, EntityKind};
use crate::plugins::combat::loot::Inventory;

#[test]
fn spawns_walls_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let walls: Vec<_> = world
        .query::<(&Name, &RigidBody, &EntityKind, &CollisionFilter)>()
        .iter(&world)
        .filter(|(n, rb, _, _)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .map(|(_, _, kind, filter)| (*kind, *filter))
        .collect();

    assert_eq!(walls.len(), 4);
    assert!(
        walls
            .iter()
            .all(|w| *w == (EntityKind::OuterWall, CollisionFilter::outer_wall()))
    );
}

#[test]
fn every_tower_gets_a_gun() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_defenses);

    let towers = world.query_filtered::<Entity, With<Inventory>>().iter(&world).count();
    let castles = world.query::<&Castle>().iter(&world).count();
    let owners: Vec<Entity> = world.query::<&Gun>().iter(&world).map(Gun::owner).collect();

    assert_eq!(towers, 5);
    assert_eq!(castles, 1);
    assert_eq!(owners.len(), 5);
    assert!(owners.iter().all(|&owner| world.get::<Inventory>(owner).is_some()));
}

#[test]
fn losing_the_castle_ends_the_game() {
    let mut app = App::new();
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.add_message::<EntityDestroyed>();
    app.add_systems(Update, end_game_when_castle_falls);

    let castle = app.world_mut().spawn(Castle).id();
    let npc = app.world_mut().spawn_empty().id();
    app.world_mut().write_message(EntityDestroyed {
        entity: npc,
        kind: EntityKind::Npc,
    });
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::InGame
    );

    app.world_mut().write_message(EntityDestroyed {
        entity: castle,
        kind: EntityKind::Tower,
    });
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::GameOver
    );
}
