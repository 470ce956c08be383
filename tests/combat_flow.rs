//! End-to-end combat resolution without a physics step: inject `CollisionStart`, run the
//! bridge and the removal flush, check what is left in the world.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use castle_combat::common::clock::IngameClock;
use castle_combat::common::tunables::Tunables;
use castle_combat::plugins::bridge::CollisionHandlers;
use castle_combat::plugins::bridge::handlers::{expire_unclaimed_projectiles, resolve_begin_contacts};
use castle_combat::plugins::collision::EntityKind;
use castle_combat::plugins::combat::log::DamageLog;
use castle_combat::plugins::combat::loot::{Inventory, LootTable};
use castle_combat::plugins::combat::{AttackPower, CombatStats, EntityDestroyed};
use castle_combat::plugins::entities::{RemovalQueue, flush_removals};
use castle_combat::plugins::projectiles::{Projectile, ProjectileState, Steering};

fn combat_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(IngameClock::at(10.0))
        .init_resource::<Tunables>()
        .init_resource::<DamageLog>()
        .init_resource::<RemovalQueue>()
        .insert_resource(CollisionHandlers::combat())
        .add_message::<CollisionStart>()
        .add_message::<EntityDestroyed>();

    app.add_systems(
        Update,
        (
            resolve_begin_contacts,
            expire_unclaimed_projectiles,
            flush_removals,
        )
            .chain(),
    );
    app
}

fn spawn_projectile(app: &mut App, owner: Entity, power: f32) -> Entity {
    app.world_mut()
        .spawn((
            EntityKind::Projectile,
            Projectile {
                gun: owner,
                owner,
                speed: 100.0,
                steering: Steering::Straight,
                spawned_at: 9.5,
            },
            ProjectileState::Flying,
            AttackPower(power),
        ))
        .id()
}

fn hit(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
    app.update();
}

#[test]
fn killing_blow_despawns_both_and_pays_the_tower() {
    let mut app = combat_app();
    let tower = app
        .world_mut()
        .spawn((EntityKind::Tower, Inventory::with_capacity(10)))
        .id();
    let npc = app
        .world_mut()
        .spawn((
            EntityKind::Npc,
            CombatStats::new(30.0).with_armor(5.0),
            LootTable::Gold(8),
            Position(Vec2::new(12.0, 0.0)),
        ))
        .id();

    let first = spawn_projectile(&mut app, tower, 20.0);
    hit(&mut app, first, npc);

    assert!(app.world().get_entity(first).is_err());
    assert_eq!(
        app.world().get::<CombatStats>(npc).map(|s| s.health()),
        Some(15.0)
    );

    let second = spawn_projectile(&mut app, tower, 20.0);
    hit(&mut app, npc, second);

    assert!(app.world().get_entity(second).is_err());
    assert!(app.world().get_entity(npc).is_err());
    assert_eq!(
        app.world().get::<Inventory>(tower).map(|inv| inv.gold),
        Some(8)
    );

    let log = app.world().resource::<DamageLog>().entries();
    assert_eq!(log.len(), 2);
    assert!(!log[0].fatal && log[1].fatal);
    assert_eq!(log[1].game_time, 10.0);
    assert!(app.world().resource::<RemovalQueue>().is_empty());
    assert_eq!(app.world().resource::<Messages<EntityDestroyed>>().len(), 1);
}

#[test]
fn wall_ends_projectile_but_owner_does_not() {
    let mut app = combat_app();
    let tower = app.world_mut().spawn(EntityKind::Tower).id();
    let wall = app.world_mut().spawn(EntityKind::OuterWall).id();
    let projectile = spawn_projectile(&mut app, tower, 20.0);

    hit(&mut app, projectile, tower);
    assert!(app.world().get_entity(projectile).is_ok());

    hit(&mut app, wall, projectile);
    assert!(app.world().get_entity(projectile).is_err());
    assert!(app.world().get_entity(wall).is_ok());
}
