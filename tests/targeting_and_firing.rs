//! Targeting and gun firing against a stepped avian world.
//!
//! Hostiles are placed at known distances from a point well away from the arena's defenses.
//! They carry no `Npc` marker, so nothing walks them around between queries.

mod common;

use bevy::ecs::message::Messages;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use castle_combat::common::clock::IngameClock;
use castle_combat::plugins::collision::CollisionFilter;
use castle_combat::plugins::combat::loot::ResourceKind;
use castle_combat::plugins::entities::{PendingDespawn, spawn};
use castle_combat::plugins::guns::{FirePattern, Gun, GunFired, fire_guns};
use castle_combat::plugins::projectiles::SpawnProjectileRequest;
use castle_combat::plugins::targeting::{PhysicsSpace, Targeting, nearest_target, nearest_targets};

const ORIGIN: Vec2 = Vec2::new(-700.0, 0.0);

struct Hostiles {
    near: Entity,
    mid: Entity,
    far: Entity,
    outside: Entity,
}

fn spawn_hostile(app: &mut App, offset: Vec2) -> Entity {
    app.world_mut().spawn(spawn::npc(ORIGIN + offset)).id()
}

/// Centres at 40, 90, 130 and 260 from `ORIGIN`, radius 12 each.
fn arena_with_hostiles(extra: impl FnOnce(&mut App)) -> (App, Hostiles) {
    let mut app = common::app_headless();
    app.update();

    let hostiles = Hostiles {
        near: spawn_hostile(&mut app, Vec2::new(0.0, 40.0)),
        mid: spawn_hostile(&mut app, Vec2::new(0.0, -90.0)),
        far: spawn_hostile(&mut app, Vec2::new(0.0, 130.0)),
        outside: spawn_hostile(&mut app, Vec2::new(0.0, 260.0)),
    };
    extra(&mut app);

    // Let the physics step build the collider trees.
    for _ in 0..3 {
        app.update();
    }
    (app, hostiles)
}

fn nearest(app: &mut App, radius: f32) -> Option<Entity> {
    app.world_mut()
        .run_system_once(move |targeting: Targeting| {
            targeting.nearest(ORIGIN, radius).map(|t| t.entity)
        })
        .expect("targeting system")
}

fn nearest_k(app: &mut App, radius: f32, k: usize) -> Vec<Entity> {
    app.world_mut()
        .run_system_once(move |targeting: Targeting| {
            targeting
                .nearest_k(ORIGIN, radius, k)
                .iter()
                .map(|t| t.entity)
                .collect::<Vec<_>>()
        })
        .expect("targeting system")
}

#[test]
fn queries_rank_hostiles_by_distance() {
    let (mut app, h) = arena_with_hostiles(|_| {});

    assert_eq!(nearest(&mut app, 150.0), Some(h.near));
    assert_eq!(nearest_k(&mut app, 150.0, 3), vec![h.near, h.mid, h.far]);
    assert_eq!(nearest_k(&mut app, 150.0, 1), vec![h.near]);

    let all = nearest_k(&mut app, 150.0, 5);
    assert_eq!(all.len(), 3);
    assert!(!all.contains(&h.outside));
}

#[test]
fn radius_cuts_off_at_the_shape_surface() {
    let (mut app, h) = arena_with_hostiles(|_| {});

    // The nearest surface is 28 away.
    assert_eq!(nearest(&mut app, 20.0), None);
    assert_eq!(nearest(&mut app, 30.0), Some(h.near));
    assert!(nearest_k(&mut app, 20.0, 3).is_empty());
}

#[test]
fn scanner_ignores_closer_non_hostile_shapes() {
    let (mut app, h) = arena_with_hostiles(|app| {
        // Surface 6 away, closer than any hostile.
        app.world_mut()
            .spawn(spawn::harvestable(ORIGIN + Vec2::new(20.0, 0.0), ResourceKind::Wood));
    });

    let (single, ranked) = app
        .world_mut()
        .run_system_once(|space: PhysicsSpace| {
            let scanner = CollisionFilter::scanner();
            let single = nearest_target(&space, ORIGIN, 150.0, &scanner, |_| true);
            let ranked = nearest_targets(&space, ORIGIN, 150.0, &scanner, 5, |_| true);
            (
                single.map(|t| t.entity),
                ranked.iter().map(|t| t.entity).collect::<Vec<_>>(),
            )
        })
        .expect("spatial system");

    assert_eq!(single, Some(h.near));
    assert_eq!(ranked, vec![h.near, h.mid, h.far]);
}

#[test]
fn dying_hostiles_are_not_targets() {
    let (mut app, h) = arena_with_hostiles(|_| {});
    app.world_mut().entity_mut(h.near).insert(PendingDespawn);

    assert_eq!(nearest(&mut app, 150.0), Some(h.mid));
    assert_eq!(nearest_k(&mut app, 150.0, 3), vec![h.mid, h.far]);
}

#[test]
fn gun_fires_one_volley_per_reload() {
    let mut tower = Entity::PLACEHOLDER;
    let (mut app, _) = arena_with_hostiles(|app| {
        tower = app.world_mut().spawn(spawn::tower(ORIGIN, false)).id();
    });
    // Mounted after the steps above so the fixed schedule has not fired it yet.
    let gun = Gun::new(Some(tower), 1.0, 150.0, FirePattern::Volley { targets: 3 }).expect("gun");
    let gun = app.world_mut().spawn(gun).id();

    let requests = |app: &App| app.world().resource::<Messages<SpawnProjectileRequest>>().len();
    let shots = |app: &App| app.world().resource::<Messages<GunFired>>().len();
    let (requests_before, shots_before) = (requests(&app), shots(&app));

    app.world_mut().run_system_once(fire_guns).expect("fire");
    assert_eq!(requests(&app) - requests_before, 3);
    assert_eq!(shots(&app) - shots_before, 1);

    // Same clock: well inside 1 / fire rate.
    app.world_mut().run_system_once(fire_guns).expect("fire");
    assert_eq!(requests(&app) - requests_before, 3);
    assert_eq!(shots(&app) - shots_before, 1);

    let now = app.world().resource::<IngameClock>().now();
    let reloading = app.world().get::<Gun>(gun).map(|g| g.is_reloading(now));
    assert_eq!(reloading, Some(true));
}
