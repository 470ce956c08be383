use bevy::prelude::*;

use super::hooks::CombatHooks;
use crate::common::test_utils::{combat_world, run_system_once};
use crate::plugins::bridge::Response;
use crate::plugins::collision::EntityKind;

fn spawn_kind(world: &mut World, kind: EntityKind) -> Entity {
    world.spawn((kind, kind.filter())).id()
}

#[test]
fn hooks_enforce_groups() {
    let mut world = combat_world(0.0);
    let a = spawn_kind(&mut world, EntityKind::Npc);
    let b = spawn_kind(&mut world, EntityKind::Npc);
    let player = spawn_kind(&mut world, EntityKind::Player);

    let (npc_npc, npc_player) = run_system_once(&mut world, move |hooks: CombatHooks| {
        (hooks.allows_pair(a, b), hooks.allows_pair(a, player))
    });

    assert!(!npc_npc);
    assert!(npc_player);
}

#[test]
fn unfiltered_entities_fall_back_to_layers() {
    let mut world = combat_world(0.0);
    let npc = spawn_kind(&mut world, EntityKind::Npc);
    let bare = world.spawn_empty().id();

    let allowed = run_system_once(&mut world, move |hooks: CombatHooks| hooks.allows_pair(npc, bare));

    assert!(allowed);
}

#[test]
fn items_and_combat_pairs_get_no_response() {
    let mut world = combat_world(0.0);
    let item = spawn_kind(&mut world, EntityKind::Item);
    let player = spawn_kind(&mut world, EntityKind::Player);
    let npc = spawn_kind(&mut world, EntityKind::Npc);
    let projectile = spawn_kind(&mut world, EntityKind::Projectile);

    let responses = run_system_once(&mut world, move |hooks: CombatHooks| {
        [
            hooks.response(item, player),
            hooks.response(npc, projectile),
            hooks.response(npc, player),
        ]
    });

    assert_eq!(
        responses,
        [Response::Suppress, Response::Suppress, Response::Allow]
    );
}
