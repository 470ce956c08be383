//! Bundles for every entity kind.
//!
//! Each helper attaches exactly the components its kind's capabilities call for, plus the
//! canonical collision filter and the avian layers derived from it.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::collision::EntityKind;
use crate::plugins::combat::CombatStats;
use crate::plugins::combat::loot::{Inventory, LootItem, LootTable, ResourceKind};

/// Physics body with kind, filter, layers and hook opt-in.
pub fn body(kind: EntityKind, rigid_body: RigidBody, collider: Collider) -> impl Bundle {
    let filter = kind.filter();
    let hooks = match kind {
        EntityKind::Item => ActiveCollisionHooks::FILTER_PAIRS | ActiveCollisionHooks::MODIFY_CONTACTS,
        _ => ActiveCollisionHooks::FILTER_PAIRS,
    };
    (
        kind,
        filter,
        filter.layers(),
        rigid_body,
        collider,
        hooks,
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    )
}

fn at(position: Vec2, z: f32) -> (Position, Transform) {
    (
        Position(position),
        Transform::from_translation(position.extend(z)),
    )
}

pub fn player(position: Vec2) -> impl Bundle {
    (
        Name::new("Player"),
        body(EntityKind::Player, RigidBody::Kinematic, Collider::circle(13.0)),
        CombatStats::new(100.0)
            .with_armor(2.0)
            .with_power(12.0)
            .with_movement_speed(220.0),
        Inventory::with_capacity(50),
        LinearVelocity::ZERO,
        at(position, 1.0),
        Sprite::from_color(Color::srgb(0.2, 0.75, 0.9), Vec2::splat(26.0)),
    )
}

/// A defensive tower. The castle is a bigger tower.
pub fn tower(position: Vec2, castle: bool) -> impl Bundle {
    let (name, health, power, size) = if castle {
        ("Castle", 1500.0, 25.0, 96.0)
    } else {
        ("Tower", 400.0, 15.0, 40.0)
    };
    (
        Name::new(name),
        body(EntityKind::Tower, RigidBody::Static, Collider::rectangle(size, size)),
        CombatStats::new(health).with_armor(4.0).with_power(power),
        Inventory::with_capacity(100),
        at(position, 0.5),
        Sprite::from_color(Color::srgb(0.55, 0.5, 0.45), Vec2::splat(size)),
    )
}

pub fn npc(position: Vec2) -> impl Bundle {
    (
        Name::new("Npc"),
        body(EntityKind::Npc, RigidBody::Dynamic, Collider::circle(12.0)),
        CombatStats::new(60.0)
            .with_armor(2.0)
            .with_power(10.0)
            .with_attack_speed(1.0)
            .with_movement_speed(60.0),
        LootTable::Chance(vec![
            (LootItem::Gold(5), 1.0),
            (
                LootItem::Resource {
                    kind: ResourceKind::Stone,
                    amount: 1,
                },
                0.25,
            ),
        ]),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::ZERO,
        at(position, 1.0),
        Sprite::from_color(Color::srgb(0.9, 0.25, 0.25), Vec2::splat(24.0)),
    )
}

pub fn harvestable(position: Vec2, resource: ResourceKind) -> impl Bundle {
    let (name, color) = match resource {
        ResourceKind::Wood => ("Tree", Color::srgb(0.2, 0.5, 0.25)),
        ResourceKind::Stone => ("Rock", Color::srgb(0.5, 0.5, 0.55)),
    };
    (
        Name::new(name),
        body(EntityKind::Harvestable, RigidBody::Static, Collider::circle(14.0)),
        CombatStats::new(40.0),
        LootTable::Guaranteed(vec![LootItem::Resource {
            kind: resource,
            amount: 5,
        }]),
        at(position, 0.5),
        Sprite::from_color(color, Vec2::splat(28.0)),
    )
}

pub fn outer_wall(name: &'static str, center: Vec2, size: Vec2) -> impl Bundle {
    (
        Name::new(name),
        body(EntityKind::OuterWall, RigidBody::Static, Collider::rectangle(size.x, size.y)),
        at(center, 0.0),
        Sprite::from_color(Color::srgb(0.25, 0.27, 0.33), size),
    )
}
