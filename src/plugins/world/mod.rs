//! World plugin: arena walls, the castle and its towers, harvestables.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::error::CombatResult;
use crate::common::state::GameState;
use crate::plugins::combat::EntityDestroyed;
use crate::plugins::combat::loot::ResourceKind;
use crate::plugins::entities::spawn;
use crate::plugins::guns::{FirePattern, Gun};

const TILE: i32 = 64;
const HALF_W: i32 = TILE * 16;
const HALF_H: i32 = TILE * 9;

/// Marks the castle. Losing it ends the game.
#[derive(Component, Debug, Clone, Copy)]
pub struct Castle;

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (spawn_arena, spawn_floor, spawn_defenses, spawn_harvestables),
    );
    app.add_systems(
        FixedPostUpdate,
        end_game_when_castle_falls
            .after(crate::plugins::bridge::BridgeSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_arena(mut commands: Commands) {
    let thickness = 30.0;
    let (w, h) = (HALF_W as f32, HALF_H as f32);

    commands.spawn(spawn::outer_wall(
        "WallTop",
        Vec2::new(0.0, h + thickness * 0.5),
        Vec2::new(w * 2.0 + thickness * 2.0, thickness),
    ));
    commands.spawn(spawn::outer_wall(
        "WallBottom",
        Vec2::new(0.0, -h - thickness * 0.5),
        Vec2::new(w * 2.0 + thickness * 2.0, thickness),
    ));
    commands.spawn(spawn::outer_wall(
        "WallLeft",
        Vec2::new(-w - thickness * 0.5, 0.0),
        Vec2::new(thickness, h * 2.0),
    ));
    commands.spawn(spawn::outer_wall(
        "WallRight",
        Vec2::new(w + thickness * 0.5, 0.0),
        Vec2::new(thickness, h * 2.0),
    ));
}

/// Checkerboard of solid-color sprites. No assets.
fn spawn_floor(mut commands: Commands) {
    (-(HALF_H / TILE)..=HALF_H / TILE)
        .flat_map(|y| (-(HALF_W / TILE)..=HALF_W / TILE).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let world_pos = Vec3::new(x as f32 * TILE as f32, y as f32 * TILE as f32, -1.0);
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_translation(world_pos),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

/// Castle in the middle with an area gun, four towers around it.
fn spawn_defenses(mut commands: Commands) {
    let castle = commands.spawn((spawn::tower(Vec2::ZERO, true), Castle)).id();
    let mut guns = vec![Gun::new(Some(castle), 0.5, 260.0, FirePattern::Area { count: 12 })];

    for (i, corner) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)]
        .into_iter()
        .enumerate()
    {
        let tower = commands
            .spawn(spawn::tower(Vec2::new(corner.0, corner.1) * 220.0, false))
            .id();
        let pattern = if i % 2 == 0 {
            FirePattern::Single
        } else {
            FirePattern::Volley { targets: 3 }
        };
        guns.push(Gun::new(Some(tower), 1.5, 320.0, pattern));
    }

    spawn_guns(&mut commands, guns);
}

fn spawn_guns(commands: &mut Commands, guns: Vec<CombatResult<Gun>>) {
    for gun in guns {
        match gun {
            Ok(gun) => {
                commands.spawn((Name::new("Gun"), gun, DespawnOnExit(GameState::InGame)));
            }
            Err(err) => warn!("gun not mounted: {err}"),
        }
    }
}

fn spawn_harvestables(mut commands: Commands) {
    let spots = [
        (Vec2::new(-600.0, 300.0), ResourceKind::Wood),
        (Vec2::new(-520.0, 360.0), ResourceKind::Wood),
        (Vec2::new(640.0, -320.0), ResourceKind::Wood),
        (Vec2::new(560.0, 280.0), ResourceKind::Stone),
        (Vec2::new(-480.0, -300.0), ResourceKind::Stone),
    ];
    for (position, resource) in spots {
        commands.spawn(spawn::harvestable(position, resource));
    }
}

fn end_game_when_castle_falls(
    mut destroyed: MessageReader<EntityDestroyed>,
    castles: Query<(), With<Castle>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if destroyed.read().any(|ev| castles.contains(ev.entity)) {
        info!("castle destroyed, game over");
        next.set(GameState::GameOver);
    }
}

#[cfg(test)]
mod tests;
