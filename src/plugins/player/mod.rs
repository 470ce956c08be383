//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, write PlayerInput resource
//! - FixedUpdate: apply velocity to kinematic rigid body at the player's movement speed
//!
//! The player carries a short-range gun and an inventory; kills made by that gun pay into it.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::combat::CombatStats;
use crate::plugins::entities::spawn;
use crate::plugins::guns::{FirePattern, Gun};

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(FixedUpdate, apply_movement.run_if(in_state(GameState::InGame)));
}

fn spawn(mut commands: Commands) {
    let player = commands
        .spawn((Player, spawn::player(Vec2::new(0.0, -140.0))))
        .id();

    match Gun::new(Some(player), 2.0, 200.0, FirePattern::Single) {
        Ok(gun) => {
            commands.spawn((Name::new("PlayerGun"), gun, DespawnOnExit(GameState::InGame)));
        }
        Err(err) => warn!("player gun not mounted: {err}"),
    }
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
}

fn apply_movement(
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &CombatStats), With<Player>>,
) {
    let Ok((mut vel, stats)) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * stats.movement_speed;
}
