//! Camera plugin (render-only).
//!
//! A system cannot hold `Query<&Transform>` and `Query<&mut Transform>` unless Bevy can prove
//! the two are disjoint, so both queries carry `Without<...>` filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      follow_player eases toward the player before transform propagation
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let (Ok(tf_player), Ok((mut tf_cam, main_cam))) = (q_player.single(), q_cam.single_mut())
    else {
        return;
    };

    let alpha = 1.0 - (-main_cam.responsiveness * time.delta_secs()).exp();
    let target = tf_player.translation.truncate();
    let current = tf_cam.translation.truncate();
    let next = current.lerp(target, alpha);
    tf_cam.translation.x = next.x;
    tf_cam.translation.y = next.y;
}
