//! Presentation (render-only): floating combat text, gun range rings, firing flashes.
//!
//! Reads gameplay state, never writes it. The one exception is draining `DamageLog`, which
//! exists to be drained here.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::clock::IngameClock;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::log::{DamageLog, DamageRecord};
use crate::plugins::guns::{Facing, Gun, GunFired};

/// Floating text spawned from one damage record.
#[derive(Component, Debug)]
struct FloatingText {
    timer: Timer,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            spawn_damage_text,
            animate_damage_text,
            draw_gun_ranges,
            flash_firing_owner,
        )
            .run_if(in_state(GameState::InGame)),
    );
}

fn damage_text_color(record: &DamageRecord) -> Color {
    if record.fatal {
        Color::srgb(1.0, 0.85, 0.2)
    } else if record.damage < 0.0 {
        Color::srgb(0.4, 1.0, 0.5)
    } else {
        Color::WHITE
    }
}

fn spawn_damage_text(mut commands: Commands, tunables: Res<Tunables>, mut log: ResMut<DamageLog>) {
    if log.is_empty() {
        return;
    }

    for record in log.drain() {
        commands.spawn((
            Text2d::new(format!("{:.0}", record.damage)),
            TextColor(damage_text_color(&record)),
            TextFont::from_font_size(14.0),
            Transform::from_translation(record.position.extend(50.0)),
            FloatingText {
                timer: Timer::from_seconds(tunables.damage_text_ttl, TimerMode::Once),
            },
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn animate_damage_text(
    time: Res<Time>,
    mut commands: Commands,
    mut texts: Query<(Entity, &mut FloatingText, &mut Transform, &mut TextColor)>,
) {
    for (entity, mut text, mut transform, mut color) in &mut texts {
        text.timer.tick(time.delta());
        transform.translation.y += 30.0 * time.delta_secs();
        color.0.set_alpha(1.0 - text.timer.fraction());

        if text.timer.is_finished() {
            commands.entity(entity).despawn();
        }
    }
}

/// Range ring per gun: red while reloading, green when ready.
fn draw_gun_ranges(
    mut gizmos: Gizmos,
    clock: Res<IngameClock>,
    guns: Query<&Gun>,
    owners: Query<&Position>,
) {
    for gun in &guns {
        let Ok(position) = owners.get(gun.owner()) else {
            continue;
        };
        let color = if gun.is_reloading(clock.now()) {
            Color::srgba(0.9, 0.3, 0.3, 0.35)
        } else {
            Color::srgba(0.3, 0.9, 0.4, 0.35)
        };
        gizmos.circle_2d(position.0, gun.fire_range(), color);
    }
}

/// Short line from the owner in the firing direction.
fn flash_firing_owner(
    mut gizmos: Gizmos,
    mut fired: MessageReader<GunFired>,
    guns: Query<&Gun>,
    owners: Query<&Position>,
) {
    for ev in fired.read() {
        let Some(position) = guns
            .get(ev.gun)
            .ok()
            .and_then(|gun| owners.get(gun.owner()).ok())
        else {
            continue;
        };
        let dir = match ev.facing {
            Facing::Up => Vec2::Y,
            Facing::Down => Vec2::NEG_Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        };
        gizmos.line_2d(position.0, position.0 + dir * 24.0, Color::srgb(1.0, 0.9, 0.5));
    }
}
