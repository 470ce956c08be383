//! NPC plugin: spawn hostiles at the arena edge, walk them to the castle, let them hit it.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{CombatStats, DamagePipeline};
use crate::plugins::entities::{EntityManager, PendingDespawn, spawn};
use crate::plugins::world::Castle;

/// How close an NPC must be to the castle centre to hit it.
pub const MELEE_REACH: f32 = 70.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct Npc;

/// Melee cooldown, derived from the last hit like a gun's reload.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Melee {
    pub last_attack_at: Option<f32>,
}

impl Melee {
    pub fn can_attack(&self, now: f32, attack_speed: f32) -> bool {
        if attack_speed <= 0.0 {
            return false;
        }
        self.last_attack_at
            .is_none_or(|at| now - at >= 1.0 / attack_speed)
    }
}

#[derive(Resource, Debug)]
struct NpcSpawner {
    timer: Timer,
}

pub fn plugin(app: &mut App) {
    let interval = app.world().resource::<Tunables>().npc_spawn_interval;
    app.insert_resource(NpcSpawner {
        timer: Timer::from_seconds(interval, TimerMode::Repeating),
    });

    app.add_systems(
        FixedUpdate,
        (spawn_npcs, walk_to_castle, npc_melee)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}

/// A random point just inside the arena edge.
fn edge_point(rng: &mut impl Rng, half: Vec2) -> Vec2 {
    let along = rng.random_range(-1.0_f32..=1.0);
    match rng.random_range(0..4) {
        0 => Vec2::new(along * half.x, half.y),
        1 => Vec2::new(along * half.x, -half.y),
        2 => Vec2::new(half.x, along * half.y),
        _ => Vec2::new(-half.x, along * half.y),
    }
}

fn spawn_npcs(
    time: Res<Time<Fixed>>,
    mut spawner: ResMut<NpcSpawner>,
    mut entities: EntityManager,
) {
    spawner.timer.tick(time.delta());
    for _ in 0..spawner.timer.times_finished_this_tick() {
        let position = edge_point(&mut rand::rng(), Vec2::new(960.0, 520.0));
        let entity = entities.add_entity((Npc, Melee::default(), spawn::npc(position)));
        debug!(?entity, %position, "npc spawned");
    }
}

fn walk_to_castle(
    castle: Query<&Position, With<Castle>>,
    mut npcs: Query<(&Position, &CombatStats, &mut LinearVelocity), With<Npc>>,
) {
    let Ok(goal) = castle.single() else {
        return;
    };

    for (position, stats, mut velocity) in &mut npcs {
        let offset = goal.0 - position.0;
        velocity.0 = if offset.length() <= MELEE_REACH {
            Vec2::ZERO
        } else {
            offset.normalize_or_zero() * stats.movement_speed
        };
    }
}

fn npc_melee(
    castle: Query<(Entity, &Position), With<Castle>>,
    mut npcs: Query<(Entity, &Position, &mut Melee), (With<Npc>, Without<PendingDespawn>)>,
    mut pipeline: DamagePipeline,
) {
    let Ok((castle, goal)) = castle.single() else {
        return;
    };
    let now = pipeline.entities().ingame_time();

    for (npc, position, mut melee) in &mut npcs {
        if position.0.distance(goal.0) > MELEE_REACH {
            continue;
        }
        let Some(stats) = pipeline.stats(npc) else {
            continue;
        };
        if !melee.can_attack(now, stats.attack_speed) {
            continue;
        }

        match pipeline.apply(&stats, Some(npc), castle) {
            Ok(_) => melee.last_attack_at = Some(now),
            Err(err) => warn!(?npc, "melee failed: {err}"),
        }
    }
}
