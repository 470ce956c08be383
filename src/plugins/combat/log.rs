//! Damage log backing the floating combat text.

use bevy::prelude::*;

use crate::common::clock::IngameClock;
use crate::common::error::{CombatError, CombatResult};
use crate::common::tunables::Tunables;

/// One applied hit. Never mutated after it is logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRecord {
    pub game_time: f32,
    pub damage: f32,
    pub position: Vec2,
    pub fatal: bool,
}

/// Append-and-remove log of [`DamageRecord`]s.
#[derive(Resource, Debug, Default)]
pub struct DamageLog {
    records: Vec<DamageRecord>,
}

impl DamageLog {
    pub fn push(&mut self, record: DamageRecord) {
        self.records.push(record);
    }

    pub fn entries(&self) -> &[DamageRecord] {
        &self.records
    }

    /// Take every record, leaving the log empty.
    pub fn drain(&mut self) -> Vec<DamageRecord> {
        std::mem::take(&mut self.records)
    }

    /// O(n): later records shift down by one.
    pub fn remove(&mut self, index: usize) -> CombatResult<DamageRecord> {
        if index >= self.records.len() {
            return Err(CombatError::LogIndexOutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drop records older than `Tunables::damage_text_ttl`.
///
/// Keeps the log bounded when nothing drains it (headless runs).
pub fn expire_damage_records(
    clock: Res<IngameClock>,
    tunables: Res<Tunables>,
    mut log: ResMut<DamageLog>,
) {
    let now = clock.now();
    // Walk backwards so removals don't shift indices we have yet to visit.
    for index in (0..log.len()).rev() {
        let stale = log
            .entries()
            .get(index)
            .is_some_and(|record| now - record.game_time > tunables.damage_text_ttl);
        if !stale {
            continue;
        }
        if let Err(err) = log.remove(index) {
            warn!("damage log expiry: {err}");
        }
    }
}
