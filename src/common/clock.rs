//! In-game clock.

use bevy::prelude::*;

/// Simulation time in seconds.
///
/// Advanced once per fixed tick, so every collision callback in a tick observes the same value.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct IngameClock {
    elapsed: f32,
}

impl IngameClock {
    pub fn at(elapsed: f32) -> Self {
        Self { elapsed }
    }

    #[inline]
    pub fn now(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }
}

/// Advance the clock by the fixed timestep.
pub fn advance_clock(time: Res<Time<Fixed>>, mut clock: ResMut<IngameClock>) {
    clock.advance(time.delta_secs());
}
