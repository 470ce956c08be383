//! Core plugin: shared resources, global settings and the in-game clock.

use bevy::prelude::*;

use crate::common::clock::{IngameClock, advance_clock};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    app.init_resource::<IngameClock>();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    app.add_systems(
        FixedFirst,
        advance_clock.run_if(in_state(GameState::InGame)),
    );
}
