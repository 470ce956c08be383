//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `castle_combat::game::configure_headless` to install gameplay plugins.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

/// One fixed tick per `update()` at the default 64 Hz.
pub const TICK: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    castle_combat::game::configure_headless(&mut app);
    // `App::run` normally does this; plugins such as avian register resources in `finish`.
    app.finish();
    app.cleanup();
    app
}
