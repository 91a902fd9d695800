pub(crate) mod camera;
mod physics;

use bevy::prelude::*;
pub use physics::PhysicsPlugin;

use crate::config::ConfigLoaded;
use crate::drawer::LineDrawer;
use crate::plugin::line_drawer;

/// Camera, physics and the drawer entity for the demo app.
pub struct ScenePlugin {
  pub length_unit: f32,
}

impl Plugin for ScenePlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(PhysicsPlugin {
        length_unit: self.length_unit,
      })
      .add_systems(Startup, (camera::setup_camera, spawn_drawer));
  }
}

fn spawn_drawer(mut commands: Commands, config: Res<ConfigLoaded>) {
  let mut drawer = LineDrawer::new(config.fade.enabled, config.fade.duration);
  drawer.set_fade_out_listener(Some(Box::new(|| info!("Line faded out"))));
  commands.spawn(line_drawer(drawer));
}
