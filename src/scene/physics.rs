use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

pub struct PhysicsPlugin {
  /// World units per physics meter.
  pub length_unit: f32,
}

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    app.add_plugins(
      RapierPhysicsPlugin::<NoUserData>::default().with_length_unit(self.length_unit),
    );
  }
}
