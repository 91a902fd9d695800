//! Falling balls that bounce off drawn edges.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::config::{ConfigLoaded, PlaygroundConfig};

#[derive(Component)]
pub struct Ball;

#[derive(Resource)]
pub struct BallSpawnTimer(pub Timer);

pub struct PlaygroundPlugin;

impl Plugin for PlaygroundPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, setup_ball_assets)
      .add_systems(
        Update,
        (update_timer_on_config_change, spawn_balls, despawn_fallen_balls).chain(),
      );
  }
}

#[derive(Resource)]
struct BallAssets {
  mesh: Handle<Mesh>,
  material: Handle<ColorMaterial>,
  radius: f32,
}

fn setup_ball_assets(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<ColorMaterial>>,
) {
  let playground = &config.playground;
  commands.insert_resource(BallSpawnTimer(Timer::from_seconds(
    playground.spawn_interval,
    TimerMode::Repeating,
  )));
  commands.insert_resource(ball_assets(playground, &mut meshes, &mut materials));
}

fn ball_assets(
  playground: &PlaygroundConfig,
  meshes: &mut Assets<Mesh>,
  materials: &mut Assets<ColorMaterial>,
) -> BallAssets {
  let [r, g, b] = playground.ball_color;
  BallAssets {
    mesh: meshes.add(Circle::new(playground.ball_radius)),
    material: materials.add(ColorMaterial::from_color(Color::srgb(r, g, b))),
    radius: playground.ball_radius,
  }
}

fn update_timer_on_config_change(
  config: Res<ConfigLoaded>,
  mut timer: ResMut<BallSpawnTimer>,
  mut assets: ResMut<BallAssets>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<ColorMaterial>>,
) {
  if !config.is_changed() || config.is_added() {
    return;
  }
  let playground = &config.playground;
  timer
    .0
    .set_duration(std::time::Duration::from_secs_f32(playground.spawn_interval));
  *assets = ball_assets(playground, &mut meshes, &mut materials);
}

fn spawn_balls(
  mut commands: Commands,
  time: Res<Time>,
  config: Res<ConfigLoaded>,
  assets: Res<BallAssets>,
  mut timer: ResMut<BallSpawnTimer>,
  balls: Query<(), With<Ball>>,
) {
  if !timer.0.tick(time.delta()).just_finished() {
    return;
  }
  let playground = &config.playground;
  if balls.iter().count() >= playground.max_balls {
    return;
  }

  let mut rng = rand::rng();
  let x = if playground.spawn_half_width > 0.0 {
    rng.random_range(-playground.spawn_half_width..playground.spawn_half_width)
  } else {
    0.0
  };

  commands.spawn((
    Ball,
    Mesh2d(assets.mesh.clone()),
    MeshMaterial2d(assets.material.clone()),
    Transform::from_xyz(x, playground.spawn_height, 0.0),
    RigidBody::Dynamic,
    Collider::ball(assets.radius),
    Restitution::coefficient(0.4),
    GravityScale(config.physics.gravity_scale),
    Sleeping::default(),
  ));
}

fn despawn_fallen_balls(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  balls: Query<(Entity, &Transform), With<Ball>>,
) {
  for (entity, transform) in &balls {
    if transform.translation.y < config.playground.despawn_height {
      commands.entity(entity).despawn();
    }
  }
}
