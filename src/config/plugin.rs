#[cfg(not(target_family = "wasm"))]
use bevy::{asset::AssetEvent, ecs::message::MessageReader};
use bevy::{camera::ScalingMode, prelude::*, window::PrimaryWindow};
#[cfg(not(target_family = "wasm"))]
use bevy_common_assets::toml::TomlAssetPlugin;

use super::{AppConfig, ConfigLoaded, ConfigOverrides};
#[cfg(not(target_family = "wasm"))]
use super::CONFIG_ASSET_PATH;
use crate::drawer::LineDrawer;
use crate::line::LineStyle;
use crate::pointer::DrawCamera;

/// Installs the loaded config as [`ConfigLoaded`] and pushes changes to the
/// window, camera, line style and drawers.
pub struct ConfigPlugin {
  pub config: AppConfig,
  pub overrides: ConfigOverrides,
  /// Watch the config asset and reload it on change (native only).
  pub hot_reload: bool,
}

impl ConfigPlugin {
  pub fn new(config: AppConfig) -> Self {
    Self {
      config,
      overrides: ConfigOverrides::default(),
      hot_reload: false,
    }
  }

  pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
    self.overrides = overrides;
    self
  }

  pub fn with_hot_reload(mut self, hot_reload: bool) -> Self {
    self.hot_reload = hot_reload;
    self
  }
}

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    let mut config = self.config.clone();
    self.overrides.apply(&mut config);

    // Native: asset-based config with hot-reload
    #[cfg(not(target_family = "wasm"))]
    if self.hot_reload {
      app
        .add_plugins(TomlAssetPlugin::<AppConfig>::new(&["config.toml"]))
        .add_systems(Startup, watch_config_asset)
        .add_systems(Update, watch_config_changes);
    }

    app
      .insert_resource(self.overrides)
      .insert_resource(ConfigLoaded::from(config))
      .init_resource::<LineStyle>()
      .add_systems(
        Update,
        (
          update_window_on_config_change,
          update_camera_on_config_change,
          update_line_style_on_config_change,
          update_drawers_on_config_change,
        ),
      );
  }
}

#[cfg(not(target_family = "wasm"))]
#[derive(Resource)]
pub struct ConfigHandle(pub Handle<AppConfig>);

#[cfg(not(target_family = "wasm"))]
fn watch_config_asset(mut commands: Commands, asset_server: Res<AssetServer>) {
  let handle: Handle<AppConfig> = asset_server.load(CONFIG_ASSET_PATH);
  commands.insert_resource(ConfigHandle(handle));
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_changes(
  mut commands: Commands,
  config_handle: Option<Res<ConfigHandle>>,
  overrides: Res<ConfigOverrides>,
  mut messages: MessageReader<AssetEvent<AppConfig>>,
  configs: Res<Assets<AppConfig>>,
) {
  let Some(config_handle) = config_handle else {
    return;
  };
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event {
      if config_handle.0.id() == *id {
        if let Some(config) = configs.get(&config_handle.0) {
          if let Err(err) = config.validate() {
            warn!("Ignoring config reload: {err}");
            continue;
          }
          let mut config = config.clone();
          overrides.apply(&mut config);
          info!("Config reloaded!");
          commands.insert_resource(ConfigLoaded::from(config));
        }
      }
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() {
    if let Ok(mut window) = windows.single_mut() {
      window
        .resolution
        .set(config.window.width as f32, config.window.height as f32);
      window.title.clone_from(&config.window.title);
    }
  }
}

fn update_camera_on_config_change(
  config: Res<ConfigLoaded>,
  mut camera_query: Query<&mut Projection, With<DrawCamera>>,
) {
  if config.is_changed() {
    for mut projection in camera_query.iter_mut() {
      if let Projection::Orthographic(ref mut ortho) = *projection {
        ortho.scaling_mode = ScalingMode::AutoMin {
          min_width: config.camera.viewport_width,
          min_height: config.camera.viewport_height,
        };
      }
    }
  }
}

fn update_line_style_on_config_change(config: Res<ConfigLoaded>, mut style: ResMut<LineStyle>) {
  if config.is_changed() {
    style.set_if_neq(LineStyle {
      width: config.line.width,
      joint_resolution: config.line.joint_resolution,
    });
  }
}

/// New fade settings only take effect for the next fade a drawer starts.
pub fn update_drawers_on_config_change(
  config: Res<ConfigLoaded>,
  overrides: Res<ConfigOverrides>,
  mut drawers: Query<&mut LineDrawer>,
) {
  if config.is_changed() || overrides.is_changed() {
    let fade_out = overrides.fade_out_enabled(&config);
    for mut drawer in &mut drawers {
      drawer.fade_out = fade_out;
      drawer.fade_out_duration = config.fade.duration;
    }
  }
}
