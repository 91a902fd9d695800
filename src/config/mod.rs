mod error;
mod plugin;

use std::path::Path;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use error::ConfigError;
pub use plugin::ConfigPlugin;
use serde::{Deserialize, Deserializer, de};

/// Asset path of the config file, relative to `assets/`.
pub const CONFIG_ASSET_PATH: &str = "config/line.config.toml";

/// Filesystem path of the config file used when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/line.config.toml";

#[derive(Asset, TypePath, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub line: LineConfig,
  pub fade: FadeConfig,
  pub playground: PlaygroundConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
  /// World units per physics meter.
  pub length_unit: f32,
  pub gravity_scale: f32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LineConfig {
  pub width: f32,
  #[serde(default)]
  pub joint_resolution: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FadeConfig {
  #[serde(default)]
  pub enabled: bool,
  #[serde(default = "default_fade_duration")]
  pub duration: f32,
}

fn default_fade_duration() -> f32 {
  1.0
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PlaygroundConfig {
  pub spawn_interval: f32,
  pub ball_radius: f32,
  pub spawn_height: f32,
  pub spawn_half_width: f32,
  pub despawn_height: f32,
  pub max_balls: usize,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub ball_color: [f32; 3],
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 {
    return Err(de::Error::custom("hex color must be 6 characters"));
  }
  let r = u8::from_str_radix(&s[0..2], 16).map_err(de::Error::custom)?;
  let g = u8::from_str_radix(&s[2..4], 16).map_err(de::Error::custom)?;
  let b = u8::from_str_radix(&s[4..6], 16).map_err(de::Error::custom)?;
  Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

impl AppConfig {
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: AppConfig = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    Self::from_toml_str(&source)
  }

  /// Rejects values the drawer or the physics setup cannot work with.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let positive = [
      ("fade.duration", self.fade.duration),
      ("line.width", self.line.width),
      ("physics.length_unit", self.physics.length_unit),
      ("playground.spawn_interval", self.playground.spawn_interval),
      ("playground.ball_radius", self.playground.ball_radius),
      ("camera.viewport_width", self.camera.viewport_width),
      ("camera.viewport_height", self.camera.viewport_height),
    ];
    for (field, value) in positive {
      if !(value > 0.0 && value.is_finite()) {
        return Err(ConfigError::Invalid {
          field,
          reason: format!("must be a positive number, got {value}"),
        });
      }
    }
    Ok(())
  }
}

/// Values that win over the config file, including after a hot reload.
/// Seeded from the command line; the fade toggle key writes here too.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
  pub fade_out: Option<bool>,
  pub fade_duration: Option<f32>,
}

impl ConfigOverrides {
  pub fn apply(&self, config: &mut AppConfig) {
    if let Some(enabled) = self.fade_out {
      config.fade.enabled = enabled;
    }
    if let Some(duration) = self.fade_duration {
      config.fade.duration = duration;
    }
  }

  /// Effective fade-out flag for `config`.
  pub fn fade_out_enabled(&self, config: &ConfigLoaded) -> bool {
    self.fade_out.unwrap_or(config.fade.enabled)
  }

  /// Flips fade-out without touching [`ConfigLoaded`], so window and
  /// playground settings are not re-applied. Returns the new value.
  pub fn toggle_fade_out(&mut self, config: &ConfigLoaded) -> bool {
    let enabled = !self.fade_out_enabled(config);
    self.fade_out = Some(enabled);
    enabled
  }
}

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub line: LineConfig,
  pub fade: FadeConfig,
  pub playground: PlaygroundConfig,
}

impl From<AppConfig> for ConfigLoaded {
  fn from(config: AppConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      physics: config.physics,
      line: config.line,
      fade: config.fade,
      playground: config.playground,
    }
  }
}
