use std::path::PathBuf;

use bevy::{
  prelude::*,
  window::{PresentMode, WindowResolution},
};
use clap::Parser;
use line_draw2d::config::{AppConfig, ConfigOverrides, ConfigPlugin, DEFAULT_CONFIG_PATH};
use line_draw2d::input::DrawInputPlugin;
use line_draw2d::playground::PlaygroundPlugin;
use line_draw2d::plugin::LineDrawPlugin;
use line_draw2d::scene::ScenePlugin;

/// Draw lines with the mouse; balls bounce off them.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
  /// Config file. Hot reload only watches the bundled asset.
  #[arg(long)]
  config: Option<PathBuf>,
  /// Override `[fade] enabled`.
  #[arg(long)]
  fade_out: Option<bool>,
  /// Override `[fade] duration`, in seconds.
  #[arg(long)]
  fade_duration: Option<f32>,
}

fn main() {
  // WASM: set up panic hook for better error messages
  #[cfg(target_family = "wasm")]
  console_error_panic_hook::set_once();

  // WASM: embed config at compile time (no filesystem access or arguments)
  #[cfg(target_family = "wasm")]
  let (cli, loaded) = (
    Cli {
      config: None,
      fade_out: None,
      fade_duration: None,
    },
    AppConfig::from_toml_str(include_str!("../assets/config/line.config.toml")),
  );
  #[cfg(not(target_family = "wasm"))]
  let (cli, loaded) = {
    let cli = Cli::parse();
    let path = cli
      .config
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let loaded = AppConfig::load(&path);
    (cli, loaded)
  };

  let config = match loaded {
    Ok(config) => config,
    Err(err) => {
      eprintln!("Failed to load config: {err}");
      std::process::exit(1);
    }
  };

  let overrides = ConfigOverrides {
    fade_out: cli.fade_out,
    fade_duration: cli.fade_duration,
  };
  if let Some(duration) = overrides.fade_duration {
    if !(duration > 0.0 && duration.is_finite()) {
      eprintln!("--fade-duration must be a positive number, got {duration}");
      std::process::exit(1);
    }
  }

  let mut app = App::new();

  app
    .add_plugins(
      DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
          resolution: WindowResolution::new(config.window.width, config.window.height),
          title: config.window.title.clone(),
          // WASM: only Fifo (vsync) is supported on WebGL2
          #[cfg(target_family = "wasm")]
          present_mode: PresentMode::Fifo,
          #[cfg(not(target_family = "wasm"))]
          present_mode: PresentMode::AutoVsync,
          #[cfg(target_family = "wasm")]
          canvas: Some("#bevy".to_string()),
          #[cfg(target_family = "wasm")]
          fit_canvas_to_parent: true,
          ..default()
        }),
        ..default()
      }),
    )
    .add_plugins(LineDrawPlugin)
    .add_plugins(
      ConfigPlugin::new(config.clone())
        .with_overrides(overrides)
        .with_hot_reload(cli.config.is_none()),
    )
    .add_plugins(ScenePlugin {
      length_unit: config.physics.length_unit,
    })
    .add_plugins(DrawInputPlugin)
    .add_plugins(PlaygroundPlugin);

  app.run();
}
