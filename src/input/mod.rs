//! Keyboard shortcuts for the demo, bound through enhanced input actions.

pub mod actions;
mod bindings;

pub use actions::{ClearLine, DrawInput, ToggleFade};
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
pub use bindings::draw_input_actions;

use crate::config::{ConfigLoaded, ConfigOverrides};
use crate::plugin::ClearLines;

pub struct DrawInputPlugin;

impl Plugin for DrawInputPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(EnhancedInputPlugin)
      .add_input_context::<DrawInput>()
      .add_systems(Startup, spawn_draw_input)
      .add_systems(Update, (toggle_fade_on_input, clear_line_on_input));
  }
}

fn spawn_draw_input(mut commands: Commands) {
  commands.spawn((Name::new("DrawInput"), DrawInput, draw_input_actions()));
}

/// Tracks whether an action already triggered during the current press.
#[derive(Default)]
struct PressLatch {
  triggered: bool,
}

impl PressLatch {
  /// Returns true on the first frame the action fires.
  fn rising(&mut self, state: &ActionState) -> bool {
    match state {
      ActionState::Fired => {
        let first = !self.triggered;
        self.triggered = true;
        first
      }
      ActionState::None => {
        self.triggered = false;
        false
      }
      _ => false,
    }
  }
}

/// Flips the fade-out override; drawers pick it up on change.
fn toggle_fade_on_input(
  contexts: Query<&Actions<DrawInput>>,
  action_states: Query<&ActionState, With<Action<ToggleFade>>>,
  config: Res<ConfigLoaded>,
  mut overrides: ResMut<ConfigOverrides>,
  mut latch: Local<PressLatch>,
) {
  for actions in &contexts {
    for action_entity in actions.iter() {
      let Ok(action_state) = action_states.get(action_entity) else {
        continue;
      };
      if latch.rising(action_state) {
        let enabled = overrides.toggle_fade_out(&config);
        info!(
          "Fade-out {}",
          if enabled {
            "enabled"
          } else {
            "disabled"
          }
        );
      }
    }
  }
}

fn clear_line_on_input(
  contexts: Query<&Actions<DrawInput>>,
  action_states: Query<&ActionState, With<Action<ClearLine>>>,
  mut clear: MessageWriter<ClearLines>,
  mut latch: Local<PressLatch>,
) {
  for actions in &contexts {
    for action_entity in actions.iter() {
      let Ok(action_state) = action_states.get(action_entity) else {
        continue;
      };
      if latch.rising(action_state) {
        clear.write(ClearLines::default());
      }
    }
  }
}
