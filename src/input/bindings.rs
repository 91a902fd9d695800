use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{ClearLine, DrawInput, ToggleFade};

pub fn draw_input_actions() -> impl Bundle {
  actions!(DrawInput[
      (
          Action::<ToggleFade>::new(),
          bindings![KeyCode::KeyF],
      ),
      (
          Action::<ClearLine>::new(),
          bindings![KeyCode::KeyC, KeyCode::Escape],
      ),
  ])
}
