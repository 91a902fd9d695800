use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

#[derive(Component)]
pub struct DrawInput;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ToggleFade;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ClearLine;
