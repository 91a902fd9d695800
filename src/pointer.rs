//! Pointer sampling: mouse button edges plus cursor position in world space.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::drawer::PointerSample;

/// Marker for the camera used to project the cursor into the world.
#[derive(Component)]
pub struct DrawCamera;

/// Mouse button that draws lines.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PointerBinding(pub MouseButton);

impl Default for PointerBinding {
  fn default() -> Self {
    Self(MouseButton::Left)
  }
}

/// Fills [`PointerSample`] for this frame.
///
/// When the cursor leaves the window or cannot be projected, the previous
/// world position is kept so a drag never jumps to the origin.
pub fn sample_pointer(
  binding: Res<PointerBinding>,
  mouse_buttons: Res<ButtonInput<MouseButton>>,
  window_query: Query<&Window, With<PrimaryWindow>>,
  camera_query: Query<(&Camera, &GlobalTransform), With<DrawCamera>>,
  mut pointer: ResMut<PointerSample>,
) {
  let button = binding.0;
  let mut sample = PointerSample {
    pressed: mouse_buttons.just_pressed(button),
    held: mouse_buttons.pressed(button),
    released: mouse_buttons.just_released(button),
    position: pointer.position,
  };

  if let Some(world_pos) = cursor_world_position(&window_query, &camera_query) {
    sample.position = world_pos;
  }

  pointer.set_if_neq(sample);
}

fn cursor_world_position(
  window_query: &Query<&Window, With<PrimaryWindow>>,
  camera_query: &Query<(&Camera, &GlobalTransform), With<DrawCamera>>,
) -> Option<Vec2> {
  let window = window_query.single().ok()?;
  let (camera, camera_transform) = camera_query.single().ok()?;
  let cursor_pos = window.cursor_position()?;
  camera.viewport_to_world_2d(camera_transform, cursor_pos).ok()
}
