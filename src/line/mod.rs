//! Gizmo-rendered line strip backing the drawer's render side.

use bevy::prelude::*;

use crate::drawer::{LINE_BASE_TINT, LineSink};

/// Gizmo group used for drawn lines, so their width and joints can be
/// configured apart from debug gizmos.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct LineStripGizmos;

/// World-space polyline drawn every frame with a flat tint.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct LineStrip {
  pub points: Vec<Vec2>,
  pub tint: Color,
}

impl Default for LineStrip {
  fn default() -> Self {
    Self {
      points: Vec::new(),
      tint: LINE_BASE_TINT,
    }
  }
}

impl LineSink for LineStrip {
  fn set_points(&mut self, points: &[Vec2]) {
    self.points.clear();
    self.points.extend_from_slice(points);
  }

  fn set_tint(&mut self, color: Color) {
    self.tint = color;
  }
}

/// Static styling for [`LineStripGizmos`].
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
  /// Line width in pixels.
  pub width: f32,
  /// Segments per rounded joint; 0 selects miter joints.
  pub joint_resolution: u32,
}

impl Default for LineStyle {
  fn default() -> Self {
    Self {
      width: 4.0,
      joint_resolution: 4,
    }
  }
}

pub fn apply_line_style(style: Res<LineStyle>, mut config_store: ResMut<GizmoConfigStore>) {
  if !style.is_changed() {
    return;
  }
  let (config, _) = config_store.config_mut::<LineStripGizmos>();
  config.line.width = style.width;
  config.line.joints = if style.joint_resolution == 0 {
    GizmoLineJoint::Miter
  } else {
    GizmoLineJoint::Round(style.joint_resolution)
  };
}

pub fn draw_line_strips(mut gizmos: Gizmos<LineStripGizmos>, strips: Query<&LineStrip>) {
  for strip in &strips {
    // Deliberately skipped: a press without movement draws nothing until
    // the end point arrives, like a zero-length line.
    if strip.points.len() < 2 || strip.tint.alpha() <= 0.0 {
      continue;
    }
    gizmos.linestrip_2d(strip.points.iter().copied(), strip.tint);
  }
}
