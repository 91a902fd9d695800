//! Edge boundary mirrored into a Rapier polyline collider.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::drawer::BoundarySink;

/// Collision edge produced by a finished stroke.
///
/// Holds plain data; [`sync_edge_colliders`] turns it into a Rapier
/// collider on the same entity.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct EdgeBoundary {
  pub enabled: bool,
  pub points: Vec<Vec2>,
}

impl EdgeBoundary {
  /// A polyline collider needs at least one segment.
  pub fn has_edge(&self) -> bool {
    self.points.len() >= 2
  }
}

impl BoundarySink for EdgeBoundary {
  fn set_enabled(&mut self, enabled: bool) {
    self.enabled = enabled;
  }

  fn set_points(&mut self, points: &[Vec2]) {
    self.points.clear();
    self.points.extend_from_slice(points);
  }

  fn clear(&mut self) {
    self.points.clear();
  }
}

/// Rebuilds colliders for boundaries that changed this frame.
///
/// - Inserts a polyline collider when the boundary has an edge
/// - Removes the collider when the boundary is empty
/// - Adds `ColliderDisabled` while the boundary is disabled
/// - Wakes sleeping bodies when a new edge appears
pub fn sync_edge_colliders(
  mut commands: Commands,
  boundaries: Query<(Entity, &EdgeBoundary), Changed<EdgeBoundary>>,
  mut sleeping_bodies: Query<&mut Sleeping, With<RigidBody>>,
) {
  let mut edge_added = false;

  for (entity, boundary) in &boundaries {
    let mut entity_commands = commands.entity(entity);

    if boundary.has_edge() {
      entity_commands.insert(Collider::polyline(boundary.points.clone(), None));
    } else {
      entity_commands.remove::<Collider>();
    }

    if boundary.enabled {
      entity_commands.remove::<ColliderDisabled>();
      edge_added |= boundary.has_edge();
    } else {
      entity_commands.insert(ColliderDisabled);
    }
  }

  if edge_added {
    for mut sleeping in &mut sleeping_bodies {
      sleeping.sleeping = false;
    }
  }
}
