use bevy::prelude::*;

/// Points of the stroke currently being drawn, or the last one drawn.
///
/// A stroke is at most `[start, end]`: the start is pinned when the drag
/// begins and every later sample replaces the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawnPath {
  points: Vec<Vec2>,
}

impl DrawnPath {
  /// Pins the start of a new stroke. Ignored if the path is not empty.
  pub fn start(&mut self, position: Vec2) {
    if self.points.is_empty() {
      self.points.push(position);
    }
  }

  /// Appends an end sample, replacing the previous one.
  pub fn extend(&mut self, position: Vec2) {
    if self.points.len() > 1 {
      self.points.truncate(1);
    }
    self.points.push(position);
  }

  pub fn clear(&mut self) {
    self.points.clear();
  }

  pub fn points(&self) -> &[Vec2] {
    &self.points
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// True once the stroke has an end sample and can form a boundary.
  pub fn has_span(&self) -> bool {
    self.points.len() > 1
  }
}
