//! Seams between the drawer and the primitives it drives.

use bevy::prelude::*;

/// A renderable polyline the drawer can write to.
pub trait LineSink {
  /// Replaces the whole point sequence.
  fn set_points(&mut self, points: &[Vec2]);
  /// Sets a flat tint applied to the entire line.
  fn set_tint(&mut self, color: Color);
}

/// A collision edge built from the drawn points.
pub trait BoundarySink {
  fn set_enabled(&mut self, enabled: bool);
  /// Replaces the whole point sequence.
  fn set_points(&mut self, points: &[Vec2]);
  /// Drops all points.
  fn clear(&mut self);
}

// Writing through `Mut` only when the drawer actually mutates keeps Bevy's
// change detection quiet on idle ticks.
impl<T: LineSink> LineSink for Mut<'_, T> {
  fn set_points(&mut self, points: &[Vec2]) {
    (**self).set_points(points);
  }

  fn set_tint(&mut self, color: Color) {
    (**self).set_tint(color);
  }
}

impl<T: BoundarySink> BoundarySink for Mut<'_, T> {
  fn set_enabled(&mut self, enabled: bool) {
    (**self).set_enabled(enabled);
  }

  fn set_points(&mut self, points: &[Vec2]) {
    (**self).set_points(points);
  }

  fn clear(&mut self) {
    (**self).clear();
  }
}

/// The primitives a drawer writes to on one tick. Either may be missing, in
/// which case the matching side effects are skipped.
pub struct Surfaces<'a, L: ?Sized, B: ?Sized> {
  pub line: Option<&'a mut L>,
  pub boundary: Option<&'a mut B>,
}

impl<'a, L: LineSink + ?Sized, B: BoundarySink + ?Sized> Surfaces<'a, L, B> {
  pub fn new(line: Option<&'a mut L>, boundary: Option<&'a mut B>) -> Self {
    Self { line, boundary }
  }

  pub(crate) fn with_line(&mut self, f: impl FnOnce(&mut L)) {
    if let Some(line) = self.line.as_deref_mut() {
      f(line);
    }
  }

  pub(crate) fn with_boundary(&mut self, f: impl FnOnce(&mut B)) {
    if let Some(boundary) = self.boundary.as_deref_mut() {
      f(boundary);
    }
  }
}
