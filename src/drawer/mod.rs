//! Stroke state machine: pointer samples in, line and boundary updates out.

mod fade;
mod path;
mod surfaces;


use std::fmt;

use bevy::prelude::*;
pub use fade::{FADE_HOLD_SECS, FadePhase, FadeStep};
pub use path::DrawnPath;
pub use surfaces::{BoundarySink, LineSink, Surfaces};

/// Tint of a fresh or reset line.
pub const LINE_BASE_TINT: Color = Color::WHITE;

/// Called once after a fade completes and the line has been reset.
pub type FadeOutListener = Box<dyn FnMut() + Send + Sync + 'static>;

/// Pointer state for one tick, already converted to world space.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
  /// Primary button went down this tick.
  pub pressed: bool,
  /// Primary button is down.
  pub held: bool,
  /// Primary button went up this tick.
  pub released: bool,
  pub position: Vec2,
}

impl PointerSample {
  pub fn idle(position: Vec2) -> Self {
    Self {
      position,
      ..default()
    }
  }

  pub fn press(position: Vec2) -> Self {
    Self {
      pressed: true,
      held: true,
      released: false,
      position,
    }
  }

  pub fn hold(position: Vec2) -> Self {
    Self {
      pressed: false,
      held: true,
      released: false,
      position,
    }
  }

  pub fn release(position: Vec2) -> Self {
    Self {
      pressed: false,
      held: false,
      released: true,
      position,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
  #[default]
  Idle,
  Dragging,
  FadingOut,
}

/// Transitions that happened during one [`LineDrawer::advance`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
  pub stroke_started: bool,
  pub stroke_finished: bool,
  /// A running fade was cut short by a new stroke.
  pub fade_cancelled: bool,
  pub fade_started: bool,
  pub faded_out: bool,
}

/// Draws a two-point line with the pointer and turns it into an edge
/// boundary on release, optionally fading it out afterwards.
#[derive(Component)]
pub struct LineDrawer {
  /// Start a fade when a stroke is released.
  pub fade_out: bool,
  /// Seconds the decay takes after the hold window.
  pub fade_out_duration: f32,
  state: DrawState,
  path: DrawnPath,
  fade: FadePhase,
  listener: Option<FadeOutListener>,
}

impl Default for LineDrawer {
  fn default() -> Self {
    Self {
      fade_out: false,
      fade_out_duration: 1.0,
      state: DrawState::Idle,
      path: DrawnPath::default(),
      fade: FadePhase::NotRunning,
      listener: None,
    }
  }
}

impl fmt::Debug for LineDrawer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LineDrawer")
      .field("fade_out", &self.fade_out)
      .field("fade_out_duration", &self.fade_out_duration)
      .field("state", &self.state)
      .field("path", &self.path)
      .field("fade", &self.fade)
      .field("listener", &self.listener.is_some())
      .finish()
  }
}

impl LineDrawer {
  pub fn new(fade_out: bool, fade_out_duration: f32) -> Self {
    Self {
      fade_out,
      fade_out_duration,
      ..default()
    }
  }

  /// Replaces the fade-out listener. `None` clears it.
  pub fn set_fade_out_listener(&mut self, listener: Option<FadeOutListener>) {
    self.listener = listener;
  }

  pub fn has_fade_out_listener(&self) -> bool {
    self.listener.is_some()
  }

  pub fn state(&self) -> DrawState {
    self.state
  }

  pub fn points(&self) -> &[Vec2] {
    self.path.points()
  }

  pub fn fade(&self) -> FadePhase {
    self.fade
  }

  pub fn is_fading(&self) -> bool {
    self.fade.is_running()
  }

  /// Opacity the line currently carries.
  pub fn opacity(&self) -> f32 {
    self.fade.opacity()
  }

  /// Runs one tick: pointer handling first, then fade progress.
  pub fn advance<L, B>(
    &mut self,
    pointer: &PointerSample,
    dt: f32,
    surfaces: &mut Surfaces<'_, L, B>,
  ) -> TickReport
  where
    L: LineSink + ?Sized,
    B: BoundarySink + ?Sized,
  {
    let mut report = TickReport::default();

    if pointer.pressed {
      report.fade_cancelled = self.cancel_fade();
      self.begin_stroke(pointer.position, surfaces);
      report.stroke_started = true;
    } else if pointer.held && self.state == DrawState::Dragging {
      self.extend_stroke(pointer.position, surfaces);
    }

    if pointer.released && self.state == DrawState::Dragging {
      report.fade_started = self.finish_stroke(surfaces);
      report.stroke_finished = true;
    }

    // A fade started this tick has only applied its initial tint.
    if !report.fade_started {
      report.faded_out = self.step_fade(dt, surfaces);
    }

    report
  }

  /// Clears the line, the path and the boundary. Safe to call at any time;
  /// a running fade is left alone.
  pub fn reset<L, B>(&mut self, surfaces: &mut Surfaces<'_, L, B>)
  where
    L: LineSink + ?Sized,
    B: BoundarySink + ?Sized,
  {
    surfaces.with_line(|line| {
      line.set_points(&[]);
      line.set_tint(LINE_BASE_TINT);
    });
    self.path.clear();
    surfaces.with_boundary(|boundary| {
      boundary.clear();
      boundary.set_enabled(false);
    });
  }

  /// Stops any fade and wipes everything, returning to [`DrawState::Idle`].
  pub fn clear<L, B>(&mut self, surfaces: &mut Surfaces<'_, L, B>)
  where
    L: LineSink + ?Sized,
    B: BoundarySink + ?Sized,
  {
    self.cancel_fade();
    self.reset(surfaces);
    self.state = DrawState::Idle;
  }

  fn cancel_fade(&mut self) -> bool {
    let was_running = self.fade.is_running();
    if was_running {
      debug!("Fade cancelled");
    }
    self.fade = FadePhase::NotRunning;
    was_running
  }

  fn begin_stroke<L, B>(&mut self, position: Vec2, surfaces: &mut Surfaces<'_, L, B>)
  where
    L: LineSink + ?Sized,
    B: BoundarySink + ?Sized,
  {
    self.reset(surfaces);
    self.path.start(position);
    let points = self.path.points();
    surfaces.with_line(|line| line.set_points(points));
    self.state = DrawState::Dragging;
    debug!("Stroke started at {position}");
  }

  fn extend_stroke<L, B>(&mut self, position: Vec2, surfaces: &mut Surfaces<'_, L, B>)
  where
    L: LineSink + ?Sized,
    B: BoundarySink + ?Sized,
  {
    self.path.extend(position);
    let points = self.path.points();
    surfaces.with_line(|line| line.set_points(points));
  }

  /// Returns true if a fade was started.
  fn finish_stroke<L, B>(&mut self, surfaces: &mut Surfaces<'_, L, B>) -> bool
  where
    L: LineSink + ?Sized,
    B: BoundarySink + ?Sized,
  {
    if self.path.has_span() {
      let points = self.path.points();
      surfaces.with_boundary(|boundary| {
        boundary.set_enabled(true);
        boundary.set_points(points);
      });
    }
    debug!("Stroke finished with {} point(s)", self.path.len());

    if !self.fade_out {
      self.state = DrawState::Idle;
      return false;
    }

    surfaces.with_line(|line| line.set_tint(LINE_BASE_TINT));
    self.fade = FadePhase::begin(self.fade_out_duration);
    self.state = DrawState::FadingOut;
    debug!(
      "Fade started: hold {FADE_HOLD_SECS}s, decay {}s",
      self.fade_out_duration
    );
    true
  }

  /// Returns true if the fade completed this tick.
  fn step_fade<L, B>(&mut self, dt: f32, surfaces: &mut Surfaces<'_, L, B>) -> bool
  where
    L: LineSink + ?Sized,
    B: BoundarySink + ?Sized,
  {
    match self.fade.step(dt) {
      FadeStep::Idle | FadeStep::Hold => false,
      FadeStep::Opacity(alpha) => {
        surfaces.with_line(|line| line.set_tint(LINE_BASE_TINT.with_alpha(alpha)));
        false
      }
      FadeStep::Complete => {
        self.reset(surfaces);
        self.state = DrawState::Idle;
        debug!("Fade complete");
        if let Some(listener) = self.listener.as_mut() {
          listener();
        }
        true
      }
    }
  }
}
