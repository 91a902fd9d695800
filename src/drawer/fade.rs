//! Fade-out timeline: a fixed hold at full opacity, then a linear decay.

/// Seconds a released line stays fully opaque before it starts fading.
pub const FADE_HOLD_SECS: f32 = 0.5;

/// Progress of a running fade.
///
/// The duration is captured when the fade starts, so later changes to the
/// drawer's settings only affect the next fade.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FadePhase {
  #[default]
  NotRunning,
  Holding { remaining: f32, duration: f32 },
  Interpolating { elapsed: f32, duration: f32 },
}

/// What a single fade tick asks the drawer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
  /// Nothing is running.
  Idle,
  /// Still inside the hold window.
  Hold,
  /// Apply this opacity to the line.
  Opacity(f32),
  /// The decay finished on a previous tick; reset and notify.
  Complete,
}

impl FadePhase {
  pub fn begin(duration: f32) -> Self {
    Self::Holding {
      remaining: FADE_HOLD_SECS,
      duration,
    }
  }

  pub fn is_running(&self) -> bool {
    !matches!(self, Self::NotRunning)
  }

  /// Opacity implied by the current phase.
  pub fn opacity(&self) -> f32 {
    match *self {
      Self::NotRunning | Self::Holding { .. } => 1.0,
      Self::Interpolating { elapsed, duration } => opacity_at(elapsed, duration),
    }
  }

  /// Advances the timeline by `dt` seconds.
  ///
  /// Time left over when the hold window closes carries into the decay. The
  /// tick that observes a finished decay reports [`FadeStep::Complete`]
  /// without moving time, so a zero opacity is always applied before the
  /// fade completes.
  pub fn step(&mut self, dt: f32) -> FadeStep {
    match *self {
      Self::NotRunning => FadeStep::Idle,
      Self::Holding {
        remaining,
        duration,
      } => {
        let remaining = remaining - dt;
        if remaining > 0.0 {
          *self = Self::Holding {
            remaining,
            duration,
          };
          return FadeStep::Hold;
        }
        let elapsed = -remaining;
        *self = Self::Interpolating { elapsed, duration };
        FadeStep::Opacity(opacity_at(elapsed, duration))
      }
      Self::Interpolating { elapsed, duration } => {
        if elapsed >= duration || duration <= 0.0 {
          *self = Self::NotRunning;
          return FadeStep::Complete;
        }
        let elapsed = elapsed + dt;
        *self = Self::Interpolating { elapsed, duration };
        FadeStep::Opacity(opacity_at(elapsed, duration))
      }
    }
  }
}

fn opacity_at(elapsed: f32, duration: f32) -> f32 {
  let blend = if duration > 0.0 {
    (elapsed / duration).clamp(0.0, 1.0)
  } else {
    1.0
  };
  1.0 - blend
}
