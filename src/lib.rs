//! Freehand 2D line drawing for Bevy.
//!
//! Drag the pointer to draw a line from the press point to the current
//! pointer position. On release the line becomes a Rapier edge collider and,
//! when enabled, fades out after a short hold:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use line_draw2d::prelude::*;
//!
//! fn spawn(mut commands: Commands) {
//!   let mut drawer = LineDrawer::new(true, 1.0);
//!   drawer.set_fade_out_listener(Some(Box::new(|| info!("gone"))));
//!   commands.spawn(line_drawer(drawer));
//! }
//! ```
//!
//! The core state machine in [`drawer`] has no Bevy scheduling of its own
//! and can be driven directly with [`drawer::LineDrawer::advance`].

pub mod boundary;
pub mod config;
pub mod drawer;
pub mod input;
pub mod line;
pub mod playground;
pub mod plugin;
pub mod pointer;
pub mod scene;

pub mod prelude {
  pub use crate::boundary::EdgeBoundary;
  pub use crate::drawer::{
    BoundarySink, DrawState, FadeOutListener, LineDrawer, LineSink, PointerSample, Surfaces,
  };
  pub use crate::line::{LineStrip, LineStyle};
  pub use crate::plugin::{
    ClearLines, LineDrawPlugin, LineDrawSet, LineFadedOut, StrokeFinished, line_drawer,
  };
  pub use crate::pointer::{DrawCamera, PointerBinding};
}
