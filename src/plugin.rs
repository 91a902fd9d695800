//! Bevy wiring for [`LineDrawer`]: pointer sampling, per-frame advance,
//! line rendering and collider sync.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::boundary::{EdgeBoundary, sync_edge_colliders};
use crate::drawer::{LineDrawer, PointerSample, Surfaces};
use crate::line::{LineStrip, LineStripGizmos, LineStyle, apply_line_style, draw_line_strips};
use crate::pointer::{PointerBinding, sample_pointer};

/// Sent when a stroke is released, with the points it ended with.
#[derive(Message, Debug, Clone)]
pub struct StrokeFinished {
  pub entity: Entity,
  pub points: Vec<Vec2>,
}

/// Sent after a drawer finished fading out and reset itself.
#[derive(Message, Debug, Clone, Copy)]
pub struct LineFadedOut {
  pub entity: Entity,
}

/// Request to stop any fade and wipe drawers. `None` targets all drawers.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ClearLines {
  pub entity: Option<Entity>,
}

/// Systems that read the pointer and drive drawers, in order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineDrawSet;

pub struct LineDrawPlugin;

impl Plugin for LineDrawPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<PointerSample>()
      .init_resource::<PointerBinding>()
      .init_resource::<LineStyle>()
      .init_gizmo_group::<LineStripGizmos>()
      .add_message::<StrokeFinished>()
      .add_message::<LineFadedOut>()
      .add_message::<ClearLines>()
      .add_systems(
        Update,
        (
          sample_pointer,
          handle_clear_requests,
          advance_line_drawers,
          sync_edge_colliders,
        )
          .chain()
          .in_set(LineDrawSet),
      )
      .add_systems(
        Update,
        (apply_line_style, draw_line_strips)
          .chain()
          .after(LineDrawSet),
      );
  }
}

/// Components for a drawer entity. Points are world-space, so the entity
/// stays at the origin.
pub fn line_drawer(drawer: LineDrawer) -> impl Bundle {
  (
    Name::new("LineDrawer"),
    drawer,
    LineStrip::default(),
    EdgeBoundary::default(),
    RigidBody::Fixed,
    Transform::default(),
  )
}

/// Advances every drawer by one frame.
pub fn advance_line_drawers(
  time: Res<Time>,
  pointer: Res<PointerSample>,
  mut drawers: Query<(
    Entity,
    &mut LineDrawer,
    Option<&mut LineStrip>,
    Option<&mut EdgeBoundary>,
  )>,
  mut finished: MessageWriter<StrokeFinished>,
  mut faded: MessageWriter<LineFadedOut>,
) {
  let dt = time.delta_secs();

  for (entity, mut drawer, mut line, mut boundary) in &mut drawers {
    let mut surfaces = Surfaces::new(line.as_mut(), boundary.as_mut());
    let report = drawer.advance(&pointer, dt, &mut surfaces);

    if report.stroke_finished {
      finished.write(StrokeFinished {
        entity,
        points: drawer.points().to_vec(),
      });
    }
    if report.faded_out {
      faded.write(LineFadedOut { entity });
    }
  }
}

pub fn handle_clear_requests(
  mut requests: MessageReader<ClearLines>,
  mut drawers: Query<(
    Entity,
    &mut LineDrawer,
    Option<&mut LineStrip>,
    Option<&mut EdgeBoundary>,
  )>,
) {
  for request in requests.read() {
    for (entity, mut drawer, mut line, mut boundary) in &mut drawers {
      if request.entity.is_some_and(|target| target != entity) {
        continue;
      }
      let mut surfaces = Surfaces::new(line.as_mut(), boundary.as_mut());
      drawer.clear(&mut surfaces);
      info!("Cleared line drawer {entity}");
    }
  }
}
