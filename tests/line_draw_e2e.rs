//! E2E tests for the drawer running inside a headless Bevy app.
//!
//! Most tests write pointer samples straight into the `PointerSample`
//! resource; the last few drive `sample_pointer` from `ButtonInput`. Time
//! advances in fixed 125ms steps.
//!
//! Run: cargo test --test line_draw_e2e

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;
use line_draw2d::config::{AppConfig, ConfigLoaded, ConfigOverrides, ConfigPlugin};
use line_draw2d::plugin::{advance_line_drawers, handle_clear_requests};
use line_draw2d::pointer::sample_pointer;
use line_draw2d::prelude::*;

#[derive(Resource, Default)]
struct Received {
  finished: Vec<Vec<Vec2>>,
  faded: Vec<Entity>,
}

fn record_messages(
  mut finished: MessageReader<StrokeFinished>,
  mut faded: MessageReader<LineFadedOut>,
  mut received: ResMut<Received>,
) {
  received
    .finished
    .extend(finished.read().map(|msg| msg.points.clone()));
  received.faded.extend(faded.read().map(|msg| msg.entity));
}

fn test_app() -> App {
  let mut app = App::new();

  // Minimal plugins - no window, renderer or physics step needed
  app.add_plugins(MinimalPlugins);
  app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
    125,
  )));

  app
    .init_resource::<PointerSample>()
    .init_resource::<Received>()
    .add_message::<StrokeFinished>()
    .add_message::<LineFadedOut>()
    .add_message::<ClearLines>();

  // Manually add the drawing systems (extracted from LineDrawPlugin)
  app.add_systems(
    Update,
    (
      handle_clear_requests,
      advance_line_drawers,
      line_draw2d::boundary::sync_edge_colliders,
      record_messages,
    )
      .chain(),
  );

  app
}

fn set_pointer(app: &mut App, sample: PointerSample) {
  *app.world_mut().resource_mut::<PointerSample>() = sample;
}

fn tick(app: &mut App, sample: PointerSample) {
  set_pointer(app, sample);
  app.update();
}

fn drag(app: &mut App, from: Vec2, to: Vec2) {
  tick(app, PointerSample::press(from));
  tick(app, PointerSample::hold(from.lerp(to, 0.5)));
  tick(app, PointerSample::hold(to));
  tick(app, PointerSample::release(to));
}

fn idle(app: &mut App, frames: usize) {
  for _ in 0..frames {
    tick(app, PointerSample::idle(Vec2::ZERO));
  }
}

fn counting_listener() -> (Arc<AtomicUsize>, FadeOutListener) {
  let count = Arc::new(AtomicUsize::new(0));
  let captured = count.clone();
  (
    count,
    Box::new(move || {
      captured.fetch_add(1, Ordering::SeqCst);
    }),
  )
}

#[test]
fn released_stroke_becomes_enabled_polyline_collider() {
  let mut app = test_app();
  let drawer = app
    .world_mut()
    .spawn(line_drawer(LineDrawer::new(false, 1.0)))
    .id();

  let start = Vec2::new(-40.0, 10.0);
  let end = Vec2::new(60.0, -20.0);
  drag(&mut app, start, end);

  let world = app.world();
  let boundary = world.get::<EdgeBoundary>(drawer).unwrap();
  assert!(boundary.enabled);
  assert_eq!(boundary.points, vec![start, end]);
  assert!(world.get::<Collider>(drawer).is_some(), "Collider should exist");
  assert!(
    world.get::<ColliderDisabled>(drawer).is_none(),
    "Collider should be enabled"
  );

  let strip = world.get::<LineStrip>(drawer).unwrap();
  assert_eq!(strip.points, vec![start, end]);

  let received = world.resource::<Received>();
  assert_eq!(received.finished, vec![vec![start, end]]);
  assert!(received.faded.is_empty());

  // No fade configured: the line stays put.
  idle(&mut app, 40);
  let boundary = app.world().get::<EdgeBoundary>(drawer).unwrap();
  assert_eq!(boundary.points, vec![start, end]);
  assert!(app.world().get::<Collider>(drawer).is_some());
}

#[test]
fn fade_resets_line_and_notifies_once() {
  let mut app = test_app();
  let (count, listener) = counting_listener();
  let mut line = LineDrawer::new(true, 0.25);
  line.set_fade_out_listener(Some(listener));
  let drawer = app.world_mut().spawn(line_drawer(line)).id();

  drag(&mut app, Vec2::ZERO, Vec2::new(50.0, 50.0));
  assert!(app.world().get::<LineDrawer>(drawer).unwrap().is_fading());

  idle(&mut app, 30);

  let world = app.world();
  assert_eq!(count.load(Ordering::SeqCst), 1, "Listener should fire once");
  assert_eq!(world.resource::<Received>().faded, vec![drawer]);

  let strip = world.get::<LineStrip>(drawer).unwrap();
  assert!(strip.points.is_empty());
  assert_eq!(strip.tint, Color::WHITE);

  let boundary = world.get::<EdgeBoundary>(drawer).unwrap();
  assert!(!boundary.enabled);
  assert!(boundary.points.is_empty());
  assert!(world.get::<Collider>(drawer).is_none(), "Collider should be removed");
  assert!(world.get::<ColliderDisabled>(drawer).is_some());
}

#[test]
fn new_stroke_mid_fade_suppresses_notification() {
  let mut app = test_app();
  let (count, listener) = counting_listener();
  let mut line = LineDrawer::new(true, 1.0);
  line.set_fade_out_listener(Some(listener));
  let drawer = app.world_mut().spawn(line_drawer(line)).id();

  drag(&mut app, Vec2::ZERO, Vec2::new(10.0, 0.0));
  idle(&mut app, 6);
  let tint = app.world().get::<LineStrip>(drawer).unwrap().tint;
  assert!(tint.alpha() < 1.0, "Fade should be decaying, alpha={}", tint.alpha());

  tick(&mut app, PointerSample::press(Vec2::new(5.0, 5.0)));
  for _ in 0..40 {
    tick(&mut app, PointerSample::hold(Vec2::new(5.0, 9.0)));
  }

  let world = app.world();
  assert_eq!(count.load(Ordering::SeqCst), 0);
  assert!(world.resource::<Received>().faded.is_empty());

  let strip = world.get::<LineStrip>(drawer).unwrap();
  assert_eq!(strip.tint, Color::WHITE);
  assert_eq!(strip.points, vec![Vec2::new(5.0, 5.0), Vec2::new(5.0, 9.0)]);
  assert!(!world.get::<EdgeBoundary>(drawer).unwrap().enabled);
}

#[test]
fn clear_request_wipes_drawn_line() {
  let mut app = test_app();
  let drawer = app
    .world_mut()
    .spawn(line_drawer(LineDrawer::new(false, 1.0)))
    .id();
  drag(&mut app, Vec2::ZERO, Vec2::new(0.0, 30.0));
  assert!(app.world().get::<Collider>(drawer).is_some());

  app
    .world_mut()
    .resource_mut::<Messages<ClearLines>>()
    .write(ClearLines::default());
  idle(&mut app, 1);

  let world = app.world();
  assert!(world.get::<LineStrip>(drawer).unwrap().points.is_empty());
  assert!(world.get::<EdgeBoundary>(drawer).unwrap().points.is_empty());
  assert!(world.get::<Collider>(drawer).is_none());
  assert_eq!(
    world.get::<LineDrawer>(drawer).unwrap().state(),
    DrawState::Idle
  );
}

#[test]
fn drawer_without_primitives_still_tracks_path() {
  let mut app = test_app();
  let drawer = app.world_mut().spawn(LineDrawer::new(false, 1.0)).id();

  drag(&mut app, Vec2::ZERO, Vec2::ONE);

  let line = app.world().get::<LineDrawer>(drawer).unwrap();
  assert_eq!(line.points(), &[Vec2::ZERO, Vec2::ONE]);
  assert_eq!(
    app.world().resource::<Received>().finished,
    vec![vec![Vec2::ZERO, Vec2::ONE]]
  );
}

#[test]
fn config_change_updates_drawer_fade_settings() {
  let mut app = test_app();
  let config = AppConfig::from_toml_str(include_str!("../assets/config/line.config.toml")).unwrap();
  app.add_plugins(ConfigPlugin::new(config.clone()));

  let drawer = app
    .world_mut()
    .spawn(line_drawer(LineDrawer::new(false, 9.0)))
    .id();
  app.update();

  let line = app.world().get::<LineDrawer>(drawer).unwrap();
  assert_eq!(line.fade_out, config.fade.enabled);
  assert_eq!(line.fade_out_duration, config.fade.duration);

  {
    let mut loaded = app.world_mut().resource_mut::<ConfigLoaded>();
    loaded.fade.enabled = false;
    loaded.fade.duration = 3.0;
  }
  app.update();

  let line = app.world().get::<LineDrawer>(drawer).unwrap();
  assert!(!line.fade_out);
  assert_eq!(line.fade_out_duration, 3.0);
  assert_eq!(
    app.world().resource::<LineStyle>().width,
    config.line.width
  );
}

#[derive(Resource, Default)]
struct ConfigChanges(usize);

fn count_config_changes(config: Res<ConfigLoaded>, mut changes: ResMut<ConfigChanges>) {
  if config.is_changed() {
    changes.0 += 1;
  }
}

#[test]
fn fade_toggle_updates_drawers_without_touching_config() {
  let mut app = test_app();
  let config = AppConfig::from_toml_str(include_str!("../assets/config/line.config.toml")).unwrap();
  app
    .add_plugins(ConfigPlugin::new(config.clone()))
    .init_resource::<ConfigChanges>()
    .add_systems(Update, count_config_changes);

  let drawer = app
    .world_mut()
    .spawn(line_drawer(LineDrawer::new(config.fade.enabled, 1.0)))
    .id();
  app.update();
  assert_eq!(app.world().resource::<ConfigChanges>().0, 1);

  let enabled = app
    .world_mut()
    .resource_scope(|world, mut overrides: Mut<ConfigOverrides>| {
      overrides.toggle_fade_out(world.resource::<ConfigLoaded>())
    });
  assert_eq!(enabled, !config.fade.enabled);
  app.update();

  assert_eq!(app.world().get::<LineDrawer>(drawer).unwrap().fade_out, enabled);
  assert_eq!(
    app.world().resource::<ConfigChanges>().0,
    1,
    "Toggling fade must not mark the loaded config changed"
  );
  assert_eq!(
    app.world().resource::<ConfigLoaded>().fade.enabled,
    config.fade.enabled
  );
}

// Pointer sampling: a window with no cursor and no draw camera can't be
// projected, so the last world position must be kept.

fn pointer_app(binding: MouseButton, seed: Vec2) -> App {
  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .init_resource::<ButtonInput<MouseButton>>()
    .insert_resource(PointerBinding(binding))
    .insert_resource(PointerSample::idle(seed))
    .add_systems(Update, sample_pointer);
  app.world_mut().spawn((Window::default(), PrimaryWindow));
  app
}

fn press(app: &mut App, button: MouseButton) {
  let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
  buttons.clear();
  buttons.press(button);
}

fn release(app: &mut App, button: MouseButton) {
  let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
  buttons.clear();
  buttons.release(button);
}

#[test]
fn pointer_keeps_last_position_without_cursor() {
  let seed = Vec2::new(12.0, -7.0);
  let mut app = pointer_app(MouseButton::Left, seed);

  press(&mut app, MouseButton::Left);
  app.update();

  let sample = *app.world().resource::<PointerSample>();
  assert!(sample.pressed && sample.held, "got {sample:?}");
  assert!(!sample.released);
  assert_eq!(sample.position, seed);

  release(&mut app, MouseButton::Left);
  app.update();

  let sample = *app.world().resource::<PointerSample>();
  assert!(sample.released && !sample.held && !sample.pressed, "got {sample:?}");
  assert_eq!(sample.position, seed);
}

#[test]
fn pointer_follows_configured_button() {
  let seed = Vec2::new(3.0, 4.0);
  let mut app = pointer_app(MouseButton::Right, seed);

  press(&mut app, MouseButton::Left);
  app.update();
  let sample = *app.world().resource::<PointerSample>();
  assert!(!sample.pressed && !sample.held, "Left should be ignored, got {sample:?}");

  press(&mut app, MouseButton::Right);
  app.update();
  let sample = *app.world().resource::<PointerSample>();
  assert!(sample.pressed && sample.held, "got {sample:?}");
  assert_eq!(sample.position, seed);
}
