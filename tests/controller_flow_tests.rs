//! Integrationstests für den Intent → Command → Handler-Fluss.

use adjustable_shape_editor::app::{AppEvent, DragTarget};
use adjustable_shape_editor::core::{Geometry, LIGHT_NAME};
use adjustable_shape_editor::{
    AppController, AppIntent, AppState, EventOutcome, Key, PointerButton, ShapeId, ShapeKind,
};
use approx::assert_relative_eq;
use glam::{Vec2, Vec3};

/// Oberkante eines Punkt-Markers über seiner Position (Box 50 hoch, um 0.75 angehoben).
const MARKER_TOP: f32 = 25.75;

fn run(controller: &mut AppController, state: &mut AppState, intent: AppIntent) -> EventOutcome {
    controller
        .handle_intent(state, intent)
        .expect("Intent ohne Fehler verarbeitet")
}

fn client_of(state: &AppState, world: Vec3) -> Vec2 {
    state
        .view
        .camera
        .project(world, state.view.viewport())
        .expect("Punkt liegt vor der Kamera")
}

fn square_at_origin() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(100.0, 0.0, 0.0),
        Vec3::new(100.0, 0.0, 100.0),
        Vec3::new(0.0, 0.0, 100.0),
    ]
}

fn add_shape(
    controller: &mut AppController,
    state: &mut AppState,
    kind: ShapeKind,
    points: Vec<Vec3>,
) -> ShapeId {
    let before = state.shapes.ids();
    run(controller, state, AppIntent::AddShapeRequested { kind, points });
    state
        .shapes
        .ids()
        .into_iter()
        .find(|id| !before.contains(id))
        .expect("neue Form angelegt")
}

fn setup_square() -> (AppController, AppState, ShapeId) {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let shape = add_shape(
        &mut controller,
        &mut state,
        ShapeKind::Filled,
        square_at_origin(),
    );
    (controller, state, shape)
}

#[test]
fn test_drag_control_point_follows_pointer_and_snaps() {
    let (mut controller, mut state, shape) = setup_square();
    let point = state.shapes.get(shape).expect("Form").control_points()[0];

    let grab = client_of(&state, Vec3::new(0.0, MARKER_TOP, 0.0));
    let outcome = run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client: grab,
        },
    );
    assert_eq!(outcome, EventOutcome::Consumed);
    assert!(state.is_dragging());
    assert!(!state.view.controls.enable_rotate);
    assert!(state.scene.shadow.auto_update);

    let target = client_of(&state, Vec3::new(30.0, MARKER_TOP, 40.0));
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerMove { client: target },
    );
    let dragged = state.scene.position(point).expect("Position");
    assert_relative_eq!(dragged.x, 30.0, epsilon = 0.05);
    assert_relative_eq!(dragged.y, 0.0, epsilon = 0.05);
    assert_relative_eq!(dragged.z, 40.0, epsilon = 0.05);

    run(
        &mut controller,
        &mut state,
        AppIntent::PointerUp { client: target },
    );
    let snapped = state.scene.position(point).expect("Position");
    assert_relative_eq!(snapped.x, 25.0, epsilon = 1e-3);
    assert_relative_eq!(snapped.z, 25.0, epsilon = 1e-3);

    assert!(!state.is_dragging());
    assert!(state.view.controls.enable_rotate);
    assert!(!state.scene.shadow.auto_update);
    let events = state.drain_events();
    assert_eq!(
        events,
        vec![AppEvent::DragCompleted {
            target: DragTarget::ControlPoint(point)
        }]
    );
}

#[test]
fn test_center_drag_translates_shape_rigidly() {
    let (mut controller, mut state, shape) = setup_square();
    let center = state.shapes.get(shape).expect("Form").center_point();
    let before = state
        .shapes
        .get(shape)
        .expect("Form")
        .control_point_positions(&state.scene);

    let grab = client_of(&state, Vec3::new(50.0, MARKER_TOP, 50.0));
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client: grab,
        },
    );
    let target = client_of(&state, Vec3::new(90.0, MARKER_TOP, 30.0));
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerMove { client: target },
    );
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerUp { client: target },
    );

    let after = state
        .shapes
        .get(shape)
        .expect("Form")
        .control_point_positions(&state.scene);
    for (old, new) in before.iter().zip(&after) {
        assert_relative_eq!(new.x, old.x + 40.0, epsilon = 0.05);
        assert_relative_eq!(new.y, state.options.drag_height, epsilon = 1e-4);
        assert_relative_eq!(new.z, old.z - 20.0, epsilon = 0.05);
    }
    let center_position = state.scene.position(center).expect("Mittelpunkt");
    assert_relative_eq!(center_position.x, 90.0, epsilon = 0.05);
    assert_relative_eq!(center_position.z, 30.0, epsilon = 0.05);
}

#[test]
fn test_pointer_down_on_empty_space_is_ignored() {
    let (mut controller, mut state, _) = setup_square();
    let outcome = run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client: Vec2::new(5.0, 5.0),
        },
    );
    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(!state.is_dragging());
    assert!(state.view.controls.enable_rotate);
}

#[test]
fn test_right_click_opens_context_menu_and_removes_point() {
    let (mut controller, mut state, shape) = setup_square();
    let point = state.shapes.get(shape).expect("Form").control_points()[0];

    let client = client_of(&state, Vec3::new(0.0, MARKER_TOP, 0.0));
    let outcome = run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Secondary,
            client,
        },
    );
    assert_eq!(outcome, EventOutcome::PreventDefault);

    let menu = state.ui.context_menu.expect("Kontextmenü offen");
    assert_eq!(menu.target, point);
    assert_eq!(menu.shape, shape);
    assert!(!menu.is_center);
    assert!(matches!(
        state.drain_events().as_slice(),
        [AppEvent::ContextMenuRequested { target, .. }] if *target == point
    ));

    run(
        &mut controller,
        &mut state,
        AppIntent::RemoveControlPointRequested { point },
    );
    assert!(state.ui.context_menu.is_none());
    assert!(!state.scene.contains(point));
    assert_eq!(
        state.shapes.get(shape).expect("Form").control_points().len(),
        3
    );
}

#[test]
fn test_right_click_on_empty_space_still_prevents_default() {
    let (mut controller, mut state, _) = setup_square();
    let outcome = run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Secondary,
            client: Vec2::new(5.0, 5.0),
        },
    );
    assert_eq!(outcome, EventOutcome::PreventDefault);
    assert!(state.ui.context_menu.is_none());
    assert!(state.drain_events().is_empty());
}

#[test]
fn test_escape_closes_context_menu() {
    let (mut controller, mut state, _) = setup_square();
    let client = client_of(&state, Vec3::new(50.0, MARKER_TOP, 50.0));
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Secondary,
            client,
        },
    );
    assert!(state.ui.context_menu.is_some_and(|m| m.is_center));

    run(
        &mut controller,
        &mut state,
        AppIntent::KeyPressed { key: Key::Escape },
    );
    assert!(state.ui.context_menu.is_none());
}

fn light_behind_wall() -> (AppController, AppState, ShapeId) {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(
        &mut controller,
        &mut state,
        AppIntent::AddLightRequested {
            position: Vec3::new(25.0, 10.0, 225.0),
        },
    );
    let wall = add_shape(
        &mut controller,
        &mut state,
        ShapeKind::Wall,
        vec![Vec3::new(-100.0, 0.0, 125.0), Vec3::new(150.0, 0.0, 125.0)],
    );
    run(
        &mut controller,
        &mut state,
        AppIntent::AddCharacterRequested { start: None },
    );
    (controller, state, wall)
}

#[test]
fn test_wall_hides_light_until_removed() {
    let (mut controller, mut state, wall) = light_behind_wall();
    let light = state.scene.object_named(LIGHT_NAME).expect("Licht");

    assert_eq!(state.visibility.hidden, vec![light]);
    assert!(state.scene.get(light).is_some_and(|l| !l.visible));

    run(
        &mut controller,
        &mut state,
        AppIntent::RemoveShapeRequested { shape: wall },
    );
    assert_eq!(state.visibility.visible, vec![light]);
    assert!(state.scene.get(light).is_some_and(|l| l.visible));
}

#[test]
fn test_walking_around_wall_reveals_light() {
    let (mut controller, mut state, _) = light_behind_wall();
    let light = state.scene.object_named(LIGHT_NAME).expect("Licht");

    for _ in 0..12 {
        run(
            &mut controller,
            &mut state,
            AppIntent::KeyPressed {
                key: Key::ArrowRight,
            },
        );
    }
    assert!(state.visibility.is_visible(light));
}

#[test]
fn test_tension_change_rebuilds_all_watchers() {
    let (mut controller, mut state, first) = setup_square();
    let offset: Vec<Vec3> = square_at_origin()
        .into_iter()
        .map(|p| p + Vec3::new(300.0, 0.0, 0.0))
        .collect();
    let second = add_shape(&mut controller, &mut state, ShapeKind::Filled, offset);
    assert_eq!(state.tension.watcher_count(), 2);

    let line_of = |state: &AppState, shape: ShapeId| {
        let line = state.shapes.get(shape).expect("Form").curve_line();
        state.scene.geometry_of(line).cloned()
    };
    let before = [line_of(&state, first), line_of(&state, second)];

    run(
        &mut controller,
        &mut state,
        AppIntent::TensionChanged { value: 0.9 },
    );
    assert_relative_eq!(state.tension.value(), 0.9);
    assert_ne!(line_of(&state, first), before[0]);
    assert_ne!(line_of(&state, second), before[1]);
}

#[test]
fn test_remove_shape_tears_down_listener_and_watcher() {
    let (mut controller, mut state, shape) = setup_square();
    assert_eq!(state.listeners.len(), 1);
    assert_eq!(state.tension.watcher_count(), 1);

    run(
        &mut controller,
        &mut state,
        AppIntent::RemoveShapeRequested { shape },
    );
    assert_eq!(state.shape_count(), 0);
    assert!(state.listeners.is_empty());
    assert_eq!(state.tension.watcher_count(), 0);
    assert!(state.bindings.is_empty());
    assert_eq!(state.scene.geometries.live_count(), 0);

    // Weder Tension noch Pointer erreichen die entfernte Form
    run(
        &mut controller,
        &mut state,
        AppIntent::TensionChanged { value: 0.1 },
    );
    let client = client_of(&state, Vec3::new(0.0, MARKER_TOP, 0.0));
    let outcome = run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client,
        },
    );
    assert_eq!(outcome, EventOutcome::Ignored);
}

#[test]
fn test_long_drag_does_not_leak_geometry() {
    let (mut controller, mut state, _) = setup_square();
    let grab = client_of(&state, Vec3::new(0.0, MARKER_TOP, 0.0));
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client: grab,
        },
    );
    let live = state.scene.geometries.live_count();
    let disposed = state.scene.geometries.disposed_count();

    for step in 0..100 {
        let world = Vec3::new(step as f32, MARKER_TOP, -(step as f32) * 0.5);
        let client = client_of(&state, world);
        run(&mut controller, &mut state, AppIntent::PointerMove { client });
    }

    assert_eq!(state.scene.geometries.live_count(), live);
    assert!(state.scene.geometries.disposed_count() >= disposed + 200);
}

#[test]
fn test_single_point_shape_has_empty_geometry_and_stays_draggable() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let shape = add_shape(
        &mut controller,
        &mut state,
        ShapeKind::Filled,
        vec![Vec3::ZERO],
    );
    let mesh = state.shapes.get(shape).expect("Form").mesh();
    assert!(state.scene.geometry_of(mesh).is_some_and(Geometry::is_empty));

    let client = client_of(&state, Vec3::new(0.0, MARKER_TOP, 0.0));
    let outcome = run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client,
        },
    );
    assert_eq!(outcome, EventOutcome::Consumed);
}

#[test]
fn test_avatar_drag_snaps_and_selects() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(
        &mut controller,
        &mut state,
        AppIntent::AddCharacterRequested { start: None },
    );
    let player = adjustable_shape_editor::app::active_player(&state.scene).expect("Avatar");
    // Avatar-Box ist 20 hoch, Oberkante bei 10.75 über der Position
    let top = Vec3::new(25.0, 10.0 + 10.75, 25.0);

    let client = client_of(&state, top);
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client,
        },
    );
    let client = client_of(&state, top + Vec3::new(60.0, 0.0, 10.0));
    run(&mut controller, &mut state, AppIntent::PointerMove { client });
    run(&mut controller, &mut state, AppIntent::PointerUp { client });

    let position = state.scene.position(player).expect("Position");
    assert_relative_eq!(position.x, 75.0, epsilon = 1e-3);
    assert_relative_eq!(position.y, 10.0, epsilon = 0.05);
    assert_relative_eq!(position.z, 25.0, epsilon = 1e-3);
}

#[test]
fn test_center_drag_rebuilds_wall_curve_and_mesh() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let wall = add_shape(
        &mut controller,
        &mut state,
        ShapeKind::Wall,
        vec![
            Vec3::new(-100.0, 0.0, -150.0),
            Vec3::new(0.0, 0.0, -100.0),
            Vec3::new(100.0, 0.0, -150.0),
        ],
    );
    let mesh = state.shapes.get(wall).expect("Wand").mesh();
    let mesh_bounds = |state: &AppState| {
        state
            .scene
            .geometry_of(mesh)
            .and_then(Geometry::as_mesh)
            .and_then(|m| m.bounds())
            .expect("Wand-Mesh")
    };
    let before = mesh_bounds(&state);

    let grab = client_of(&state, Vec3::new(0.0, MARKER_TOP, -400.0 / 3.0));
    let outcome = run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client: grab,
        },
    );
    assert_eq!(outcome, EventOutcome::Consumed);
    let target = client_of(&state, Vec3::new(40.0, MARKER_TOP, 20.0 - 400.0 / 3.0));
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerMove { client: target },
    );
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerUp { client: target },
    );

    let shape = state.shapes.get(wall).expect("Wand");
    let positions = shape.control_point_positions(&state.scene);
    assert_relative_eq!(positions[0].x, -60.0, epsilon = 0.05);
    assert_relative_eq!(positions[0].z, -130.0, epsilon = 0.05);
    assert!(positions
        .iter()
        .all(|p| (p.y - state.options.drag_height).abs() < 1e-4));

    // Kurve läuft weiter Endpunkt → Mitte → Endpunkt
    let curve = shape.curve(&state.scene).expect("Kurve");
    let first = curve.points[0];
    assert_relative_eq!(first.x, positions[0].x, epsilon = 1e-3);
    assert_relative_eq!(first.z, positions[0].z, epsilon = 1e-3);
    let middle = curve.points[curve.points.len() / 2];
    assert!(Vec2::new(middle.x - positions[1].x, middle.z - positions[1].z).length() < 5.0);

    let after = mesh_bounds(&state);
    assert_relative_eq!(after.min.x, before.min.x + 40.0, epsilon = 0.1);
    assert_relative_eq!(after.max.x, before.max.x + 40.0, epsilon = 0.1);
    assert_relative_eq!(after.min.z, before.min.z + 20.0, epsilon = 0.1);
    assert_relative_eq!(after.max.z, before.max.z + 20.0, epsilon = 0.1);
}

#[test]
fn test_nearest_handle_wins_across_shapes() {
    let (mut controller, mut state, square) = setup_square();
    // Später angelegt, liegt aber auf demselben Strahl näher an der Kamera
    let wall = add_shape(
        &mut controller,
        &mut state,
        ShapeKind::Wall,
        vec![Vec3::new(0.0, 0.0, 20.0), Vec3::new(100.0, 0.0, 20.0)],
    );
    let near_point = state.shapes.get(wall).expect("Wand").control_points()[0];
    let far_point = state.shapes.get(square).expect("Form").control_points()[0];

    let client = client_of(&state, Vec3::new(0.0, MARKER_TOP, 20.0));
    let ray = state
        .view
        .camera
        .ray_from_client(client, state.view.viewport());
    let hits = state
        .scene
        .raycast(&ray, 0.0, f32::INFINITY, &[far_point, near_point]);
    assert_eq!(
        hits.iter().map(|h| h.object).collect::<Vec<_>>(),
        vec![near_point, far_point]
    );

    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Primary,
            client,
        },
    );
    run(&mut controller, &mut state, AppIntent::PointerUp { client });
    assert_eq!(
        state.drain_events(),
        vec![AppEvent::DragCompleted {
            target: DragTarget::ControlPoint(near_point)
        }]
    );

    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDown {
            button: PointerButton::Secondary,
            client,
        },
    );
    let menu = state.ui.context_menu.expect("Kontextmenü offen");
    assert_eq!(menu.target, near_point);
    assert_eq!(menu.shape, wall);
}
