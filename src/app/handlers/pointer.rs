//! Handler für Pointer-Events: Drag-Start, Drag-Bewegung, Drag-Ende, Kontextmenü.

use crate::app::avatar::{refresh_visibility, select_player};
use crate::app::drag::{DragState, DragTarget};
use crate::app::events::{AppEvent, EventOutcome, PointerButton, ScreenAnchor};
use crate::app::listeners::{ListenerId, ListenerOwner};
use crate::app::state::ContextMenuState;
use crate::app::AppState;
use crate::core::{Ray, RayHit};
use crate::shape::ShapeId;
use crate::shared::options::snap_to_grid;
use glam::Vec2;

/// Kontroll- oder Mittelpunkt einer Form unter dem Strahl (Kontrollpunkte zuerst).
fn pick_shape_handle(state: &AppState, shape: ShapeId, ray: &Ray) -> Option<(DragTarget, RayHit)> {
    let shape = state.shapes.get(shape)?;
    if let Some(hit) = state
        .scene
        .raycast(ray, 0.0, f32::INFINITY, shape.control_points())
        .into_iter()
        .next()
    {
        return Some((DragTarget::ControlPoint(hit.object), hit));
    }
    state
        .scene
        .raycast(ray, 0.0, f32::INFINITY, &[shape.center_point()])
        .into_iter()
        .next()
        .map(|hit| (DragTarget::CenterPoint(hit.object), hit))
}

fn pick(state: &AppState, owner: ListenerOwner, ray: &Ray) -> Option<(DragTarget, RayHit)> {
    match owner {
        ListenerOwner::Shape(shape) => pick_shape_handle(state, shape, ray),
        ListenerOwner::Avatar(player) => state
            .scene
            .raycast(ray, 0.0, f32::INFINITY, &[player])
            .into_iter()
            .next()
            .map(|hit| (DragTarget::Avatar(player), hit)),
    }
}

/// Nächster Treffer über alle Listener; innerhalb einer Form gilt weiter
/// "Kontrollpunkte zuerst".
fn nearest_pick(
    state: &AppState,
    listeners: &[(ListenerId, ListenerOwner)],
    ray: &Ray,
) -> Option<(ListenerId, ListenerOwner, DragTarget, RayHit)> {
    listeners
        .iter()
        .filter_map(|&(id, owner)| pick(state, owner, ray).map(|(target, hit)| (id, owner, target, hit)))
        .min_by(|a, b| a.3.distance.total_cmp(&b.3.distance))
}

/// Verteilt Pointer-Down an den Listener mit dem nächsten Treffer.
pub fn down(state: &mut AppState, button: PointerButton, client: Vec2, ray: &Ray) -> EventOutcome {
    match button {
        PointerButton::Primary => begin_drag(state, ray),
        PointerButton::Secondary => open_context_menu(state, client, ray),
        PointerButton::Middle => EventOutcome::Ignored,
    }
}

fn begin_drag(state: &mut AppState, ray: &Ray) -> EventOutcome {
    if state.is_dragging() {
        return EventOutcome::Consumed;
    }

    let listeners: Vec<_> = state.listeners.iter().map(|l| (l.id, l.owner)).collect();
    let Some((id, _, target, hit)) = nearest_pick(state, &listeners, ray) else {
        return EventOutcome::Ignored;
    };
    let Some(position) = state.scene.position(target.object()) else {
        return EventOutcome::Ignored;
    };
    if let Some(listener) = state.listeners.get_mut(id) {
        listener.drag = DragState::begin(target, hit.point, position);
    }
    state.view.controls.enable_rotate = false;
    state.scene.shadow.begin_live_updates();
    log::debug!("Drag gestartet: {:?} bei {:?}", target, hit.point);
    EventOutcome::Consumed
}

fn open_context_menu(state: &mut AppState, client: Vec2, ray: &Ray) -> EventOutcome {
    let shapes: Vec<_> = state
        .listeners
        .iter()
        .filter(|l| matches!(l.owner, ListenerOwner::Shape(_)))
        .map(|l| (l.id, l.owner))
        .collect();

    if let Some((_, ListenerOwner::Shape(shape), target, _)) = nearest_pick(state, &shapes, ray) {
        let anchor = ScreenAnchor {
            top: client.y,
            left: client.x,
        };
        state.ui.context_menu = Some(ContextMenuState {
            anchor,
            target: target.object(),
            shape,
            is_center: matches!(target, DragTarget::CenterPoint(_)),
        });
        state.events.push(AppEvent::ContextMenuRequested {
            anchor,
            target: target.object(),
            shape,
        });
        log::debug!("Kontextmenü für {:?} (Form {})", target, shape);
    }
    // System-Kontextmenü ist im Viewport immer unterdrückt
    EventOutcome::PreventDefault
}

/// Bewegt das gezogene Objekt; ohne Drag oder Ebenentreffer wird ignoriert.
pub fn move_to(state: &mut AppState, ray: &Ray) -> EventOutcome {
    let Some((owner, drag)) = state.listeners.active_drag().map(|l| (l.owner, l.drag)) else {
        return EventOutcome::Ignored;
    };
    let (Some(target), Some(position)) = (drag.target(), drag.drag_position(ray)) else {
        return EventOutcome::Consumed;
    };

    let tension = state.tension.value();
    match (target, owner) {
        (DragTarget::CenterPoint(center), ListenerOwner::Shape(shape_id)) => {
            let Some(old) = state.scene.position(center) else {
                return EventOutcome::Consumed;
            };
            let delta = position - old;
            state.scene.set_position(center, position);
            if let Some(shape) = state.shapes.get_mut(shape_id) {
                shape.translate(&mut state.scene, delta, state.options.drag_height);
                shape.update_shape(&mut state.scene, tension);
            }
        }
        (DragTarget::ControlPoint(point), ListenerOwner::Shape(shape_id)) => {
            if let Some(shape) = state.shapes.get_mut(shape_id) {
                if let Err(e) = shape.move_control_point(&mut state.scene, point, position) {
                    log::warn!("Drag verworfen: {}", e);
                    return EventOutcome::Consumed;
                }
                shape.update_shape(&mut state.scene, tension);
            }
        }
        (DragTarget::Avatar(player), _) => {
            state.scene.set_position(player, position);
        }
        (target, owner) => {
            log::warn!("Drag-Ziel {:?} passt nicht zu {:?}", target, owner);
        }
    }
    EventOutcome::Consumed
}

/// Beendet einen laufenden Drag: Raster, Rotation, Schatten, Ereignis, Sichtbarkeit.
pub fn up(state: &mut AppState) -> EventOutcome {
    let Some((owner, target)) = state
        .listeners
        .active_drag_mut()
        .and_then(|l| l.drag.finish().map(|t| (l.owner, t)))
    else {
        return EventOutcome::Ignored;
    };

    match (target, owner) {
        (DragTarget::ControlPoint(point), ListenerOwner::Shape(shape_id))
            if state.options.snap_on_release =>
        {
            let grid = state.options.grid_size;
            let tension = state.tension.value();
            if let (Some(position), Some(shape)) =
                (state.scene.position(point), state.shapes.get_mut(shape_id))
            {
                state.scene.set_position(point, snap_to_grid(position, grid));
                shape.update_shape(&mut state.scene, tension);
            }
        }
        (DragTarget::Avatar(player), _) => {
            if let Some(position) = state.scene.position(player) {
                state
                    .scene
                    .set_position(player, snap_to_grid(position, state.options.grid_size));
            }
            select_player(&mut state.scene, player);
        }
        _ => {}
    }

    state.view.controls.enable_rotate = true;
    state.scene.shadow.freeze();
    state.events.push(AppEvent::DragCompleted { target });
    log::debug!("Drag beendet: {:?}", target);

    refresh_visibility(state);
    EventOutcome::Consumed
}
