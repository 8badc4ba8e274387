//! Handler für Formen: Anlegen, Kontrollpunkte, Entfernen und Tension.

use crate::app::avatar::refresh_visibility;
use crate::app::listeners::ListenerOwner;
use crate::app::state::ShapeBinding;
use crate::app::AppState;
use crate::core::ObjectId;
use crate::shape::{ShapeConfig, ShapeError, ShapeId};
use anyhow::Context;
use glam::Vec3;

/// Legt eine Form an und meldet Listener und Tension-Beobachter an.
pub fn create(state: &mut AppState, config: ShapeConfig, points: &[Vec3]) -> anyhow::Result<ShapeId> {
    let id = state
        .shapes
        .create(
            &mut state.scene,
            config,
            points,
            state.tension.value(),
            &state.options,
        )
        .context("Form konnte nicht angelegt werden")?;

    let subscription = state.tension.subscribe(id);
    let listener = state.listeners.register(ListenerOwner::Shape(id));
    state.bindings.insert(
        id,
        ShapeBinding {
            subscription,
            listener,
        },
    );

    refresh_visibility(state);
    Ok(id)
}

/// Fügt einer Form einen Kontrollpunkt hinzu.
pub fn add_control_point(state: &mut AppState, shape: ShapeId, position: Vec3) -> anyhow::Result<()> {
    let tension = state.tension.value();
    let target = state
        .shapes
        .get_mut(shape)
        .ok_or(ShapeError::UnknownShape(shape.0))?;
    target.add_control_point(&mut state.scene, position, tension);
    refresh_visibility(state);
    Ok(())
}

/// Entfernt einen Kontrollpunkt aus der Form, zu der er gehört.
pub fn remove_control_point(state: &mut AppState, point: ObjectId) -> anyhow::Result<()> {
    let shape_id = state
        .shapes
        .shape_of_handle(point)
        .ok_or(ShapeError::UnknownPoint(point))?;
    let tension = state.tension.value();
    let shape = state
        .shapes
        .get_mut(shape_id)
        .ok_or(ShapeError::UnknownShape(shape_id.0))?;
    shape.remove_control_point(&mut state.scene, point, tension)?;
    refresh_visibility(state);
    Ok(())
}

/// Entfernt eine Form: Listener und Tension-Beobachter abmelden, Objekte freigeben.
pub fn remove(state: &mut AppState, shape: ShapeId) -> anyhow::Result<()> {
    let removed = state
        .shapes
        .remove(shape)
        .ok_or(ShapeError::UnknownShape(shape.0))?;

    if let Some(binding) = state.bindings.remove(&shape) {
        state.tension.unsubscribe(binding.subscription);
        let was_dragging = state
            .listeners
            .active_drag()
            .is_some_and(|l| l.id == binding.listener);
        state.listeners.unregister(binding.listener);
        if was_dragging {
            state.view.controls.enable_rotate = true;
            state.scene.shadow.freeze();
        }
    }
    if state.ui.context_menu.is_some_and(|m| m.shape == shape) {
        state.ui.context_menu = None;
    }

    removed.dispose(&mut state.scene);
    refresh_visibility(state);
    Ok(())
}

/// Setzt die Tension und baut alle Beobachter synchron neu.
pub fn set_tension(state: &mut AppState, value: f32) {
    let watchers = state.tension.set(value);
    if watchers.is_empty() {
        return;
    }
    let tension = state.tension.value();
    state.shapes.rebuild(&mut state.scene, &watchers, tension);
    log::debug!("Tension {:.2}: {} Formen neu gebaut", tension, watchers.len());
}
