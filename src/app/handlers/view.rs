//! Handler für Kamera und Viewport.

use crate::app::AppState;
use crate::core::Camera3D;
use glam::Vec2;

/// Aktualisiert die Viewport-Größe im State.
pub fn set_viewport_size(state: &mut AppState, size: [f32; 2]) {
    state.view.viewport_size = size;
}

/// Dreht die Kamera, sofern kein Drag die Rotation sperrt.
pub fn orbit(state: &mut AppState, delta: Vec2) {
    state.view.controls.rotate(&mut state.view.camera, delta);
}

/// Zoomt um einen Faktor.
pub fn zoom(state: &mut AppState, factor: f32) {
    state.view.camera.zoom_by(factor);
}

/// Setzt die Kamera auf den Standardzustand zurück.
pub fn reset_camera(state: &mut AppState) {
    state.view.camera = Camera3D::new();
}
