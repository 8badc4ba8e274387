//! Avatar-Steuerung: Anlegen, Auswahl, Pfeiltasten und Sichtbarkeit.

use super::events::Key;
use super::listeners::ListenerOwner;
use super::visibility::hide_non_visible_lights;
use super::AppState;
use crate::core::point::create_point_sized;
use crate::core::{ObjectId, Scene, PLAYER_NAME};
use glam::Vec3;

/// Größe des Avatar-Markers (Breite, Höhe, Tiefe).
pub const AVATAR_SIZE: Vec3 = Vec3::new(40.0, 20.0, 40.0);

/// Der aktuell ausgewählte Avatar.
pub fn active_player(scene: &Scene) -> Option<ObjectId> {
    scene
        .objects_named(PLAYER_NAME)
        .into_iter()
        .find(|id| scene.get(*id).is_some_and(|p| p.user_data.selected))
}

/// Wählt `player` aus und alle anderen Avatare ab.
pub fn select_player(scene: &mut Scene, player: ObjectId) {
    for id in scene.objects_named(PLAYER_NAME) {
        if let Some(object) = scene.get_mut(id) {
            object.user_data.selected = id == player;
        }
    }
}

/// Legt einen ausgewählten Avatar an und meldet seinen Drag-Listener an.
pub fn init_character(state: &mut AppState, start: Option<Vec3>) -> ObjectId {
    let start = start.unwrap_or(state.options.avatar_start);
    let player = create_point_sized(
        &mut state.scene,
        start,
        AVATAR_SIZE,
        Some(state.options.avatar_color),
        Some(PLAYER_NAME),
    );
    select_player(&mut state.scene, player);
    state.listeners.register(ListenerOwner::Avatar(player));
    log::info!("Avatar {} bei {:?} angelegt", player, start);

    refresh_visibility(state);
    player
}

/// Richtung einer Pfeiltaste (Pfeil hoch = −Z).
pub fn key_direction(key: Key) -> Option<Vec3> {
    match key {
        Key::ArrowUp => Some(Vec3::NEG_Z),
        Key::ArrowDown => Some(Vec3::Z),
        Key::ArrowLeft => Some(Vec3::NEG_X),
        Key::ArrowRight => Some(Vec3::X),
        Key::Escape => None,
    }
}

/// Verschiebt den aktiven Avatar und prüft die Sichtbarkeit neu.
/// `false` ohne aktiven Avatar.
pub fn move_active_player(state: &mut AppState, delta: Vec3) -> bool {
    let Some(player) = active_player(&state.scene) else {
        log::warn!("Kein aktiver Avatar für Tastatur-Navigation");
        return false;
    };
    if let Some(object) = state.scene.get_mut(player) {
        object.position += delta;
    }
    refresh_visibility(state);
    true
}

/// Prüft die Lichtsichtbarkeit aus Sicht des aktiven Avatars.
pub fn refresh_visibility(state: &mut AppState) {
    let Some(position) = active_player(&state.scene).and_then(|p| state.scene.world_position(p))
    else {
        return;
    };
    state.visibility =
        hide_non_visible_lights(&mut state.scene, position, state.options.view_distance);
}
