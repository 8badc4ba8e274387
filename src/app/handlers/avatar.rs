//! Handler für Avatare.

use crate::app::avatar;
use crate::app::AppState;
use glam::Vec3;

/// Legt einen Avatar an.
pub fn init_character(state: &mut AppState, start: Option<Vec3>) {
    avatar::init_character(state, start);
}

/// Verschiebt den aktiven Avatar.
pub fn move_active_player(state: &mut AppState, delta: Vec3) {
    avatar::move_active_player(state, delta);
}
