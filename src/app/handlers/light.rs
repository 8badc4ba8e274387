//! Handler für Lichtquellen.

use crate::app::avatar::refresh_visibility;
use crate::app::AppState;
use crate::core::{add_light_source, remove_light_source, ObjectId};
use glam::Vec3;

/// Legt eine Lichtquelle an und prüft die Sichtbarkeit.
pub fn add(state: &mut AppState, position: Vec3) {
    add_light_source(&mut state.scene, position, state.options.light_hit_radius);
    refresh_visibility(state);
}

/// Entfernt eine Lichtquelle samt Stellvertreter.
pub fn remove(state: &mut AppState, light: ObjectId) -> anyhow::Result<()> {
    if !remove_light_source(&mut state.scene, light) {
        anyhow::bail!("Unbekannte Lichtquelle {}", light);
    }
    refresh_visibility(state);
    Ok(())
}
