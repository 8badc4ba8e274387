//! Status-Bar am unteren Bildschirmrand.

use crate::app::{active_player, AppState};

/// Rendert die Status-Bar
pub fn render_status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!(
                "Formen: {} | Objekte: {} | Geometrien: {}",
                state.shape_count(),
                state.scene.len(),
                state.scene.geometries.live_count()
            ));

            ui.separator();

            ui.label(format!(
                "Lichter: {} sichtbar, {} verdeckt",
                state.visibility.visible.len(),
                state.visibility.hidden.len()
            ));

            ui.separator();

            match active_player(&state.scene).and_then(|p| state.scene.position(p)) {
                Some(pos) => ui.label(format!("Avatar: ({:.0}, {:.0}, {:.0})", pos.x, pos.y, pos.z)),
                None => ui.label("Kein Avatar"),
            };

            ui.separator();

            ui.label(format!("Tension: {:.2}", state.tension.value()));

            if let Some(message) = &state.ui.status_message {
                ui.separator();
                ui.label(message);
            }
        });
    });
}
