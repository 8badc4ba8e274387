//! Popup-Kontextmenü für Kontroll- und Mittelpunkte.

use crate::app::{AppIntent, AppState};

/// Zeigt das Kontextmenü am Anker des letzten Rechtsklicks.
///
/// `viewport_origin` ist die linke obere Ecke des Viewports (Client-Ursprung).
pub fn show_context_menu(
    ctx: &egui::Context,
    state: &AppState,
    viewport_origin: egui::Pos2,
) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let Some(menu) = state.ui.context_menu else {
        return events;
    };

    let position = viewport_origin + egui::vec2(menu.anchor.left, menu.anchor.top);
    egui::Area::new(egui::Id::new("shape_context_menu"))
        .fixed_pos(position)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(format!("Form {}", menu.shape));
                ui.separator();
                if !menu.is_center && ui.button("Punkt entfernen").clicked() {
                    events.push(AppIntent::RemoveControlPointRequested { point: menu.target });
                }
                if ui.button("Form entfernen").clicked() {
                    events.push(AppIntent::RemoveShapeRequested { shape: menu.shape });
                }
                if ui.button("Abbrechen").clicked() {
                    events.push(AppIntent::ContextMenuDismissed);
                }
            });
        });

    events
}
