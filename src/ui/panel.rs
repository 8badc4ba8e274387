//! Seitenpanel: Tension-Regler, Formen, Lichter, Avatare und Optionen.

use crate::app::{AppIntent, AppState, ShapeKind};
use crate::core::{LIGHT_NAME, PLAYER_NAME};
use crate::shared::EditorOptions;
use glam::Vec3;

/// Eingabewerte des Panels, die über Frames erhalten bleiben.
#[derive(Debug, Clone)]
pub struct PanelState {
    /// Position für neue Lichtquellen
    pub light_position: [f32; 3],
    /// Versatz neuer Formen gegenüber dem Ursprung
    pub shape_offset: [f32; 2],
    /// Arbeitskopie der Optionen (wird erst mit "Übernehmen" angewendet)
    pub draft_options: Option<EditorOptions>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            light_position: [100.0, 30.0, 100.0],
            shape_offset: [0.0, 0.0],
            draft_options: None,
        }
    }
}

/// Quadrat aus vier Kontrollpunkten um `offset` (Kantenlänge 100).
pub fn default_square(offset: [f32; 2]) -> Vec<Vec3> {
    let [x, z] = offset;
    vec![
        Vec3::new(x - 50.0, 0.0, z - 50.0),
        Vec3::new(x + 50.0, 0.0, z - 50.0),
        Vec3::new(x + 50.0, 0.0, z + 50.0),
        Vec3::new(x - 50.0, 0.0, z + 50.0),
    ]
}

/// Gerade Wand aus drei Kontrollpunkten entlang X.
pub fn default_wall(offset: [f32; 2]) -> Vec<Vec3> {
    let [x, z] = offset;
    vec![
        Vec3::new(x - 100.0, 0.0, z),
        Vec3::new(x, 0.0, z),
        Vec3::new(x + 100.0, 0.0, z),
    ]
}

/// Rendert das Seitenpanel und gibt erzeugte Events zurück.
pub fn render_side_panel(
    ctx: &egui::Context,
    state: &AppState,
    panel: &mut PanelState,
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::SidePanel::left("editor_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                render_tension(ui, state, &mut events);
                ui.separator();
                render_shapes(ui, state, panel, &mut events);
                ui.separator();
                render_lights(ui, state, panel, &mut events);
                ui.separator();
                render_characters(ui, state, &mut events);
                ui.separator();
                render_options(ui, state, panel, &mut events);
                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Kamera zurücksetzen").clicked() {
                        events.push(AppIntent::ResetCameraRequested);
                    }
                    if ui.button("Beenden").clicked() {
                        events.push(AppIntent::ExitRequested);
                    }
                });
            });
        });

    events
}

fn render_tension(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppIntent>) {
    ui.heading("Kurve");
    let mut tension = state.tension.value();
    let response = ui.add(egui::Slider::new(&mut tension, 0.0..=1.0).text("Tension"));
    if response.changed() {
        events.push(AppIntent::TensionChanged { value: tension });
    }
}

fn render_shapes(
    ui: &mut egui::Ui,
    state: &AppState,
    panel: &mut PanelState,
    events: &mut Vec<AppIntent>,
) {
    ui.heading("Formen");

    ui.horizontal(|ui| {
        ui.label("Versatz X/Z:");
        ui.add(egui::DragValue::new(&mut panel.shape_offset[0]).speed(5.0));
        ui.add(egui::DragValue::new(&mut panel.shape_offset[1]).speed(5.0));
    });

    ui.horizontal(|ui| {
        if ui.button("+ Fläche").clicked() {
            events.push(AppIntent::AddShapeRequested {
                kind: ShapeKind::Filled,
                points: default_square(panel.shape_offset),
            });
        }
        if ui.button("+ Wand").clicked() {
            events.push(AppIntent::AddShapeRequested {
                kind: ShapeKind::Wall,
                points: default_wall(panel.shape_offset),
            });
        }
    });

    for shape in state.shapes.iter() {
        ui.horizontal(|ui| {
            let kind = if shape.config().closed { "Fläche" } else { "Wand" };
            ui.label(format!(
                "{} {} ({} Punkte)",
                kind,
                shape.id(),
                shape.control_points().len()
            ));
            if ui.small_button("+ Punkt").clicked() {
                // Neuer Punkt eine Rasterweite neben dem letzten
                let last = shape
                    .control_point_positions(&state.scene)
                    .last()
                    .copied()
                    .unwrap_or_default();
                events.push(AppIntent::AddControlPointRequested {
                    shape: shape.id(),
                    position: last + Vec3::new(state.options.grid_size, 0.0, 0.0),
                });
            }
            if ui.small_button("✖").clicked() {
                events.push(AppIntent::RemoveShapeRequested { shape: shape.id() });
            }
        });
    }
}

fn render_lights(
    ui: &mut egui::Ui,
    state: &AppState,
    panel: &mut PanelState,
    events: &mut Vec<AppIntent>,
) {
    ui.heading("Lichter");

    ui.horizontal(|ui| {
        ui.label("Position:");
        for value in &mut panel.light_position {
            ui.add(egui::DragValue::new(value).speed(5.0));
        }
    });
    if ui.button("+ Licht").clicked() {
        events.push(AppIntent::AddLightRequested {
            position: Vec3::from(panel.light_position),
        });
    }

    for light in state.scene.objects_named(LIGHT_NAME) {
        ui.horizontal(|ui| {
            let visible = state.visibility.is_visible(light);
            let marker = if visible { "●" } else { "○" };
            ui.label(format!("{} Licht {}", marker, light));
            if ui.small_button("✖").clicked() {
                events.push(AppIntent::RemoveLightRequested { light });
            }
        });
    }
}

fn render_characters(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppIntent>) {
    ui.heading("Avatar");
    let count = state.scene.objects_named(PLAYER_NAME).len();
    ui.label(format!("{} Avatar(e), Pfeiltasten bewegen den aktiven", count));
    if ui.button("+ Avatar").clicked() {
        events.push(AppIntent::AddCharacterRequested { start: None });
    }
}

fn render_options(
    ui: &mut egui::Ui,
    state: &AppState,
    panel: &mut PanelState,
    events: &mut Vec<AppIntent>,
) {
    egui::CollapsingHeader::new("Optionen")
        .default_open(false)
        .show(ui, |ui| {
            let draft = panel
                .draft_options
                .get_or_insert_with(|| state.options.clone());

            ui.horizontal(|ui| {
                ui.label("Raster:");
                ui.add(
                    egui::DragValue::new(&mut draft.grid_size)
                        .range(1.0..=500.0)
                        .speed(1.0),
                );
            });
            ui.checkbox(&mut draft.snap_on_release, "Punkte einrasten");
            ui.horizontal(|ui| {
                ui.label("Sichtweite:");
                ui.add(
                    egui::DragValue::new(&mut draft.view_distance)
                        .range(10.0..=5000.0)
                        .speed(5.0),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Abtastungen:");
                ui.add(egui::DragValue::new(&mut draft.curve_samples).range(4..=500));
            });
            ui.horizontal(|ui| {
                ui.label("Wandhöhe:");
                ui.add(
                    egui::DragValue::new(&mut draft.wall_height)
                        .range(1.0..=500.0)
                        .speed(1.0),
                );
            });
            color_edit(ui, "Mesh-Farbe:", &mut draft.mesh_color);
            color_edit(ui, "Kurven-Farbe:", &mut draft.curve_color);

            ui.horizontal(|ui| {
                if ui.button("Übernehmen").clicked() {
                    events.push(AppIntent::OptionsApplied {
                        options: Box::new(draft.clone()),
                    });
                }
                if ui.button("Speichern").clicked() {
                    events.push(AppIntent::OptionsApplied {
                        options: Box::new(draft.clone()),
                    });
                    events.push(AppIntent::SaveOptionsRequested);
                }
                if ui.button("Standardwerte").clicked() {
                    *draft = EditorOptions::default();
                }
            });
        });
}

/// Farb-Editor für [f32; 4] mit Alpha.
fn color_edit(ui: &mut egui::Ui, label: &str, color: &mut [f32; 4]) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        let mut c = egui::Color32::from_rgba_unmultiplied(
            (color[0] * 255.0) as u8,
            (color[1] * 255.0) as u8,
            (color[2] * 255.0) as u8,
            (color[3] * 255.0) as u8,
        );
        if ui.color_edit_button_srgba(&mut c).changed() {
            *color = [
                c.r() as f32 / 255.0,
                c.g() as f32 / 255.0,
                c.b() as f32 / 255.0,
                c.a() as f32 / 255.0,
            ];
            changed = true;
        }
    });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_square_is_centered_on_offset() {
        let points = default_square([100.0, -50.0]);
        assert_eq!(points.len(), 4);
        let sum: Vec3 = points.iter().copied().sum();
        assert_eq!(sum / 4.0, Vec3::new(100.0, 0.0, -50.0));
    }

    #[test]
    fn test_default_wall_is_open_line() {
        let points = default_wall([0.0, 0.0]);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.z == 0.0));
    }
}
