//! Viewport-Input-Handling: Maus, Scroll und Tastatur → AppIntent.

use crate::app::{AppIntent, Key, PointerButton};
use glam::Vec2;

/// Zoomfaktor pro Scroll-Pixel.
const ZOOM_PER_SCROLL: f32 = 0.0015;

/// Verwaltet den Input-Zustand des Viewports.
#[derive(Debug, Default)]
pub struct InputState {
    /// Primärtaste wurde im Viewport gedrückt und ist noch unten
    primary_down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sammelt Viewport-Events aus egui-Input und gibt AppIntents zurück.
    ///
    /// Client-Koordinaten sind relativ zur linken oberen Ecke des Viewports.
    pub fn collect_viewport_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
    ) -> Vec<AppIntent> {
        let mut events = Vec::new();
        let rect = response.rect;
        let to_client = |pos: egui::Pos2| Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);

        let (pointer_pos, primary_pressed, primary_released, secondary_pressed, delta, scroll) =
            ui.input(|i| {
                (
                    i.pointer.latest_pos(),
                    i.pointer.primary_pressed(),
                    i.pointer.primary_released(),
                    i.pointer.secondary_pressed(),
                    i.pointer.delta(),
                    i.smooth_scroll_delta.y,
                )
            });

        if let Some(pos) = pointer_pos {
            let client = to_client(pos);

            if response.hovered() && primary_pressed {
                self.primary_down = true;
                events.push(AppIntent::PointerDown {
                    button: PointerButton::Primary,
                    client,
                });
            }
            if response.hovered() && secondary_pressed {
                events.push(AppIntent::PointerDown {
                    button: PointerButton::Secondary,
                    client,
                });
            }
            if delta != egui::Vec2::ZERO && (self.primary_down || response.hovered()) {
                events.push(AppIntent::PointerMove { client });
            }
            // Orbit wird während eines Form-Drags vom Controller gesperrt
            if self.primary_down && delta != egui::Vec2::ZERO {
                events.push(AppIntent::CameraOrbit {
                    delta: Vec2::new(delta.x, delta.y),
                });
            }
            if self.primary_down && primary_released {
                self.primary_down = false;
                events.push(AppIntent::PointerUp { client });
            }
        }

        if response.hovered() && scroll != 0.0 {
            events.push(AppIntent::CameraZoom {
                factor: (1.0 - scroll * ZOOM_PER_SCROLL).clamp(0.5, 2.0),
            });
        }

        events.extend(collect_keyboard_events(ui, response.id));
        events
    }
}

/// Pfeiltasten und Escape.
fn collect_keyboard_events(ui: &egui::Ui, viewport_id: egui::Id) -> Vec<AppIntent> {
    const KEYS: [(egui::Key, Key); 5] = [
        (egui::Key::ArrowUp, Key::ArrowUp),
        (egui::Key::ArrowDown, Key::ArrowDown),
        (egui::Key::ArrowLeft, Key::ArrowLeft),
        (egui::Key::ArrowRight, Key::ArrowRight),
        (egui::Key::Escape, Key::Escape),
    ];
    // Keine Navigation, solange ein anderes Widget den Fokus hat
    if ui
        .ctx()
        .memory(|m| m.focused().is_some_and(|id| id != viewport_id))
    {
        return Vec::new();
    }
    ui.input(|i| {
        KEYS.iter()
            .filter(|(egui_key, _)| i.key_pressed(*egui_key))
            .map(|(_, key)| AppIntent::KeyPressed { key: *key })
            .collect()
    })
}
