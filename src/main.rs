//! Adjustable-Shape-Editor.
//!
//! Editor für verformbare Flächen und Wände mit Licht-Verdeckung aus Sicht
//! eines Avatars. Läuft mit egui + eframe (glow).

use eframe::egui;
use adjustable_shape_editor::{ui, AppController, AppIntent, AppState, EditorOptions, ShapeKind};
use glam::Vec3;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "Adjustable-Shape-Editor v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("Adjustable-Shape-Editor"),
            renderer: eframe::Renderer::Glow,
            multisampling: 4,
            ..Default::default()
        };

        eframe::run_native(
            "Adjustable-Shape-Editor",
            options,
            Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct EditorApp {
    state: AppState,
    controller: AppController,
    input: ui::InputState,
    panel: ui::PanelState,
}

impl EditorApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EditorOptions::config_path();
        let editor_options = EditorOptions::load_from_file(&config_path);

        let mut app = Self {
            state: AppState::with_options(editor_options),
            controller: AppController::new(),
            input: ui::InputState::new(),
            panel: ui::PanelState::default(),
        };
        app.seed_demo_scene();
        app
    }

    /// Startszene: eine Fläche, eine Wand, zwei Lichter und ein Avatar.
    fn seed_demo_scene(&mut self) {
        let intents = vec![
            AppIntent::AddShapeRequested {
                kind: ShapeKind::Filled,
                points: ui::panel::default_square([-150.0, -150.0]),
            },
            AppIntent::AddShapeRequested {
                kind: ShapeKind::Wall,
                points: ui::panel::default_wall([100.0, 0.0]),
            },
            AppIntent::AddLightRequested {
                position: Vec3::new(100.0, 30.0, -150.0),
            },
            AppIntent::AddLightRequested {
                position: Vec3::new(-200.0, 30.0, 200.0),
            },
            AppIntent::AddCharacterRequested { start: None },
        ];
        self.process_events(intents);
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let events = self.collect_ui_events(ctx);

        let has_meaningful_events = events
            .iter()
            .any(|e| !matches!(e, AppIntent::ViewportResized { .. }));

        self.process_events(events);
        self.log_app_events();

        // Schatten-Pass: laufend während Drags, sonst einmalig nach Geometrieänderungen
        let shadow_pass = self.state.scene.shadow.consume_update();

        if has_meaningful_events || shadow_pass || self.state.is_dragging() {
            ctx.request_repaint();
        }
    }
}

impl EditorApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        ui::render_status_bar(ctx, &self.state);
        events.extend(ui::render_side_panel(ctx, &self.state, &mut self.panel));

        let mut viewport_origin = egui::Pos2::ZERO;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                viewport_origin = rect.min;

                let viewport_size = [rect.width(), rect.height()];
                if viewport_size != self.state.view.viewport_size {
                    events.push(AppIntent::ViewportResized {
                        size: viewport_size,
                    });
                }

                events.extend(self.input.collect_viewport_events(ui, &response));

                let scene = self.controller.build_render_scene(&self.state);
                ui::paint_scene(ui.painter(), rect, &scene);

                if self.state.shape_count() == 0 {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Keine Formen. Links über das Panel anlegen.",
                        egui::FontId::proportional(20.0),
                        egui::Color32::WHITE,
                    );
                }
            });

        events.extend(ui::show_context_menu(ctx, &self.state, viewport_origin));
        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    fn log_app_events(&mut self) {
        for event in self.state.drain_events() {
            log::debug!("AppEvent: {:?}", event);
        }
    }
}
