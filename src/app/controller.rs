//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::{AppCommand, AppIntent, AppState, EventOutcome};
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Handler auf den AppState.
#[derive(Debug, Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    /// Liefert die stärkste Wirkung aller ausgeführten Commands.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        intent: AppIntent,
    ) -> anyhow::Result<EventOutcome> {
        let commands = super::intent_mapping::map_intent_to_commands(state, intent);
        let mut outcome = EventOutcome::Ignored;
        for command in commands {
            outcome = outcome.max(self.handle_command(state, command)?);
        }
        Ok(outcome)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<EventOutcome> {
        state.command_log.record(&command);
        use super::handlers;

        let outcome = match command {
            // === Pointer ===
            AppCommand::PointerDown {
                button,
                client,
                ray,
            } => handlers::pointer::down(state, button, client, &ray),
            AppCommand::PointerMove { ray } => handlers::pointer::move_to(state, &ray),
            AppCommand::PointerUp => handlers::pointer::up(state),

            // === Avatar ===
            AppCommand::MoveActivePlayer { delta } => {
                handlers::avatar::move_active_player(state, delta);
                EventOutcome::Consumed
            }
            AppCommand::InitCharacter { start } => {
                handlers::avatar::init_character(state, start);
                EventOutcome::Consumed
            }

            // === Kamera & Viewport ===
            AppCommand::SetViewportSize { size } => {
                handlers::view::set_viewport_size(state, size);
                EventOutcome::Ignored
            }
            AppCommand::OrbitCamera { delta } => {
                handlers::view::orbit(state, delta);
                EventOutcome::Consumed
            }
            AppCommand::ZoomCamera { factor } => {
                handlers::view::zoom(state, factor);
                EventOutcome::Consumed
            }
            AppCommand::ResetCamera => {
                handlers::view::reset_camera(state);
                EventOutcome::Consumed
            }

            // === Formen ===
            AppCommand::SetTension { value } => {
                handlers::shape::set_tension(state, value);
                EventOutcome::Consumed
            }
            AppCommand::CreateShape { config, points } => {
                handlers::shape::create(state, config, &points)?;
                EventOutcome::Consumed
            }
            AppCommand::AddControlPoint { shape, position } => {
                handlers::shape::add_control_point(state, shape, position)?;
                EventOutcome::Consumed
            }
            AppCommand::RemoveControlPoint { point } => {
                handlers::shape::remove_control_point(state, point)?;
                EventOutcome::Consumed
            }
            AppCommand::RemoveShape { shape } => {
                handlers::shape::remove(state, shape)?;
                EventOutcome::Consumed
            }

            // === Lichter ===
            AppCommand::AddLight { position } => {
                handlers::light::add(state, position);
                EventOutcome::Consumed
            }
            AppCommand::RemoveLight { light } => {
                handlers::light::remove(state, light)?;
                EventOutcome::Consumed
            }

            // === Dialoge & Anwendungssteuerung ===
            AppCommand::CloseContextMenu => {
                handlers::dialog::close_context_menu(state);
                EventOutcome::Ignored
            }
            AppCommand::ApplyOptions { options } => {
                handlers::dialog::apply_options(state, *options);
                EventOutcome::Consumed
            }
            AppCommand::SaveOptions => {
                handlers::dialog::save_options(state)?;
                EventOutcome::Consumed
            }
            AppCommand::RequestExit => {
                handlers::dialog::request_exit(state);
                EventOutcome::Consumed
            }
        };

        Ok(outcome)
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
