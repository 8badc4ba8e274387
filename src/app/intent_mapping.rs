//! Mapping von UI-Intents auf mutierende App-Commands.

use super::avatar::key_direction;
use super::events::{Key, PointerButton, ShapeKind};
use super::{AppCommand, AppIntent, AppState};
use crate::shape::ShapeConfig;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let viewport = state.view.viewport();
    match intent {
        AppIntent::PointerDown { button, client } => {
            let ray = state.view.camera.ray_from_client(client, viewport);
            let mut commands = Vec::with_capacity(2);
            // Linksklick außerhalb schließt ein offenes Kontextmenü
            if button == PointerButton::Primary && state.ui.context_menu.is_some() {
                commands.push(AppCommand::CloseContextMenu);
            }
            commands.push(AppCommand::PointerDown {
                button,
                client,
                ray,
            });
            commands
        }
        AppIntent::PointerMove { client } => vec![AppCommand::PointerMove {
            ray: state.view.camera.ray_from_client(client, viewport),
        }],
        AppIntent::PointerUp { .. } => vec![AppCommand::PointerUp],
        AppIntent::KeyPressed { key: Key::Escape } => vec![AppCommand::CloseContextMenu],
        AppIntent::KeyPressed { key } => key_direction(key)
            .map(|direction| AppCommand::MoveActivePlayer {
                delta: direction * state.options.avatar_step,
            })
            .into_iter()
            .collect(),
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::CameraOrbit { delta } => vec![AppCommand::OrbitCamera { delta }],
        AppIntent::CameraZoom { factor } => vec![AppCommand::ZoomCamera { factor }],
        AppIntent::ResetCameraRequested => vec![AppCommand::ResetCamera],
        AppIntent::TensionChanged { value } => vec![AppCommand::SetTension { value }],
        AppIntent::AddShapeRequested { kind, points } => {
            let group_id = state.shapes.next_id().0;
            let config = match kind {
                ShapeKind::Filled => ShapeConfig::filled(&state.options, group_id),
                ShapeKind::Wall => ShapeConfig::wall(&state.options, group_id),
            };
            vec![AppCommand::CreateShape { config, points }]
        }
        AppIntent::AddControlPointRequested { shape, position } => {
            vec![AppCommand::AddControlPoint { shape, position }]
        }
        AppIntent::RemoveControlPointRequested { point } => vec![
            AppCommand::CloseContextMenu,
            AppCommand::RemoveControlPoint { point },
        ],
        AppIntent::RemoveShapeRequested { shape } => vec![
            AppCommand::CloseContextMenu,
            AppCommand::RemoveShape { shape },
        ],
        AppIntent::AddLightRequested { position } => vec![AppCommand::AddLight { position }],
        AppIntent::RemoveLightRequested { light } => vec![AppCommand::RemoveLight { light }],
        AppIntent::AddCharacterRequested { start } => vec![AppCommand::InitCharacter { start }],
        AppIntent::ContextMenuDismissed => vec![AppCommand::CloseContextMenu],
        AppIntent::OptionsApplied { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::SaveOptionsRequested => vec![AppCommand::SaveOptions],
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_arrow_key_maps_to_step_sized_move() {
        let state = AppState::new();
        let commands = map_intent_to_commands(&state, AppIntent::KeyPressed { key: Key::ArrowLeft });
        match commands.as_slice() {
            [AppCommand::MoveActivePlayer { delta }] => {
                assert_eq!(*delta, Vec3::new(-25.0, 0.0, 0.0))
            }
            other => panic!("unerwartete Commands: {other:?}"),
        }
    }

    #[test]
    fn test_wall_request_uses_wall_config() {
        let state = AppState::new();
        let commands = map_intent_to_commands(
            &state,
            AppIntent::AddShapeRequested {
                kind: ShapeKind::Wall,
                points: vec![Vec3::ZERO, Vec3::X],
            },
        );
        match commands.as_slice() {
            [AppCommand::CreateShape { config, points }] => {
                assert!(!config.closed);
                assert_eq!(config.group_id, 1);
                assert_eq!(points.len(), 2);
            }
            other => panic!("unerwartete Commands: {other:?}"),
        }
    }

    #[test]
    fn test_pointer_down_closes_open_context_menu_first() {
        let mut state = AppState::new();
        state.ui.context_menu = Some(crate::app::state::ContextMenuState {
            anchor: crate::app::ScreenAnchor { top: 0.0, left: 0.0 },
            target: state.scene.add_object("p", crate::core::ObjectKind::Marker, Vec3::ZERO, None),
            shape: crate::shape::ShapeId(1),
            is_center: false,
        });
        let commands = map_intent_to_commands(
            &state,
            AppIntent::PointerDown {
                button: PointerButton::Primary,
                client: Vec2::new(10.0, 10.0),
            },
        );
        assert!(matches!(commands[0], AppCommand::CloseContextMenu));
        assert!(matches!(commands[1], AppCommand::PointerDown { .. }));
    }
}
