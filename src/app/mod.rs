//! Application-Layer: Controller, State, Events, Drag und Sichtbarkeit.

pub mod avatar;
pub mod command_log;
pub mod controller;
pub mod drag;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod listeners;
pub mod render_scene;
/// Application State
///
/// Hält Szene, Formen, Listener, Kamera und UI-Zustand.
pub mod state;
pub mod visibility;

pub use avatar::{active_player, init_character};
pub use command_log::CommandLog;
pub use controller::AppController;
pub use drag::{DragState, DragTarget};
pub use events::{
    AppCommand, AppEvent, AppIntent, EventOutcome, Key, PointerButton, ScreenAnchor, ShapeKind,
};
pub use listeners::{ListenerId, ListenerOwner, ListenerRegistry};
pub use render_scene::build as build_render_scene;
pub use state::{AppState, ContextMenuState, ShapeBinding, UiState, ViewState};
pub use visibility::{hide_non_visible_lights, VisibilityReport};
