//! Adjustable-Shape-Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shape;
pub mod shared;
pub mod ui;

pub use app::{
    build_render_scene, AppCommand, AppController, AppEvent, AppIntent, AppState, EventOutcome,
    Key, PointerButton, ShapeKind, UiState, ViewState, VisibilityReport,
};
pub use core::{Camera3D, ObjectId, Ray, Scene};
pub use shape::{AdjustableShape, ShapeArena, ShapeConfig, ShapeId, Tension};
pub use shared::{EditorOptions, RenderScene};
