//! Application State: zentrale Datenhaltung.

use super::events::{AppEvent, ScreenAnchor};
use super::listeners::{ListenerId, ListenerRegistry};
use super::visibility::VisibilityReport;
use super::CommandLog;
use crate::core::{Camera3D, ObjectId, OrbitControls, Scene};
use crate::shape::{ShapeArena, ShapeId, SubscriptionId, Tension};
use crate::shared::EditorOptions;
use std::collections::HashMap;

/// View-bezogener Anwendungszustand
#[derive(Debug)]
pub struct ViewState {
    /// Orbit-Kamera
    pub camera: Camera3D,
    /// Orbit-Steuerung (Rotation während Drags gesperrt)
    pub controls: OrbitControls,
    /// Aktuelle Viewport-Größe in Pixel
    pub viewport_size: [f32; 2],
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            camera: Camera3D::new(),
            controls: OrbitControls::new(),
            viewport_size: [1280.0, 720.0],
        }
    }

    pub fn viewport(&self) -> glam::Vec2 {
        glam::Vec2::from(self.viewport_size)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Offenes Kontextmenü.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenuState {
    pub anchor: ScreenAnchor,
    /// Angeklickter Kontroll- oder Mittelpunkt
    pub target: ObjectId,
    pub shape: ShapeId,
    /// `true` wenn der Mittelpunkt angeklickt wurde
    pub is_center: bool,
}

/// UI-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct UiState {
    pub context_menu: Option<ContextMenuState>,
    /// Letzte Statusmeldung für die Statusleiste
    pub status_message: Option<String>,
}

/// Abmelde-Handles einer Form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeBinding {
    pub subscription: SubscriptionId,
    pub listener: ListenerId,
}

/// Hauptzustand der Anwendung
#[derive(Debug)]
pub struct AppState {
    /// Szenengraph mit allen Objekten und Geometrie-Puffern
    pub scene: Scene,
    /// Alle Formen
    pub shapes: ShapeArena,
    /// Gemeinsame Tension aller Formen
    pub tension: Tension,
    /// Pointer-Listener (Formen und Avatare)
    pub listeners: ListenerRegistry,
    /// Listener- und Tension-Handles je Form
    pub bindings: HashMap<ShapeId, ShapeBinding>,
    pub view: ViewState,
    pub ui: UiState,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Noch nicht abgeholte Ereignisse für das Frontend
    pub events: Vec<AppEvent>,
    /// Ergebnis des letzten Sichtbarkeits-Durchlaufs
    pub visibility: VisibilityReport,
    /// Signalisiert dem Host (eframe), die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen leeren App-State mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit den gegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            scene: Scene::new(),
            shapes: ShapeArena::new(),
            tension: Tension::new(options.default_tension),
            listeners: ListenerRegistry::new(),
            bindings: HashMap::new(),
            view: ViewState::new(),
            ui: UiState::default(),
            options,
            command_log: CommandLog::new(),
            events: Vec::new(),
            visibility: VisibilityReport::default(),
            should_exit: false,
        }
    }

    /// Holt alle angefallenen Ereignisse ab.
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// `true` während ein Listener zieht.
    pub fn is_dragging(&self) -> bool {
        self.listeners.active_drag().is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
