//! App-Commands: ausführbare Mutationen des AppState.

use super::PointerButton;
use crate::core::{ObjectId, Ray};
use crate::shape::{ShapeConfig, ShapeId};
use crate::shared::EditorOptions;
use glam::{Vec2, Vec3};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Pointer-Down mit bereits berechnetem Kamerastrahl
    PointerDown {
        button: PointerButton,
        client: Vec2,
        ray: Ray,
    },
    /// Pointer-Move während eines möglichen Drags
    PointerMove { ray: Ray },
    /// Drag beenden
    PointerUp,
    /// Aktiven Avatar verschieben
    MoveActivePlayer { delta: Vec3 },
    /// Viewport-Größe setzen
    SetViewportSize { size: [f32; 2] },
    /// Kamera drehen
    OrbitCamera { delta: Vec2 },
    /// Kamera zoomen
    ZoomCamera { factor: f32 },
    /// Kamera zurücksetzen
    ResetCamera,
    /// Tension setzen und Beobachter neu bauen
    SetTension { value: f32 },
    /// Form anlegen
    CreateShape { config: ShapeConfig, points: Vec<Vec3> },
    /// Kontrollpunkt hinzufügen
    AddControlPoint { shape: ShapeId, position: Vec3 },
    /// Kontrollpunkt entfernen
    RemoveControlPoint { point: ObjectId },
    /// Form samt Listener und Tension-Beobachter entfernen
    RemoveShape { shape: ShapeId },
    /// Lichtquelle anlegen
    AddLight { position: Vec3 },
    /// Lichtquelle entfernen
    RemoveLight { light: ObjectId },
    /// Avatar anlegen
    InitCharacter { start: Option<Vec3> },
    /// Kontextmenü schließen
    CloseContextMenu,
    /// Optionen übernehmen
    ApplyOptions { options: Box<EditorOptions> },
    /// Optionen speichern
    SaveOptions,
    /// Anwendung beenden
    RequestExit,
}
