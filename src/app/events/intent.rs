//! App-Intents: Eingaben aus UI und System.

use crate::core::ObjectId;
use crate::shape::ShapeId;
use crate::shared::EditorOptions;
use glam::{Vec2, Vec3};

/// Maustaste eines Pointer-Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Links: Drag
    Primary,
    /// Rechts: Kontextmenü
    Secondary,
    Middle,
}

/// Tasten, auf die der Editor reagiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// Art einer neuen Form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    /// Geschlossene, gefüllte Form
    #[default]
    Filled,
    /// Offenes Wandband
    Wall,
}

/// App-Intent Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Maustaste gedrückt (Client-Koordinaten, Ursprung oben links)
    PointerDown { button: PointerButton, client: Vec2 },
    /// Maus bewegt
    PointerMove { client: Vec2 },
    /// Maustaste losgelassen
    PointerUp { client: Vec2 },
    /// Taste gedrückt
    KeyPressed { key: Key },
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },
    /// Kamera um Pixel-Delta drehen (Orbit)
    CameraOrbit { delta: Vec2 },
    /// Kamera zoomen
    CameraZoom { factor: f32 },
    /// Kamera auf Standard zurücksetzen
    ResetCameraRequested,
    /// Tension-Regler geändert
    TensionChanged { value: f32 },
    /// Neue Form aus Punkten anlegen
    AddShapeRequested { kind: ShapeKind, points: Vec<Vec3> },
    /// Kontrollpunkt zu einer Form hinzufügen
    AddControlPointRequested { shape: ShapeId, position: Vec3 },
    /// Kontrollpunkt entfernen (Kontextmenü)
    RemoveControlPointRequested { point: ObjectId },
    /// Form entfernen (Kontextmenü)
    RemoveShapeRequested { shape: ShapeId },
    /// Lichtquelle anlegen
    AddLightRequested { position: Vec3 },
    /// Lichtquelle entfernen
    RemoveLightRequested { light: ObjectId },
    /// Avatar anlegen (Standard-Start, falls `None`)
    AddCharacterRequested { start: Option<Vec3> },
    /// Kontextmenü geschlossen
    ContextMenuDismissed,
    /// Optionen aus dem Panel übernehmen
    OptionsApplied { options: Box<EditorOptions> },
    /// Optionen als TOML speichern
    SaveOptionsRequested,
    /// Anwendung beenden
    ExitRequested,
}
