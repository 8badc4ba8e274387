//! App-Events: Rückmeldungen des Controllers an UI und Host.

use crate::app::drag::DragTarget;
use crate::core::ObjectId;
use crate::shape::ShapeId;

/// Bildschirmanker eines Popups (Client-Koordinaten).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenAnchor {
    pub top: f32,
    pub left: f32,
}

/// Ereignisse aus dem Controller an das Frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Ein Drag wurde beendet
    DragCompleted { target: DragTarget },
    /// Rechtsklick auf einen Kontroll- oder Mittelpunkt
    ContextMenuRequested {
        anchor: ScreenAnchor,
        target: ObjectId,
        shape: ShapeId,
    },
}

/// Wirkung eines Eingabe-Events auf den Host.
///
/// Geordnet nach Stärke: mehrere Commands eines Intents liefern das Maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum EventOutcome {
    /// Nicht behandelt, Host darf reagieren (z.B. Kamera drehen)
    #[default]
    Ignored,
    /// Von einem Listener konsumiert
    Consumed,
    /// Konsumiert, Host-Standardverhalten (Browser-/System-Kontextmenü) unterdrücken
    PreventDefault,
}
