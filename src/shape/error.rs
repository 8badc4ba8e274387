//! Fehlertypen der Form-Rekonstruktion.

use crate::core::ObjectId;
use thiserror::Error;

/// Fehler beim Aufbau der Kurve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Nach der Hull-Reduktion bleiben weniger als zwei Punkte übrig.
    #[error("Kurve benötigt mindestens 2 Punkte, erhalten: {count}")]
    InsufficientPoints { count: usize },
}

/// Fehler beim Extrudieren des Meshes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtrudeError {
    /// Zu wenige unterschiedliche Umrisspunkte.
    #[error("Umriss ist degeneriert ({count} unterschiedliche Punkte, mindestens {required} nötig)")]
    DegenerateOutline { count: usize, required: usize },
    /// Die Triangulierung des Umrisses ist fehlgeschlagen.
    #[error("Triangulierung fehlgeschlagen: {0}")]
    Tessellation(String),
}

/// Fehler bei Operationen auf Formen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// Eine Form braucht mindestens einen Kontrollpunkt.
    #[error("Form ohne Kontrollpunkte")]
    NoControlPoints,
    /// Unbekannte Form-ID.
    #[error("Unbekannte Form {0}")]
    UnknownShape(u64),
    /// Der Punkt gehört nicht zu dieser Form.
    #[error("Objekt {0} ist kein Kontrollpunkt dieser Form")]
    UnknownPoint(ObjectId),
    /// Der letzte Kontrollpunkt kann nicht entfernt werden.
    #[error("Der letzte Kontrollpunkt kann nicht entfernt werden")]
    LastControlPoint,
}
