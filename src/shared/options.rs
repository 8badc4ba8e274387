//! Zentrale Konfiguration für den Adjustable-Shape-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::Vec3;
use serde::{Deserialize, Serialize};

// ── Raster & Drag ───────────────────────────────────────────────────

/// Rasterweite für das Einrasten nach einem Drag (Welteinheiten).
pub const GRID_SIZE: f32 = 50.0;
/// Feste Höhe, auf die Kontrollpunkte beim Verschieben der ganzen Form gesetzt werden.
pub const DRAG_HEIGHT: f32 = 25.0;

// ── Kurve ───────────────────────────────────────────────────────────

/// Abtastungen der Kurve (geschlossen: gesamt, Wand: pro Kontrollpunkt).
pub const CURVE_SAMPLES: usize = 75;
/// Höhe, auf der die Kurvenlinie gezeichnet wird.
pub const CURVE_ELEVATION: f32 = 1.0;
/// Concavity-Parameter für die Concave-Hull-Reduktion.
pub const CONCAVITY: f32 = 1.0;
/// Standard-Tension der Catmull-Rom-Kurve.
pub const DEFAULT_TENSION: f32 = 0.5;

// ── Extrusion ───────────────────────────────────────────────────────

/// Extrusionstiefe gefüllter Formen.
pub const FILLED_DEPTH: f32 = 20.0;
/// Höhe von Wand-Bändern.
pub const WALL_HEIGHT: f32 = 40.0;
/// Stärke von Wand-Bändern.
pub const WALL_THICKNESS: f32 = 4.0;

// ── Sichtbarkeit & Avatar ───────────────────────────────────────────

/// Maximale Sichtweite für die Licht-Verdeckungsprüfung.
pub const VIEW_DISTANCE: f32 = 400.0;
/// Schrittweite der Pfeiltasten-Navigation.
pub const AVATAR_STEP: f32 = 25.0;
/// Startposition neuer Avatare.
pub const AVATAR_START: Vec3 = Vec3::new(25.0, 10.0, 25.0);
/// Radius des Treffervolumens einer Lichtquelle.
pub const LIGHT_HIT_RADIUS: f32 = 5.0;

// ── Marker-Rendering ───────────────────────────────────────────────

/// Größe der Punkt-Marker (Breite, Höhe, Tiefe).
pub const MARKER_SIZE: Vec3 = Vec3::new(15.0, 50.0, 15.0);
/// Standardfarbe von Kontrollpunkten (RGBA: Weiß, halbtransparent).
pub const CONTROL_POINT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
/// Farbe des Mittelpunkts (RGBA: Blau, halbtransparent).
pub const CENTER_POINT_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 0.5];
/// Farbe der Kurvenlinie (RGBA: Weiß).
pub const CURVE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Farbe des extrudierten Meshes (RGBA: Rot).
pub const MESH_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Farbe des Avatars (RGBA: Gelb).
pub const AVATAR_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `adjustable_shape_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorOptions {
    // ── Raster & Drag ───────────────────────────────────────────
    /// Rasterweite für Drag-Ende
    pub grid_size: f32,
    /// Kontrollpunkte nach dem Drag auf das Raster setzen
    pub snap_on_release: bool,
    /// Höhe der Kontrollpunkte beim Verschieben der ganzen Form
    pub drag_height: f32,

    // ── Kurve ───────────────────────────────────────────────────
    /// Abtastungen pro Kurve (bzw. pro Kontrollpunkt bei Wänden)
    pub curve_samples: usize,
    /// Zeichenhöhe der Kurvenlinie
    pub curve_elevation: f32,
    /// Concavity der Hull-Reduktion
    pub concavity: f32,
    /// Start-Tension
    pub default_tension: f32,

    // ── Extrusion ───────────────────────────────────────────────
    /// Tiefe gefüllter Formen
    pub filled_depth: f32,
    /// Höhe von Wänden
    pub wall_height: f32,
    /// Stärke von Wänden
    pub wall_thickness: f32,

    // ── Sichtbarkeit & Avatar ───────────────────────────────────
    /// Sichtweite der Licht-Verdeckungsprüfung
    pub view_distance: f32,
    /// Schrittweite der Pfeiltasten
    pub avatar_step: f32,
    /// Startposition neuer Avatare
    pub avatar_start: Vec3,
    /// Treffer-Radius der Lichtquellen
    pub light_hit_radius: f32,

    // ── Darstellung ─────────────────────────────────────────────
    /// Größe der Punkt-Marker
    pub marker_size: Vec3,
    /// Farbe der Kontrollpunkte
    pub control_point_color: [f32; 4],
    /// Farbe des Mittelpunkts
    pub center_point_color: [f32; 4],
    /// Farbe der Kurvenlinie
    pub curve_color: [f32; 4],
    /// Farbe der Meshes
    pub mesh_color: [f32; 4],
    /// Farbe der Avatare
    pub avatar_color: [f32; 4],
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_on_release: true,
            drag_height: DRAG_HEIGHT,

            curve_samples: CURVE_SAMPLES,
            curve_elevation: CURVE_ELEVATION,
            concavity: CONCAVITY,
            default_tension: DEFAULT_TENSION,

            filled_depth: FILLED_DEPTH,
            wall_height: WALL_HEIGHT,
            wall_thickness: WALL_THICKNESS,

            view_distance: VIEW_DISTANCE,
            avatar_step: AVATAR_STEP,
            avatar_start: AVATAR_START,
            light_hit_radius: LIGHT_HIT_RADIUS,

            marker_size: MARKER_SIZE,
            control_point_color: CONTROL_POINT_COLOR,
            center_point_color: CENTER_POINT_COLOR,
            curve_color: CURVE_COLOR,
            mesh_color: MESH_COLOR,
            avatar_color: AVATAR_COLOR,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("adjustable_shape_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("adjustable_shape_editor.toml")
    }

    /// Rastet eine Position in X/Z auf das Raster ein (Y bleibt erhalten).
    ///
    /// `round((v + g/2) / g) * g - g/2`: Rasterpunkte liegen auf halben Zellen.
    pub fn snap_to_grid(&self, position: Vec3) -> Vec3 {
        snap_to_grid(position, self.grid_size)
    }
}

/// Rastet `position` in X/Z auf ein Raster der Weite `grid` ein.
pub fn snap_to_grid(position: Vec3, grid: f32) -> Vec3 {
    if grid <= f32::EPSILON {
        return position;
    }
    let half = grid / 2.0;
    let snap = |v: f32| ((v + half) / grid).round() * grid - half;
    Vec3::new(snap(position.x), position.y, snap(position.z))
}
