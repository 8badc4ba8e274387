//! Render-Szene als expliziter Übergabevertrag zwischen App und Viewport.
//!
//! Lebt im shared-Modul, da `app` sie baut und `ui` sie konsumiert.

use crate::core::Camera3D;
use glam::Vec3;

/// Dreiecksnetz in Weltkoordinaten.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub color: [f32; 4],
}

/// Linienzug in Weltkoordinaten.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLine {
    pub points: Vec<Vec3>,
    pub color: [f32; 4],
}

/// Lichtquelle für Overlay und Statusleiste.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderLight {
    pub position: Vec3,
    pub visible: bool,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone)]
pub struct RenderScene {
    /// Kamera-Zustand für diesen Frame
    pub camera: Camera3D,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
    /// Sichtbare Meshes (Wände, Marker, Glühbirnen)
    pub meshes: Vec<RenderMesh>,
    /// Sichtbare Kurvenlinien
    pub lines: Vec<RenderLine>,
    pub lights: Vec<RenderLight>,
    /// Schatten-Revision (ändert sich mit schattenrelevanter Geometrie)
    pub shadow_revision: u64,
}

impl RenderScene {
    /// Anzahl aller Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }

    /// Anzahl sichtbarer Lichter.
    pub fn visible_light_count(&self) -> usize {
        self.lights.iter().filter(|l| l.visible).count()
    }
}
