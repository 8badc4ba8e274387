//! Kurvenaufbau: Hull-Reduktion, Catmull-Rom-Anpassung und Abtastung.

use super::boundary::reduce_boundary;
use super::error::CurveError;
use crate::shared::spline_geometry::{CatmullRomCurve, CurveType};
use glam::{Vec2, Vec3};

/// Parameter für den Kurvenaufbau einer Form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveConfig {
    /// Geschlossene Kurve (Boden) oder offene (Wand)
    pub closed: bool,
    pub curve_type: CurveType,
    /// Punkte vor der Anpassung auf die Concave Hull reduzieren
    pub reduce_boundary: bool,
    pub concavity: f32,
    /// Abtast-Unterteilungen der gesamten Kurve
    pub divisions: usize,
    /// Y-Höhe der Kurvenpunkte
    pub elevation: f32,
}

/// Abgetastete Kurve mit `divisions + 1` Punkten.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    pub points: Vec<Vec3>,
    pub closed: bool,
}

impl SampledCurve {
    /// Punkte in der XZ-Ebene.
    pub fn outline(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(|p| Vec2::new(p.x, p.z))
    }
}

/// Baut die Kurve durch die Kontrollpunkt-Positionen.
///
/// Bleiben nach der Reduktion weniger als 2 Punkte übrig, gibt es keine Kurve.
pub fn build_curve(
    positions: &[Vec3],
    tension: f32,
    config: &CurveConfig,
) -> Result<SampledCurve, CurveError> {
    let flat: Vec<Vec2> = positions.iter().map(|p| Vec2::new(p.x, p.z)).collect();
    let ordered = if config.reduce_boundary {
        reduce_boundary(&flat, config.concavity, config.closed)
    } else {
        flat
    };

    if ordered.len() < 2 {
        return Err(CurveError::InsufficientPoints {
            count: ordered.len(),
        });
    }

    let support: Vec<Vec3> = ordered
        .iter()
        .map(|p| Vec3::new(p.x, config.elevation, p.y))
        .collect();
    let curve = CatmullRomCurve::new(support, config.closed, config.curve_type, tension);

    Ok(SampledCurve {
        points: curve.sample_points(config.divisions),
        closed: config.closed,
    })
}
