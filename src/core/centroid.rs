//! Schwerpunkt-Berechnung für Punktmengen.

use glam::Vec3;

/// Arithmetisches Mittel in X/Z; Y liegt auf dem Boden (0).
///
/// `None` bei leerer Eingabe.
pub fn centroid(points: &[Vec3]) -> Option<Vec3> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
    let mean = sum / points.len() as f32;
    Some(Vec3::new(mean.x, 0.0, mean.z))
}
