//! Punkt-Marker: Kontrollpunkte, Mittelpunkte und Avatare.

use super::geometry::{box_geometry, Geometry};
use super::scene::{ObjectId, ObjectKind, Scene};
use crate::shared::options::MARKER_SIZE;
use glam::Vec3;

/// Objektname der Kontrollpunkte.
pub const CONTROL_POINT_NAME: &str = "controlPoint";
/// Objektname des Form-Mittelpunkts.
pub const CENTER_POINT_NAME: &str = "centerPoint";
/// Objektname der Avatare.
pub const PLAYER_NAME: &str = "player";

/// Standardfarbe neuer Punkte (Weiß, halbtransparent).
const DEFAULT_POINT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];

/// Legt einen Box-Marker an `position` an.
///
/// Die Box ist um `position` zentriert und um 0.75 nach oben versetzt; bei
/// 50 Einheiten Höhe reicht sie von -24.25 bis +25.75.
pub fn create_point(
    scene: &mut Scene,
    position: Vec3,
    color: Option<[f32; 4]>,
    name: Option<&str>,
) -> ObjectId {
    create_point_sized(scene, position, MARKER_SIZE, color, name)
}

/// Wie [`create_point`], aber mit frei wählbarer Marker-Größe.
pub fn create_point_sized(
    scene: &mut Scene,
    position: Vec3,
    size: Vec3,
    color: Option<[f32; 4]>,
    name: Option<&str>,
) -> ObjectId {
    let geometry = box_geometry(size, Vec3::new(0.0, 0.75, 0.0));
    let id = scene.add_object(
        name.unwrap_or_default(),
        ObjectKind::Marker,
        position,
        Some(Geometry::Mesh(geometry)),
    );
    if let Some(object) = scene.get_mut(id) {
        object.color = color.unwrap_or(DEFAULT_POINT_COLOR);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ray::Ray;

    #[test]
    fn test_create_point_defaults() {
        let mut scene = Scene::new();
        let id = create_point(&mut scene, Vec3::new(1.0, 2.0, 3.0), None, None);
        let object = scene.get(id).expect("Objekt angelegt");
        assert_eq!(object.name, "");
        assert_eq!(object.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(object.color, DEFAULT_POINT_COLOR);
        assert_eq!(scene.geometries.live_count(), 1);
    }

    #[test]
    fn test_point_is_pickable_from_above() {
        let mut scene = Scene::new();
        let id = create_point(
            &mut scene,
            Vec3::new(100.0, 0.0, 100.0),
            Some([0.0, 0.0, 1.0, 0.5]),
            Some(CENTER_POINT_NAME),
        );
        let ray = Ray::new(Vec3::new(103.0, 500.0, 98.0), Vec3::NEG_Y);
        let hits = scene.raycast(&ray, 0.0, f32::INFINITY, &[id]);
        assert_eq!(hits.len(), 1);
        // Oberkante der Box: 25 + 0.75
        assert!((hits[0].point.y - 25.75).abs() < 1e-3);
    }

    #[test]
    fn test_marker_box_is_centered_with_small_lift() {
        let mut scene = Scene::new();
        let id = create_point(&mut scene, Vec3::ZERO, None, None);
        let bounds = scene
            .geometry_of(id)
            .and_then(Geometry::as_mesh)
            .and_then(|m| m.bounds())
            .expect("Marker-Box");
        assert!((bounds.min.y + 24.25).abs() < 1e-4);
        assert!((bounds.max.y - 25.75).abs() < 1e-4);
        assert!((bounds.min.x + 7.5).abs() < 1e-4);
        assert!((bounds.max.x - 7.5).abs() < 1e-4);
    }
}
