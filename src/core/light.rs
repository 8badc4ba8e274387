//! Lichtquellen mit Glühbirnen-Stellvertreter.

use super::geometry::{box_geometry, Geometry};
use super::scene::{ObjectId, ObjectKind, Scene};
use glam::Vec3;

/// Objektname aller Lichtquellen.
pub const LIGHT_NAME: &str = "sourceLight";

/// Kantenlänge des Glühbirnen-Markers.
const BULB_SIZE: f32 = 6.0;

/// Handle auf ein Licht und seinen sichtbaren Stellvertreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightSource {
    pub light: ObjectId,
    pub bulb: ObjectId,
}

/// Abgeleiteter Name des Stellvertreters: `sourceLight-{id}`.
pub fn bulb_name(light: ObjectId) -> String {
    format!("{LIGHT_NAME}-{light}")
}

/// Legt ein Licht samt Glühbirne an `position` an.
pub fn add_light_source(scene: &mut Scene, position: Vec3, hit_radius: f32) -> LightSource {
    let light = scene.add_object(LIGHT_NAME, ObjectKind::Light { hit_radius }, position, None);
    let bulb = scene.add_object(
        &bulb_name(light),
        ObjectKind::Bulb,
        position,
        Some(Geometry::Mesh(box_geometry(Vec3::splat(BULB_SIZE), Vec3::ZERO))),
    );
    if let Some(object) = scene.get_mut(bulb) {
        object.color = [1.0, 0.9, 0.4, 1.0];
    }
    log::info!("Lichtquelle {} bei {:?} angelegt", light, position);
    LightSource { light, bulb }
}

/// Sucht den Stellvertreter eines Lichts über den abgeleiteten Namen.
pub fn find_bulb(scene: &Scene, light: ObjectId) -> Option<ObjectId> {
    scene.object_named(&bulb_name(light))
}

/// Entfernt Licht und Stellvertreter. `false` wenn das Licht unbekannt ist.
pub fn remove_light_source(scene: &mut Scene, light: ObjectId) -> bool {
    if let Some(bulb) = find_bulb(scene, light) {
        scene.remove_object(bulb);
    }
    scene.remove_object(light)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulb_is_found_by_derived_name() {
        let mut scene = Scene::new();
        let source = add_light_source(&mut scene, Vec3::new(0.0, 0.0, 100.0), 5.0);
        assert_eq!(find_bulb(&scene, source.light), Some(source.bulb));
        assert_eq!(scene.objects_named(LIGHT_NAME), vec![source.light]);
    }

    #[test]
    fn test_remove_light_source_removes_bulb() {
        let mut scene = Scene::new();
        let source = add_light_source(&mut scene, Vec3::ZERO, 5.0);
        assert!(remove_light_source(&mut scene, source.light));
        assert!(!scene.contains(source.bulb));
        assert_eq!(scene.geometries.live_count(), 0);
        assert!(!remove_light_source(&mut scene, source.light));
    }
}
