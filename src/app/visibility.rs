//! Verdeckungsprüfung von Lichtquellen aus Sicht des Avatars.

use crate::core::light::find_bulb;
use crate::core::{ObjectId, Ray, Scene, LIGHT_NAME};
use crate::shape::{SHAPE_GROUP_NAME, WALL_NAME};
use glam::Vec3;

/// Ergebnis eines Sichtbarkeits-Durchlaufs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityReport {
    pub visible: Vec<ObjectId>,
    pub hidden: Vec<ObjectId>,
    /// Lichter ohne auffindbaren Stellvertreter
    pub missing_bulbs: Vec<ObjectId>,
}

impl VisibilityReport {
    pub fn is_visible(&self, light: ObjectId) -> bool {
        self.visible.contains(&light)
    }
}

/// Alle `Wall`-Meshes, die direkt in `adjustableShape`-Gruppen hängen.
pub fn wall_meshes(scene: &Scene) -> Vec<ObjectId> {
    scene
        .objects_named(SHAPE_GROUP_NAME)
        .into_iter()
        .filter_map(|group| scene.get(group))
        .flat_map(|group| group.children.iter().copied())
        .filter(|child| scene.get(*child).is_some_and(|c| c.name == WALL_NAME))
        .collect()
}

/// Blendet Lichter aus, die von `position` aus durch Wände verdeckt sind.
///
/// Ein Licht ist sichtbar, wenn der erste Treffer innerhalb `view_distance`
/// das Licht selbst ist. Kein Treffer gilt als verdeckt.
pub fn hide_non_visible_lights(
    scene: &mut Scene,
    position: Vec3,
    view_distance: f32,
) -> VisibilityReport {
    let lights = scene.objects_named(LIGHT_NAME);
    let walls = wall_meshes(scene);
    let mut report = VisibilityReport::default();

    for light in lights {
        let Some(light_position) = scene.world_position(light) else {
            continue;
        };

        let mut candidates = Vec::with_capacity(walls.len() + 1);
        candidates.push(light);
        candidates.extend_from_slice(&walls);

        let ray = Ray::towards(position, light_position);
        let first_hit = scene
            .raycast(&ray, 0.0, view_distance, &candidates)
            .first()
            .map(|hit| hit.object);
        let visible = first_hit == Some(light);

        scene.set_visible(light, visible);
        match find_bulb(scene, light) {
            Some(bulb) => {
                scene.set_visible(bulb, visible);
            }
            None => {
                log::warn!("Lichtquelle {} ohne Stellvertreter", light);
                report.missing_bulbs.push(light);
            }
        }

        if visible {
            report.visible.push(light);
        } else {
            report.hidden.push(light);
        }
    }

    log::debug!(
        "Sichtbarkeit: {} sichtbar, {} verdeckt",
        report.visible.len(),
        report.hidden.len()
    );
    report
}
