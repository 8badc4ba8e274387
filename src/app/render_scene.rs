//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::core::{Geometry, ObjectKind, Scene, SceneObject};
use crate::shared::{RenderLight, RenderLine, RenderMesh, RenderScene};

/// `true` wenn das Objekt und alle Parents sichtbar sind.
fn effectively_visible(scene: &Scene, object: &SceneObject) -> bool {
    let mut current = Some(object);
    while let Some(o) = current {
        if !o.visible {
            return false;
        }
        current = o.parent.and_then(|p| scene.get(p));
    }
    true
}

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    let scene = &state.scene;
    let mut meshes = Vec::new();
    let mut lines = Vec::new();
    let mut lights = Vec::new();

    for object in scene.objects() {
        let Some(offset) = scene.world_position(object.id) else {
            continue;
        };
        if let ObjectKind::Light { .. } = object.kind {
            lights.push(RenderLight {
                position: offset,
                visible: object.visible,
            });
            continue;
        }
        if !effectively_visible(scene, object) {
            continue;
        }

        match scene.geometry_of(object.id) {
            Some(Geometry::Mesh(mesh)) if !mesh.is_empty() => meshes.push(RenderMesh {
                positions: mesh.positions.iter().map(|p| *p + offset).collect(),
                indices: mesh.indices.clone(),
                color: object.color,
            }),
            Some(Geometry::Line(points)) if points.len() >= 2 => lines.push(RenderLine {
                points: points.iter().map(|p| *p + offset).collect(),
                color: object.color,
            }),
            _ => {}
        }
    }

    RenderScene {
        camera: state.view.camera.clone(),
        viewport_size: state.view.viewport_size,
        meshes,
        lines,
        lights,
        shadow_revision: scene.shadow.revision,
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::AppState;
    use crate::core::add_light_source;
    use glam::Vec3;

    #[test]
    fn test_build_skips_hidden_objects_but_reports_lights() {
        let mut state = AppState::new();
        let source = add_light_source(&mut state.scene, Vec3::new(0.0, 0.0, 100.0), 5.0);
        let scene = build(&state);
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.visible_light_count(), 1);

        state.scene.set_visible(source.light, false);
        state.scene.set_visible(source.bulb, false);
        let scene = build(&state);
        assert!(scene.meshes.is_empty());
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.visible_light_count(), 0);
    }
}
