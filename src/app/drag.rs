//! Drag-Zustandsautomat pro Listener.

use crate::core::{ObjectId, Plane, Ray};
use glam::Vec3;

/// Gezogenes Objekt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Einzelner Kontrollpunkt einer Form
    ControlPoint(ObjectId),
    /// Mittelpunkt: verschiebt die ganze Form
    CenterPoint(ObjectId),
    /// Avatar
    Avatar(ObjectId),
}

impl DragTarget {
    /// Objekt-ID des gezogenen Objekts.
    pub fn object(&self) -> ObjectId {
        match self {
            DragTarget::ControlPoint(id) | DragTarget::CenterPoint(id) | DragTarget::Avatar(id) => {
                *id
            }
        }
    }
}

/// Zustand eines Drag-Listeners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        target: DragTarget,
        /// Horizontale Ebene durch den Treffpunkt beim Drag-Start
        plane: Plane,
        /// `object.position - hit.point` beim Drag-Start
        offset: Vec3,
    },
}

impl DragState {
    /// Startet einen Drag auf der horizontalen Ebene durch `hit_point`.
    pub fn begin(target: DragTarget, hit_point: Vec3, object_position: Vec3) -> Self {
        DragState::Dragging {
            target,
            plane: Plane::horizontal_through(hit_point),
            offset: object_position - hit_point,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn target(&self) -> Option<DragTarget> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { target, .. } => Some(*target),
        }
    }

    /// Neue Objektposition für einen Strahl; `None` ohne Ebenentreffer oder im Leerlauf.
    pub fn drag_position(&self, ray: &Ray) -> Option<Vec3> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { plane, offset, .. } => {
                ray.intersect_plane(plane).map(|hit| hit + *offset)
            }
        }
    }

    /// Beendet den Drag und liefert das bisherige Ziel.
    pub fn finish(&mut self) -> Option<DragTarget> {
        let target = self.target();
        *self = DragState::Idle;
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_drag_keeps_grab_offset() {
        let target = DragTarget::ControlPoint(crate::core::Scene::new().add_object(
            "p",
            crate::core::ObjectKind::Marker,
            Vec3::ZERO,
            None,
        ));
        let state = DragState::begin(target, Vec3::new(2.0, 25.0, -3.0), Vec3::ZERO);
        let ray = Ray::new(Vec3::new(32.0, 100.0, 37.0), Vec3::NEG_Y);
        let position = state.drag_position(&ray).expect("Ebenentreffer");
        assert_relative_eq!(position.x, 30.0);
        assert_relative_eq!(position.y, 0.0);
        assert_relative_eq!(position.z, 40.0);
    }

    #[test]
    fn test_idle_ignores_moves() {
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        assert!(DragState::Idle.drag_position(&ray).is_none());
    }

    #[test]
    fn test_ray_parallel_to_plane_is_ignored() {
        let mut scene = crate::core::Scene::new();
        let id = scene.add_object("p", crate::core::ObjectKind::Marker, Vec3::ZERO, None);
        let state = DragState::begin(DragTarget::Avatar(id), Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        let ray = Ray::new(Vec3::new(0.0, 50.0, 0.0), Vec3::X);
        assert!(state.drag_position(&ray).is_none());
    }

    #[test]
    fn test_finish_returns_target_and_resets() {
        let mut scene = crate::core::Scene::new();
        let id = scene.add_object("p", crate::core::ObjectKind::Marker, Vec3::ZERO, None);
        let mut state = DragState::begin(DragTarget::CenterPoint(id), Vec3::ZERO, Vec3::ZERO);
        assert_eq!(state.finish(), Some(DragTarget::CenterPoint(id)));
        assert_eq!(state, DragState::Idle);
        assert_eq!(state.finish(), None);
    }
}
