//! Verwaltung aller Formen über stabile `ShapeId`s.

use super::adjustable::{AdjustableShape, ShapeConfig};
use super::error::ShapeError;
use super::ShapeId;
use crate::core::{ObjectId, Scene};
use crate::shared::EditorOptions;
use glam::Vec3;
use indexmap::IndexMap;

/// Arena aller Formen (Einfügereihenfolge bleibt erhalten).
#[derive(Debug, Default)]
pub struct ShapeArena {
    shapes: IndexMap<ShapeId, AdjustableShape>,
    next_id: u64,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserviert die nächste ID (auch als Gruppen-ID verwendbar).
    pub fn next_id(&self) -> ShapeId {
        ShapeId(self.next_id + 1)
    }

    /// Legt eine Form an.
    pub fn create(
        &mut self,
        scene: &mut Scene,
        config: ShapeConfig,
        positions: &[Vec3],
        tension: f32,
        options: &EditorOptions,
    ) -> Result<ShapeId, ShapeError> {
        let id = self.next_id();
        let shape = AdjustableShape::new(scene, id, config, positions, tension, options)?;
        self.next_id = id.0;
        self.shapes.insert(id, shape);
        Ok(id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&AdjustableShape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut AdjustableShape> {
        self.shapes.get_mut(&id)
    }

    /// Löst die Form aus der Arena; der Aufrufer entsorgt ihre Objekte.
    pub fn remove(&mut self, id: ShapeId) -> Option<AdjustableShape> {
        self.shapes.shift_remove(&id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdjustableShape> {
        self.shapes.values()
    }

    /// Form, zu der ein Kontroll- oder Mittelpunkt gehört.
    pub fn shape_of_handle(&self, object: ObjectId) -> Option<ShapeId> {
        self.shapes
            .values()
            .find(|s| s.owns_handle(object))
            .map(|s| s.id())
    }

    /// Baut die genannten Formen mit neuer Tension neu.
    pub fn rebuild(&mut self, scene: &mut Scene, ids: &[ShapeId], tension: f32) {
        for id in ids {
            match self.shapes.get_mut(id) {
                Some(shape) => shape.update_shape(scene, tension),
                None => log::warn!("Rebuild für unbekannte Form {}", id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut scene = Scene::new();
        let options = EditorOptions::default();
        let mut arena = ShapeArena::new();
        let a = arena
            .create(&mut scene, ShapeConfig::filled(&options, 1), &[Vec3::ZERO], 0.5, &options)
            .expect("Form");
        let b = arena
            .create(&mut scene, ShapeConfig::filled(&options, 2), &[Vec3::ONE], 0.5, &options)
            .expect("Form");
        assert_eq!(a, ShapeId(1));
        assert_eq!(b, ShapeId(2));
        assert_eq!(arena.ids(), vec![a, b]);
    }

    #[test]
    fn test_failed_create_does_not_consume_id() {
        let mut scene = Scene::new();
        let options = EditorOptions::default();
        let mut arena = ShapeArena::new();
        assert!(arena
            .create(&mut scene, ShapeConfig::filled(&options, 1), &[], 0.5, &options)
            .is_err());
        assert_eq!(arena.next_id(), ShapeId(1));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_shape_of_handle_finds_center_and_control_points() {
        let mut scene = Scene::new();
        let options = EditorOptions::default();
        let mut arena = ShapeArena::new();
        let id = arena
            .create(
                &mut scene,
                ShapeConfig::wall(&options, 1),
                &[Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)],
                0.5,
                &options,
            )
            .expect("Form");
        let shape = arena.get(id).expect("Form");
        let center = shape.center_point();
        let point = shape.control_points()[1];
        let mesh = shape.mesh();
        assert_eq!(arena.shape_of_handle(center), Some(id));
        assert_eq!(arena.shape_of_handle(point), Some(id));
        assert_eq!(arena.shape_of_handle(mesh), None);
    }
}
