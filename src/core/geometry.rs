//! Geometrie-Puffer der Szene mit expliziter Freigabe.
//!
//! Jede Geometrie liegt unter einer `GeometryId` im `GeometryStore`. Wer eine
//! Geometrie ersetzt, muss die alte per `dispose` freigeben. Der Store zählt
//! lebende und freigegebene Puffer, damit Lecks in Tests sichtbar werden.

use super::ray::{ray_triangle_intersect, Aabb, Ray};
use glam::Vec3;
use std::collections::HashMap;

/// Indiziertes Dreiecksnetz.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshGeometry {
    /// Leeres Netz.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` wenn keine Dreiecke vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Anzahl Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Fügt ein Dreieck aus drei Vertex-Indizes hinzu.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Fügt ein Viereck (a, b, c, d gegen den Uhrzeigersinn) als zwei Dreiecke hinzu.
    pub fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// Iteriert über alle Dreiecke als Eckpunkt-Tripel.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                *self.positions.get(tri[0] as usize)?,
                *self.positions.get(tri[1] as usize)?,
                *self.positions.get(tri[2] as usize)?,
            ])
        })
    }

    /// Bounding-Box aller Vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Nächster Dreieckstreffer eines Strahls; `offset` verschiebt das Netz in Weltkoordinaten.
    pub fn raycast(&self, ray: &Ray, offset: Vec3) -> Option<f32> {
        let bounds = self.bounds()?.translated(offset);
        super::ray::ray_aabb(ray, &bounds)?;

        self.triangles()
            .filter_map(|[a, b, c]| ray_triangle_intersect(ray, a + offset, b + offset, c + offset))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Box-Geometrie mit Kantenlängen `size`, zentriert um `center`.
pub fn box_geometry(size: Vec3, center: Vec3) -> MeshGeometry {
    let h = size * 0.5;
    let corners = [
        Vec3::new(-h.x, -h.y, -h.z),
        Vec3::new(h.x, -h.y, -h.z),
        Vec3::new(h.x, h.y, -h.z),
        Vec3::new(-h.x, h.y, -h.z),
        Vec3::new(-h.x, -h.y, h.z),
        Vec3::new(h.x, -h.y, h.z),
        Vec3::new(h.x, h.y, h.z),
        Vec3::new(-h.x, h.y, h.z),
    ];

    let mut mesh = MeshGeometry {
        positions: corners.iter().map(|c| *c + center).collect(),
        indices: Vec::with_capacity(36),
    };
    // -Z, +Z, -X, +X, -Y, +Y
    mesh.push_quad(0, 3, 2, 1);
    mesh.push_quad(4, 5, 6, 7);
    mesh.push_quad(0, 4, 7, 3);
    mesh.push_quad(1, 2, 6, 5);
    mesh.push_quad(0, 1, 5, 4);
    mesh.push_quad(3, 7, 6, 2);
    mesh
}

/// Inhalt eines Geometrie-Slots.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Dreiecksnetz (Marker, Wände, Böden)
    Mesh(MeshGeometry),
    /// Linienzug (Kurvenlinie)
    Line(Vec<Vec3>),
}

impl Geometry {
    /// Leere Linie als Platzhalter für degenerierte Kurven.
    pub fn empty_line() -> Self {
        Geometry::Line(Vec::new())
    }

    /// Leeres Netz als Platzhalter für degenerierte Meshes.
    pub fn empty_mesh() -> Self {
        Geometry::Mesh(MeshGeometry::new())
    }

    /// `true` wenn die Geometrie nichts darstellt.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Mesh(mesh) => mesh.is_empty(),
            Geometry::Line(points) => points.len() < 2,
        }
    }

    /// Netz-Sicht, falls es sich um ein Dreiecksnetz handelt.
    pub fn as_mesh(&self) -> Option<&MeshGeometry> {
        match self {
            Geometry::Mesh(mesh) => Some(mesh),
            Geometry::Line(_) => None,
        }
    }

    /// Linien-Sicht, falls es sich um einen Linienzug handelt.
    pub fn as_line(&self) -> Option<&[Vec3]> {
        match self {
            Geometry::Line(points) => Some(points),
            Geometry::Mesh(_) => None,
        }
    }
}

/// Handle auf einen Geometrie-Slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(u64);

/// Verwaltet alle Geometrie-Puffer der Szene.
#[derive(Debug, Default)]
pub struct GeometryStore {
    slots: HashMap<GeometryId, Geometry>,
    next_id: u64,
    disposed: u64,
}

impl GeometryStore {
    /// Erstellt einen leeren Store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Legt eine neue Geometrie an.
    pub fn insert(&mut self, geometry: Geometry) -> GeometryId {
        self.next_id += 1;
        let id = GeometryId(self.next_id);
        self.slots.insert(id, geometry);
        id
    }

    /// Read-only Zugriff.
    pub fn get(&self, id: GeometryId) -> Option<&Geometry> {
        self.slots.get(&id)
    }

    /// Gibt eine Geometrie frei. `false` wenn sie bereits freigegeben war.
    pub fn dispose(&mut self, id: GeometryId) -> bool {
        if self.slots.remove(&id).is_some() {
            self.disposed += 1;
            true
        } else {
            log::warn!("Geometrie {:?} war bereits freigegeben", id);
            false
        }
    }

    /// Anzahl lebender Puffer.
    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    /// Anzahl bisher freigegebener Puffer.
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }
}
