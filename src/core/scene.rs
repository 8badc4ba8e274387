//! Retained-Mode-Szenengraph: Objekte, Hierarchie, Geometrie und Raycasting.

use super::geometry::{Geometry, GeometryId, GeometryStore};
use super::ray::{ray_aabb, Aabb, Ray};
use glam::Vec3;
use indexmap::IndexMap;

/// Stabile ID eines Szenenobjekts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Roh-Wert (für abgeleitete Namen wie `sourceLight-{id}`).
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Art eines Szenenobjekts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectKind {
    /// Container ohne eigene Geometrie
    Group,
    /// Punkt-Marker (Box)
    Marker,
    /// Linienzug
    Line,
    /// Dreiecksnetz
    Mesh,
    /// Punktlicht mit kugelförmigem Treffervolumen
    Light { hit_radius: f32 },
    /// Sichtbarer Stellvertreter einer Lichtquelle
    Bulb,
}

/// Frei belegbare Zusatzdaten.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UserData {
    /// Gruppen-ID der zugehörigen Form
    pub group_id: Option<u64>,
    /// Avatar-Auswahl
    pub selected: bool,
}

/// Ein Objekt im Szenengraph.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    /// Lokale Position relativ zum Parent
    pub position: Vec3,
    pub visible: bool,
    pub cast_shadow: bool,
    pub color: [f32; 4],
    pub geometry: Option<GeometryId>,
    pub parent: Option<ObjectId>,
    pub children: Vec<ObjectId>,
    pub user_data: UserData,
}

/// Treffer eines Raycasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub object: ObjectId,
    pub distance: f32,
    pub point: Vec3,
}

/// Schattenkarten-Zustand.
///
/// Während eines Drags wird die Karte laufend aktualisiert, danach eingefroren
/// und nur noch bei Geometrieänderungen einmalig neu berechnet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadowMap {
    /// Kontinuierliche Aktualisierung (nur während Drags)
    pub auto_update: bool,
    /// Einmalige Aktualisierung beim nächsten Frame
    pub needs_update: bool,
    /// Zähler für schattenrelevante Geometrieänderungen
    pub revision: u64,
}

impl ShadowMap {
    /// Meldet geänderte schattenwerfende Geometrie.
    pub fn mark_geometry_changed(&mut self) {
        self.needs_update = true;
        self.revision += 1;
    }

    /// Schaltet auf laufende Aktualisierung (Drag-Beginn).
    pub fn begin_live_updates(&mut self) {
        self.auto_update = true;
    }

    /// Friert die Schattenkarte ein und fordert eine letzte Aktualisierung an.
    pub fn freeze(&mut self) {
        self.auto_update = false;
        self.needs_update = true;
    }

    /// Vom Renderer nach einem Schatten-Pass aufzurufen.
    pub fn consume_update(&mut self) -> bool {
        let update = self.auto_update || self.needs_update;
        self.needs_update = false;
        update
    }
}

/// Szenengraph als Arena über `ObjectId`.
#[derive(Debug, Default)]
pub struct Scene {
    objects: IndexMap<ObjectId, SceneObject>,
    next_id: u64,
    pub geometries: GeometryStore,
    pub shadow: ShadowMap,
}

impl Scene {
    /// Erstellt eine leere Szene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Legt ein Objekt auf Root-Ebene an.
    pub fn add_object(
        &mut self,
        name: &str,
        kind: ObjectKind,
        position: Vec3,
        geometry: Option<Geometry>,
    ) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        let geometry = geometry.map(|g| self.geometries.insert(g));
        self.objects.insert(
            id,
            SceneObject {
                id,
                name: name.to_string(),
                kind,
                position,
                visible: true,
                cast_shadow: false,
                color: [1.0, 1.0, 1.0, 1.0],
                geometry,
                parent: None,
                children: Vec::new(),
                user_data: UserData::default(),
            },
        );
        id
    }

    /// Hängt `child` unter `parent` (löst ihn vorher vom alten Parent).
    pub fn attach(&mut self, parent: ObjectId, child: ObjectId) -> bool {
        if parent == child || !self.objects.contains_key(&parent) {
            return false;
        }
        let Some(old_parent) = self.objects.get(&child).map(|c| c.parent) else {
            return false;
        };
        if old_parent == Some(parent) {
            return true;
        }
        if let Some(old) = old_parent.and_then(|p| self.objects.get_mut(&p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(p) = self.objects.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.objects.get_mut(&child) {
            c.parent = Some(parent);
        }
        true
    }

    /// Entfernt ein Objekt samt Kindern und gibt deren Geometrie frei.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.objects.shift_remove(&id) else {
            return false;
        };
        if let Some(parent) = object.parent.and_then(|p| self.objects.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        if let Some(geometry) = object.geometry {
            self.geometries.dispose(geometry);
        }
        for child in object.children {
            // Parent ist bereits entfernt, Kind direkt abräumen
            if let Some(c) = self.objects.get_mut(&child) {
                c.parent = None;
            }
            self.remove_object(child);
        }
        true
    }

    /// Ersetzt die Geometrie eines Objekts; die alte wird vorher freigegeben.
    pub fn replace_geometry(&mut self, id: ObjectId, geometry: Geometry) -> bool {
        let Some(old) = self.objects.get(&id).map(|o| o.geometry) else {
            return false;
        };
        if let Some(old) = old {
            self.geometries.dispose(old);
        }
        let new_id = self.geometries.insert(geometry);
        if let Some(object) = self.objects.get_mut(&id) {
            object.geometry = Some(new_id);
        }
        true
    }

    /// Read-only Zugriff auf ein Objekt.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Mutable Zugriff auf ein Objekt.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// `true` wenn das Objekt existiert.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Anzahl der Objekte.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// `true` wenn die Szene leer ist.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iteriert in Einfügereihenfolge über alle Objekte.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Alle Objekte mit exakt diesem Namen (Einfügereihenfolge).
    pub fn objects_named(&self, name: &str) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|o| o.name == name)
            .map(|o| o.id)
            .collect()
    }

    /// Erstes Objekt mit diesem Namen.
    pub fn object_named(&self, name: &str) -> Option<ObjectId> {
        self.objects.values().find(|o| o.name == name).map(|o| o.id)
    }

    /// Lokale Position.
    pub fn position(&self, id: ObjectId) -> Option<Vec3> {
        self.objects.get(&id).map(|o| o.position)
    }

    /// Setzt die lokale Position.
    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.position = position;
                true
            }
            None => false,
        }
    }

    /// Setzt die Sichtbarkeit.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Weltposition (Summe der Parent-Positionen).
    pub fn world_position(&self, id: ObjectId) -> Option<Vec3> {
        let mut object = self.objects.get(&id)?;
        let mut position = object.position;
        while let Some(parent) = object.parent.and_then(|p| self.objects.get(&p)) {
            position += parent.position;
            object = parent;
        }
        Some(position)
    }

    /// Geometrie eines Objekts.
    pub fn geometry_of(&self, id: ObjectId) -> Option<&Geometry> {
        self.objects
            .get(&id)
            .and_then(|o| o.geometry)
            .and_then(|g| self.geometries.get(g))
    }

    /// Strahltest gegen `candidates`, sortiert nach Abstand.
    ///
    /// Sichtbarkeit wird bewusst ignoriert: ausgeblendete Lichter müssen wieder
    /// getroffen werden können. Linien und Gruppen sind nicht treffbar.
    pub fn raycast(&self, ray: &Ray, near: f32, far: f32, candidates: &[ObjectId]) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = candidates
            .iter()
            .filter_map(|id| {
                let distance = self.intersect_object(ray, *id)?;
                (distance >= near && distance <= far).then(|| RayHit {
                    object: *id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn intersect_object(&self, ray: &Ray, id: ObjectId) -> Option<f32> {
        let object = self.objects.get(&id)?;
        let origin = self.world_position(id)?;
        match object.kind {
            ObjectKind::Light { hit_radius } => ray_aabb(ray, &Aabb::around(origin, hit_radius)),
            ObjectKind::Marker | ObjectKind::Mesh | ObjectKind::Bulb => self
                .geometry_of(id)
                .and_then(Geometry::as_mesh)
                .and_then(|mesh| mesh.raycast(ray, origin)),
            ObjectKind::Group | ObjectKind::Line => None,
        }
    }
}
