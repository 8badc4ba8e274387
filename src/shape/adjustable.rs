//! Eine verstellbare Form: Kontrollpunkte, Mittelpunkt, Kurvenlinie und Mesh.

use super::curve::{build_curve, CurveConfig, SampledCurve};
use super::error::ShapeError;
use super::extrude::{ExtrudeMode, MeshExtruder};
use super::ShapeId;
use crate::core::point::{create_point_sized, CENTER_POINT_NAME, CONTROL_POINT_NAME};
use crate::core::{centroid, Geometry, ObjectId, ObjectKind, Scene};
use crate::shared::spline_geometry::CurveType;
use crate::shared::EditorOptions;
use glam::Vec3;

/// Objektname der Form-Gruppe.
pub const SHAPE_GROUP_NAME: &str = "adjustableShape";
/// Objektname des extrudierten Meshes (auch bei gefüllten Formen).
pub const WALL_NAME: &str = "Wall";
/// Objektname der Kurvenlinie.
pub const CURVE_LINE_NAME: &str = "curveLine";

/// Konfiguration einer Form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeConfig {
    pub mode: ExtrudeMode,
    pub closed: bool,
    pub curve_type: CurveType,
    pub reduce_boundary: bool,
    pub concavity: f32,
    /// Basis-Abtastung (Wände: pro Kontrollpunkt)
    pub samples: usize,
    pub elevation: f32,
    /// Gruppen-ID in den Kontrollpunkt-Userdaten
    pub group_id: u64,
}

impl ShapeConfig {
    /// Geschlossene, gefüllte Form mit den Werten aus den Optionen.
    pub fn filled(options: &EditorOptions, group_id: u64) -> Self {
        Self {
            mode: ExtrudeMode::Filled {
                depth: options.filled_depth,
            },
            closed: true,
            curve_type: CurveType::CatmullRom,
            reduce_boundary: true,
            concavity: options.concavity,
            samples: options.curve_samples,
            elevation: options.curve_elevation,
            group_id,
        }
    }

    /// Offenes Wandband mit den Werten aus den Optionen.
    pub fn wall(options: &EditorOptions, group_id: u64) -> Self {
        Self {
            mode: ExtrudeMode::Wall {
                height: options.wall_height,
                thickness: options.wall_thickness,
            },
            closed: false,
            ..Self::filled(options, group_id)
        }
    }

    /// Kurvenparameter für `control_points` Kontrollpunkte.
    pub fn curve_config(&self, control_points: usize) -> CurveConfig {
        let divisions = match self.mode {
            ExtrudeMode::Filled { .. } => self.samples,
            ExtrudeMode::Wall { .. } => self.samples * control_points.max(1),
        };
        CurveConfig {
            closed: self.closed,
            curve_type: self.curve_type,
            reduce_boundary: self.reduce_boundary,
            concavity: self.concavity,
            divisions,
            elevation: self.elevation,
        }
    }
}

/// Zustand einer Form in der Szene.
#[derive(Debug)]
pub struct AdjustableShape {
    id: ShapeId,
    config: ShapeConfig,
    group: ObjectId,
    mesh: ObjectId,
    curve_line: ObjectId,
    center_point: ObjectId,
    control_points: Vec<ObjectId>,
    extruder: MeshExtruder,
    marker_size: Vec3,
    control_point_color: [f32; 4],
}

impl AdjustableShape {
    /// Legt alle Objekte der Form an und baut Kurve und Mesh.
    pub fn new(
        scene: &mut Scene,
        id: ShapeId,
        config: ShapeConfig,
        positions: &[Vec3],
        tension: f32,
        options: &EditorOptions,
    ) -> Result<Self, ShapeError> {
        let center = centroid(positions).ok_or(ShapeError::NoControlPoints)?;

        let group = scene.add_object(SHAPE_GROUP_NAME, ObjectKind::Group, Vec3::ZERO, None);
        let mesh = scene.add_object(
            WALL_NAME,
            ObjectKind::Mesh,
            Vec3::ZERO,
            Some(Geometry::empty_mesh()),
        );
        let curve_line = scene.add_object(
            CURVE_LINE_NAME,
            ObjectKind::Line,
            Vec3::ZERO,
            Some(Geometry::empty_line()),
        );
        let center_point = create_point_sized(
            scene,
            center,
            options.marker_size,
            Some(options.center_point_color),
            Some(CENTER_POINT_NAME),
        );

        if let Some(object) = scene.get_mut(mesh) {
            object.cast_shadow = true;
            object.color = options.mesh_color;
        }
        if let Some(object) = scene.get_mut(curve_line) {
            object.color = options.curve_color;
        }
        for child in [mesh, curve_line, center_point] {
            scene.attach(group, child);
        }

        let mut shape = Self {
            id,
            config,
            group,
            mesh,
            curve_line,
            center_point,
            control_points: Vec::with_capacity(positions.len()),
            extruder: MeshExtruder::new(config.mode),
            marker_size: options.marker_size,
            control_point_color: options.control_point_color,
        };
        for position in positions {
            shape.spawn_control_point(scene, *position);
        }

        shape.update_shape(scene, tension);
        log::info!(
            "Form {} mit {} Kontrollpunkten angelegt ({:?})",
            id,
            positions.len(),
            config.mode
        );
        Ok(shape)
    }

    fn spawn_control_point(&mut self, scene: &mut Scene, position: Vec3) -> ObjectId {
        let point = create_point_sized(
            scene,
            position,
            self.marker_size,
            Some(self.control_point_color),
            Some(CONTROL_POINT_NAME),
        );
        if let Some(object) = scene.get_mut(point) {
            object.user_data.group_id = Some(self.config.group_id);
        }
        scene.attach(self.group, point);
        self.control_points.push(point);
        point
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Gruppenobjekt (`adjustableShape`).
    pub fn group(&self) -> ObjectId {
        self.group
    }

    /// Mesh-Objekt (`Wall`).
    pub fn mesh(&self) -> ObjectId {
        self.mesh
    }

    pub fn curve_line(&self) -> ObjectId {
        self.curve_line
    }

    pub fn center_point(&self) -> ObjectId {
        self.center_point
    }

    pub fn control_points(&self) -> &[ObjectId] {
        &self.control_points
    }

    pub fn contains_control_point(&self, id: ObjectId) -> bool {
        self.control_points.contains(&id)
    }

    /// `true` für Kontrollpunkte und den Mittelpunkt dieser Form.
    pub fn owns_handle(&self, id: ObjectId) -> bool {
        id == self.center_point || self.contains_control_point(id)
    }

    /// Gruppen-ID der Gruppe (vom ersten Kontrollpunkt übernommen).
    pub fn group_id(&self, scene: &Scene) -> Option<u64> {
        scene.get(self.group).and_then(|g| g.user_data.group_id)
    }

    /// Aktuelle Kontrollpunkt-Positionen.
    pub fn control_point_positions(&self, scene: &Scene) -> Vec<Vec3> {
        self.control_points
            .iter()
            .filter_map(|id| scene.position(*id))
            .collect()
    }

    /// Aktuelle Kurvenpunkte aus der Kurvenlinie.
    pub fn curve(&self, scene: &Scene) -> Option<SampledCurve> {
        let points = scene.geometry_of(self.curve_line)?.as_line()?;
        (points.len() >= 2).then(|| SampledCurve {
            points: points.to_vec(),
            closed: self.config.closed,
        })
    }

    /// Baut Mittelpunkt, Kurvenlinie und Mesh aus den Kontrollpunkten neu.
    pub fn update_shape(&mut self, scene: &mut Scene, tension: f32) {
        let positions = self.control_point_positions(scene);

        if let Some(center) = centroid(&positions) {
            scene.set_position(self.center_point, center);
        }
        let group_id = self
            .control_points
            .first()
            .and_then(|id| scene.get(*id))
            .and_then(|p| p.user_data.group_id);
        if let Some(group) = scene.get_mut(self.group) {
            group.user_data.group_id = group_id;
        }

        let curve_config = self.config.curve_config(positions.len());
        let line = match build_curve(&positions, tension, &curve_config) {
            Ok(curve) => Geometry::Line(curve.points),
            Err(e) => {
                log::debug!("Form {}: keine Kurve ({})", self.id, e);
                Geometry::empty_line()
            }
        };
        scene.replace_geometry(self.curve_line, line);

        self.extrude_mesh(scene);
    }

    /// Extrudiert das Mesh aus der aktuellen Kurvenlinie neu.
    pub fn extrude_mesh(&mut self, scene: &mut Scene) {
        let geometry = match self.curve(scene) {
            Some(curve) => match self.extruder.extrude(&curve) {
                Ok(mesh) => Geometry::Mesh(mesh),
                Err(e) => {
                    log::debug!("Form {}: leeres Mesh ({})", self.id, e);
                    Geometry::empty_mesh()
                }
            },
            None => Geometry::empty_mesh(),
        };
        scene.replace_geometry(self.mesh, geometry);
        scene.shadow.mark_geometry_changed();
    }

    /// Verschiebt einen Kontrollpunkt (ohne Rebuild).
    pub fn move_control_point(
        &self,
        scene: &mut Scene,
        point: ObjectId,
        position: Vec3,
    ) -> Result<(), ShapeError> {
        if !self.contains_control_point(point) {
            return Err(ShapeError::UnknownPoint(point));
        }
        scene.set_position(point, position);
        Ok(())
    }

    /// Starre Verschiebung: alle Kontrollpunkte auf `height`, X/Z um `delta` versetzt.
    pub fn translate(&self, scene: &mut Scene, delta: Vec3, height: f32) {
        for id in &self.control_points {
            if let Some(object) = scene.get_mut(*id) {
                object.position = Vec3::new(
                    object.position.x + delta.x,
                    height,
                    object.position.z + delta.z,
                );
            }
        }
    }

    /// Fügt einen Kontrollpunkt hinzu und baut neu.
    pub fn add_control_point(&mut self, scene: &mut Scene, position: Vec3, tension: f32) -> ObjectId {
        let point = self.spawn_control_point(scene, position);
        self.update_shape(scene, tension);
        point
    }

    /// Entfernt einen Kontrollpunkt (Geometrie wird freigegeben) und baut neu.
    pub fn remove_control_point(
        &mut self,
        scene: &mut Scene,
        point: ObjectId,
        tension: f32,
    ) -> Result<(), ShapeError> {
        let index = self
            .control_points
            .iter()
            .position(|id| *id == point)
            .ok_or(ShapeError::UnknownPoint(point))?;
        if self.control_points.len() == 1 {
            return Err(ShapeError::LastControlPoint);
        }
        self.control_points.remove(index);
        scene.remove_object(point);
        self.update_shape(scene, tension);
        Ok(())
    }

    /// Entfernt alle Objekte der Form aus der Szene.
    pub fn dispose(self, scene: &mut Scene) {
        scene.remove_object(self.group);
        log::info!("Form {} entfernt", self.id);
    }
}
