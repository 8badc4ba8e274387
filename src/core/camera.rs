//! Perspektivische Orbit-Kamera mit Screen↔Welt-Umrechnung.

use super::ray::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Orbit-Kamera um einen Zielpunkt
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Zielpunkt, um den die Kamera kreist
    pub target: Vec3,
    /// Horizontaler Winkel (Radiant)
    pub yaw: f32,
    /// Vertikaler Winkel über der Bodenebene (Radiant)
    pub pitch: f32,
    /// Abstand zum Zielpunkt
    pub distance: f32,
    /// Vertikaler Öffnungswinkel (Radiant)
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera3D {
    /// Minimaler Abstand zum Ziel.
    pub const DISTANCE_MIN: f32 = 50.0;
    /// Maximaler Abstand zum Ziel.
    pub const DISTANCE_MAX: f32 = 5000.0;
    /// Pitch-Grenze, damit die Kamera nicht über den Pol kippt.
    pub const PITCH_LIMIT: f32 = 1.55;

    /// Erstellt eine neue Kamera (schräg von oben auf den Ursprung)
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.9,
            distance: 800.0,
            fov_y: 45f32.to_radians(),
            near: 1.0,
            far: 10_000.0,
        }
    }

    /// Weltposition der Kamera
    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    /// Dreht die Kamera um das Ziel
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Ändert den Abstand (Faktor < 1 = näher)
    pub fn zoom_by(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(Self::DISTANCE_MIN, Self::DISTANCE_MAX);
    }

    /// View-Projection-Matrix für ein Viewport-Seitenverhältnis
    pub fn view_projection(&self, viewport: Vec2) -> Mat4 {
        let aspect = viewport.x / viewport.y.max(1.0);
        let projection = Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        projection * view
    }

    /// Strahl durch einen Bildschirmpunkt (Client-Koordinaten, Ursprung oben links).
    pub fn ray_from_client(&self, client: Vec2, viewport: Vec2) -> Ray {
        let ndc = Vec2::new(
            (client.x / viewport.x.max(1.0)) * 2.0 - 1.0,
            -(client.y / viewport.y.max(1.0)) * 2.0 + 1.0,
        );
        let inverse = self.view_projection(viewport).inverse();
        let far_point = inverse.project_point3(ndc.extend(1.0));
        let origin = self.position();
        Ray::new(origin, far_point - origin)
    }

    /// Projiziert einen Weltpunkt in Client-Koordinaten; `None` hinter der Kamera.
    pub fn project(&self, world: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_projection(viewport) * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new()
    }
}

/// Orbit-Steuerung; Rotation wird während Drags gesperrt.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Rotation per Maus erlaubt
    pub enable_rotate: bool,
    /// Radiant pro Pixel
    pub rotate_speed: f32,
}

impl OrbitControls {
    /// Erstellt die Steuerung (Rotation aktiv).
    pub fn new() -> Self {
        Self {
            enable_rotate: true,
            rotate_speed: 0.005,
        }
    }

    /// Dreht die Kamera um ein Pixel-Delta, sofern Rotation erlaubt ist.
    pub fn rotate(&self, camera: &mut Camera3D, delta_px: Vec2) -> bool {
        if !self.enable_rotate {
            return false;
        }
        camera.orbit(-delta_px.x * self.rotate_speed, delta_px.y * self.rotate_speed);
        true
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}
