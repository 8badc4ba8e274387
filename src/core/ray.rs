//! Strahlen, Ebenen und Schnitt-Tests für Picking und Sichtbarkeit.

use glam::Vec3;

/// Ein Strahl im Weltraum (Richtung normiert).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Erstellt einen Strahl; die Richtung wird normiert.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Strahl von `from` in Richtung `to`.
    pub fn towards(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    /// Punkt im Abstand `t` entlang des Strahls.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Schnittpunkt mit einer Ebene (nur vor dem Ursprung).
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        let denominator = plane.normal.dot(self.direction);
        if denominator.abs() < f32::EPSILON {
            // Parallel: nur wenn der Ursprung in der Ebene liegt
            return (plane.distance_to_point(self.origin).abs() < f32::EPSILON)
                .then_some(self.origin);
        }
        let t = -(self.origin.dot(plane.normal) + plane.constant) / denominator;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// Ebene in Hesse-Form: `normal · p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    /// Ebene durch `point` mit Normale `normal`.
    pub fn from_normal_and_coplanar_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }

    /// Horizontale Ebene (Normale +Y) durch `point`.
    pub fn horizontal_through(point: Vec3) -> Self {
        Self::from_normal_and_coplanar_point(Vec3::Y, point)
    }

    /// Vorzeichenbehafteter Abstand eines Punkts zur Ebene.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

/// Achsenparallele Bounding-Box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box um alle Punkte; `None` bei leerer Eingabe.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Würfel mit Halbkantenlänge `radius` um `center`.
    pub fn around(center: Vec3, radius: f32) -> Self {
        Self {
            min: center - Vec3::splat(radius),
            max: center + Vec3::splat(radius),
        }
    }

    /// Verschobene Kopie.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Mittelpunkt der Box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB-Schnitt per Slab-Methode.
/// Liefert den Abstand zum nächsten Treffer oder `None`.
///
/// Achsen, zu denen der Strahl parallel läuft, zählen als getroffen, solange
/// der Ursprung innerhalb (inklusive Rand) der Slab liegt.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];
        if direction.abs() < f32::EPSILON {
            if origin < aabb.min[axis] || origin > aabb.max[axis] {
                return None;
            }
            continue;
        }
        let inv = direction.recip();
        let t1 = (aabb.min[axis] - origin) * inv;
        let t2 = (aabb.max[axis] - origin) * inv;
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore Ray-Dreieck-Schnitt.
///
/// Kanten werden mit einer kleinen Toleranz als Treffer gewertet, damit Strahlen
/// entlang einer Wand-Unterkante nicht durchrutschen.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;
    const EDGE_TOLERANCE: f32 = 1e-5;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Strahl parallel zum Dreieck
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(-EDGE_TOLERANCE..=1.0 + EDGE_TOLERANCE).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < -EDGE_TOLERANCE || u + v > 1.0 + EDGE_TOLERANCE {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_intersect_horizontal_plane() {
        let ray = Ray::new(Vec3::new(30.0, 100.0, 40.0), Vec3::NEG_Y);
        let plane = Plane::horizontal_through(Vec3::ZERO);
        let hit = ray.intersect_plane(&plane).expect("Treffer erwartet");
        assert_relative_eq!(hit.x, 30.0);
        assert_relative_eq!(hit.y, 0.0);
        assert_relative_eq!(hit.z, 40.0);
    }

    #[test]
    fn test_plane_behind_ray_is_missed() {
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        let plane = Plane::horizontal_through(Vec3::ZERO);
        assert!(ray.intersect_plane(&plane).is_none());
    }

    #[test]
    fn test_parallel_ray_misses_plane() {
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::X);
        let plane = Plane::horizontal_through(Vec3::ZERO);
        assert!(ray.intersect_plane(&plane).is_none());
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let aabb = Aabb::around(Vec3::new(0.0, 0.0, 100.0), 5.0);
        let hit = ray_aabb(&Ray::new(Vec3::ZERO, Vec3::Z), &aabb).expect("Treffer");
        assert_relative_eq!(hit, 95.0);
        assert!(ray_aabb(&Ray::new(Vec3::ZERO, Vec3::X), &aabb).is_none());
    }

    #[test]
    fn test_ray_on_box_face_plane_hits() {
        let aabb = Aabb {
            min: Vec3::new(-10.0, 0.0, 40.0),
            max: Vec3::new(10.0, 40.0, 60.0),
        };
        let hit = ray_aabb(&Ray::new(Vec3::ZERO, Vec3::Z), &aabb).expect("Treffer");
        assert_relative_eq!(hit, 40.0);
    }

    #[test]
    fn test_ray_triangle_hit_distance() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = ray_triangle_intersect(
            &ray,
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        )
        .expect("Treffer erwartet");
        assert_relative_eq!(t, 5.0);
    }

    #[test]
    fn test_ray_triangle_edge_counts_as_hit() {
        // Strahl exakt auf der Unterkante
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = ray_triangle_intersect(
            &ray,
            Vec3::new(-10.0, 0.0, 5.0),
            Vec3::new(10.0, 0.0, 5.0),
            Vec3::new(10.0, 20.0, 5.0),
        );
        assert!(t.is_some());
    }

    #[test]
    fn test_ray_triangle_behind_origin_is_missed() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = ray_triangle_intersect(
            &ray,
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        );
        assert!(t.is_none());
    }
}
