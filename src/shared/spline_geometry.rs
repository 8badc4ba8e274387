//! Reine Geometrie-Funktionen für Catmull-Rom-Splines.
//!
//! Layer-neutral: kann von `shape`, `app` und anderen Layer-übergreifenden
//! Modulen importiert werden ohne Zirkel-Abhängigkeiten zu erzeugen.

use glam::Vec3;

/// Parametrisierung der Catmull-Rom-Kurve.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub enum CurveType {
    /// Uniforme Parametrisierung mit Tension-Faktor
    #[default]
    CatmullRom,
    /// Zentripetal (Exponent 0.25 auf den quadrierten Abstand)
    Centripetal,
    /// Chordal (Exponent 0.5 auf den quadrierten Abstand)
    Chordal,
}

/// Kubische Hermite-Koeffizienten eines Segments.
#[derive(Debug, Clone, Copy)]
struct CubicPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicPoly {
    /// Hermite-Form: Start `x0`, Ende `x1`, Tangenten `t0`, `t1`.
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, tension: f32) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    fn nonuniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let mut t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let mut t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
        // Tangenten auf [0, 1] des mittleren Segments umskalieren
        t1 *= dt1;
        t2 *= dt1;
        Self::hermite(p1, p2, t1, t2)
    }

    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

/// Catmull-Rom-Kurve durch eine geordnete Punktfolge.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    closed: bool,
    curve_type: CurveType,
    tension: f32,
}

impl CatmullRomCurve {
    /// Erstellt eine Kurve. Weniger als 2 Punkte liefern beim Abtasten nur die Punkte selbst.
    pub fn new(points: Vec<Vec3>, closed: bool, curve_type: CurveType, tension: f32) -> Self {
        Self {
            points,
            closed,
            curve_type,
            tension,
        }
    }

    /// Anzahl der Stützpunkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` wenn keine Stützpunkte vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Punkt auf der Kurve für `t ∈ [0, 1]` (parametrisch, nicht nach Bogenlänge).
    pub fn point_at(&self, t: f32) -> Vec3 {
        let points = &self.points;
        let l = points.len();
        match l {
            0 => return Vec3::ZERO,
            1 => return points[0],
            _ => {}
        }

        let segments = if self.closed { l } else { l - 1 };
        let p = segments as f32 * t.clamp(0.0, 1.0);
        let mut int_point = p.floor() as usize;
        let mut weight = p - int_point as f32;

        if self.closed {
            int_point %= l;
        } else if int_point >= l - 1 {
            // Endpunkt: letztes Segment mit Gewicht 1
            int_point = l - 2;
            weight = 1.0;
        }

        let p0 = if self.closed || int_point > 0 {
            points[(int_point + l - 1) % l]
        } else {
            // Phantom-Punkt vor dem Start spiegeln
            2.0 * points[0] - points[1]
        };
        let p1 = points[int_point % l];
        let p2 = points[(int_point + 1) % l];
        let p3 = if self.closed || int_point + 2 < l {
            points[(int_point + 2) % l]
        } else {
            2.0 * points[l - 1] - points[l - 2]
        };

        let poly = match self.curve_type {
            CurveType::CatmullRom => CubicPoly::uniform(p0, p1, p2, p3, self.tension),
            CurveType::Centripetal | CurveType::Chordal => {
                let pow = if self.curve_type == CurveType::Chordal {
                    0.5
                } else {
                    0.25
                };
                let mut dt0 = p0.distance_squared(p1).powf(pow);
                let mut dt1 = p1.distance_squared(p2).powf(pow);
                let mut dt2 = p2.distance_squared(p3).powf(pow);

                // Doppelte Punkte abfangen
                if dt1 < 1e-4 {
                    dt1 = 1.0;
                }
                if dt0 < 1e-4 {
                    dt0 = dt1;
                }
                if dt2 < 1e-4 {
                    dt2 = dt1;
                }
                CubicPoly::nonuniform(p0, p1, p2, p3, dt0, dt1, dt2)
            }
        };

        poly.eval(weight)
    }

    /// Tastet die Kurve in `divisions` gleichen Parameterschritten ab (`divisions + 1` Punkte).
    ///
    /// Bei geschlossenen Kurven ist der letzte Punkt identisch mit dem ersten.
    pub fn sample_points(&self, divisions: usize) -> Vec<Vec3> {
        if self.points.len() < 2 {
            return self.points.clone();
        }
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point_at(d as f32 / divisions as f32))
            .collect()
    }
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 100.0),
            Vec3::new(0.0, 0.0, 100.0),
        ]
    }

    #[test]
    fn test_open_curve_passes_through_endpoints() {
        let curve = CatmullRomCurve::new(square(), false, CurveType::CatmullRom, 0.5);
        let start = curve.point_at(0.0);
        let end = curve.point_at(1.0);
        assert!((start - Vec3::ZERO).length() < 1e-4);
        assert!((end - Vec3::new(0.0, 0.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_closed_curve_sample_count_and_wrap() {
        let curve = CatmullRomCurve::new(square(), true, CurveType::CatmullRom, 0.5);
        let samples = curve.sample_points(75);
        assert_eq!(samples.len(), 76);
        let first = samples[0];
        let last = samples[samples.len() - 1];
        assert!((first - last).length() < 1e-3);
    }

    #[test]
    fn test_curve_hits_control_points_at_segment_boundaries() {
        let pts = square();
        for curve_type in [CurveType::CatmullRom, CurveType::Centripetal, CurveType::Chordal] {
            let curve = CatmullRomCurve::new(pts.clone(), true, curve_type, 0.5);
            for (i, p) in pts.iter().enumerate() {
                let q = curve.point_at(i as f32 / pts.len() as f32);
                assert!((q - *p).length() < 1e-3, "{curve_type:?} Punkt {i}");
            }
        }
    }

    #[test]
    fn test_zero_tension_gives_straight_segments() {
        let pts = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
        ];
        let curve = CatmullRomCurve::new(pts, false, CurveType::CatmullRom, 0.0);
        // Mitte des ersten Segments liegt auf der Geraden
        let mid = curve.point_at(0.25);
        assert_relative_eq!(mid.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(mid.x, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sampling_fewer_than_two_points_returns_input() {
        let curve = CatmullRomCurve::new(vec![Vec3::ONE], true, CurveType::CatmullRom, 0.5);
        assert_eq!(curve.sample_points(75), vec![Vec3::ONE]);
    }

    #[test]
    fn test_polyline_length() {
        let pts = vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0), Vec3::new(3.0, 0.0, 10.0)];
        assert_relative_eq!(polyline_length(&pts), 11.0);
    }
}
