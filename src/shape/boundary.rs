//! Reduktion einer ungeordneten Punktmenge auf eine Concave-Hull-Reihenfolge.

use geo::{ConcaveHull, MultiPoint, Point};
use glam::Vec2;

/// Punkte näher als diese Toleranz gelten als identisch.
const DISTINCT_TOLERANCE: f32 = 1e-4;

/// Entfernt (nahezu) doppelte Punkte, Reihenfolge bleibt erhalten.
pub fn distinct_points(points: &[Vec2]) -> Vec<Vec2> {
    let mut distinct: Vec<Vec2> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct
            .iter()
            .any(|q| q.distance_squared(*p) <= DISTINCT_TOLERANCE * DISTINCT_TOLERANCE)
        {
            distinct.push(*p);
        }
    }
    distinct
}

/// Ordnet `points` entlang ihrer Concave Hull (XZ-Ebene als `Vec2`).
///
/// Der schließende Duplikatpunkt der Hull wird immer entfernt. Offene Formen
/// beginnen am ersten Eingabepunkt und laufen in der Richtung, die der
/// Eingabereihenfolge am nächsten kommt. Weniger als 3 unterschiedliche oder
/// kollineare Punkte werden ohne Hull in Eingabereihenfolge geliefert.
pub fn reduce_boundary(points: &[Vec2], concavity: f32, closed: bool) -> Vec<Vec2> {
    let distinct = distinct_points(points);
    if distinct.len() < 3 || is_collinear(&distinct) {
        return distinct;
    }

    let multi: MultiPoint<f64> = distinct
        .iter()
        .map(|p| Point::new(p.x as f64, p.y as f64))
        .collect::<Vec<_>>()
        .into();
    let hull = multi.concave_hull(concavity as f64);

    let mut ring: Vec<Vec2> = hull
        .exterior()
        .coords()
        .map(|c| Vec2::new(c.x as f32, c.y as f32))
        .collect();

    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    if !closed {
        ring = open_along_input(ring, &distinct);
    }

    log::debug!("Hull-Reduktion: {} → {} Punkte", points.len(), ring.len());
    ring
}

/// `true` wenn alle Punkte (nahezu) auf einer Geraden liegen.
fn is_collinear(points: &[Vec2]) -> bool {
    let Some(&origin) = points.first() else {
        return true;
    };
    let Some(far) = points
        .iter()
        .copied()
        .max_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)))
    else {
        return true;
    };
    let axis = far - origin;
    let length_sq = axis.length_squared();
    if length_sq <= DISTINCT_TOLERANCE * DISTINCT_TOLERANCE {
        return true;
    }
    // Abstand zur Achse relativ zu deren Länge
    points
        .iter()
        .all(|p| axis.perp_dot(*p - origin).abs() <= 1e-4 * length_sq)
}

/// Schneidet den Hull-Ring am ersten Eingabepunkt auf.
///
/// Von beiden Laufrichtungen gewinnt die mit weniger Vertauschungen gegenüber
/// der Eingabereihenfolge, bei Gleichstand die Hull-Richtung.
fn open_along_input(mut ring: Vec<Vec2>, input: &[Vec2]) -> Vec<Vec2> {
    if ring.len() < 3 {
        return ring;
    }
    let index_of = |p: Vec2| {
        input
            .iter()
            .position(|q| q.distance_squared(p) <= DISTINCT_TOLERANCE * DISTINCT_TOLERANCE)
            .unwrap_or(usize::MAX)
    };

    if let Some(start) = ring.iter().position(|p| index_of(*p) == 0) {
        ring.rotate_left(start);
    }

    let forward: Vec<usize> = ring.iter().map(|p| index_of(*p)).collect();
    let mut backward = forward.clone();
    backward[1..].reverse();

    if inversions(&backward) < inversions(&forward) {
        ring[1..].reverse();
    }
    ring
}

/// Anzahl der Paare, die gegenüber aufsteigender Reihenfolge vertauscht sind.
fn inversions(order: &[usize]) -> usize {
    let mut count = 0;
    for (i, a) in order.iter().enumerate() {
        count += order[i + 1..].iter().filter(|b| *b < a).count();
    }
    count
}

/// Vorzeichenbehaftete Fläche eines Polygons (Shoelace).
pub fn signed_area(ring: &[Vec2]) -> f32 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        area += a.perp_dot(b);
    }
    area * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
        let d1 = (b - a).perp_dot(c - a);
        let d2 = (b - a).perp_dot(d - a);
        let d3 = (d - c).perp_dot(a - c);
        let d4 = (d - c).perp_dot(b - c);
        d1 * d2 < 0.0 && d3 * d4 < 0.0
    }

    fn is_simple(ring: &[Vec2]) -> bool {
        let n = ring.len();
        for i in 0..n {
            for j in (i + 1)..n {
                // Benachbarte Kanten teilen einen Eckpunkt
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                if segments_intersect(ring[i], ring[(i + 1) % n], ring[j], ring[(j + 1) % n]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_hull_of_scrambled_square_is_simple_polygon() {
        // Absichtlich "über Kreuz" angegeben
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 100.0),
        ];
        let ring = reduce_boundary(&points, 1.0, true);
        assert_eq!(ring.len(), 4);
        assert!(is_simple(&ring));
        assert_relative_eq!(signed_area(&ring).abs(), 10_000.0, epsilon = 1e-2);
    }

    #[test]
    fn test_closing_duplicate_is_dropped() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(25.0, 40.0),
        ];
        let ring = reduce_boundary(&points, 1.0, true);
        assert_eq!(ring.len(), 3);
        assert_ne!(ring.first(), ring.last());
    }

    #[test]
    fn test_hull_points_are_input_points() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(200.0, 0.0),
            Vec2::new(200.0, 200.0),
            Vec2::new(0.0, 200.0),
            Vec2::new(100.0, 100.0),
        ];
        let ring = reduce_boundary(&points, 1.0, true);
        for p in &ring {
            assert!(points.iter().any(|q| q.distance(*p) < 1e-3), "{p:?}");
        }
    }

    #[test]
    fn test_open_ring_starts_at_first_input_point() {
        let points = [
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(100.0, 100.0),
        ];
        let ring = reduce_boundary(&points, 1.0, false);
        assert_eq!(ring, points.to_vec());
    }

    #[test]
    fn test_open_wall_keeps_order_when_middle_moves_either_side() {
        for offset in [100.0, -100.0] {
            let points = [
                Vec2::new(-100.0, 0.0),
                Vec2::new(0.0, offset),
                Vec2::new(100.0, 0.0),
            ];
            let ring = reduce_boundary(&points, 1.0, false);
            assert_eq!(ring, points.to_vec(), "Versatz {offset}");
        }
    }

    #[test]
    fn test_collinear_points_are_kept() {
        let points = [
            Vec2::new(-100.0, 50.0),
            Vec2::new(0.0, 50.0),
            Vec2::new(100.0, 50.0),
        ];
        assert_eq!(reduce_boundary(&points, 1.0, false), points.to_vec());
        assert_eq!(reduce_boundary(&points, 1.0, true), points.to_vec());
    }

    #[test]
    fn test_inversions_counts_swapped_pairs() {
        assert_eq!(inversions(&[0, 1, 2, 3]), 0);
        assert_eq!(inversions(&[0, 2, 1]), 1);
        assert_eq!(inversions(&[0, 3, 2, 1]), 3);
    }

    /// Kleiner LCG für reproduzierbare Punktwolken.
    struct Lcg(u64);

    impl Lcg {
        fn next_f32(&mut self) -> f32 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (self.0 >> 40) as f32 / (1u64 << 24) as f32
        }
    }

    #[test]
    fn test_random_clouds_give_simple_polygons() {
        let mut rng = Lcg(0x5eed);
        for round in 0..100 {
            let count = 8 + round % 13;
            let mut points: Vec<Vec2> = (0..count)
                .map(|_| Vec2::new(rng.next_f32() * 400.0 - 200.0, rng.next_f32() * 300.0 - 150.0))
                .collect();
            // Punkte nahe der Mitte
            points.push(Vec2::new(rng.next_f32() * 10.0, rng.next_f32() * 10.0));
            points.push(Vec2::new(-rng.next_f32() * 10.0, -rng.next_f32() * 10.0));

            for closed in [true, false] {
                let ring = reduce_boundary(&points, 1.0, closed);
                assert!(ring.len() >= 3, "Runde {round}: {ring:?}");
                assert!(is_simple(&ring), "Runde {round}: {ring:?}");
                assert!(signed_area(&ring).abs() > 0.0, "Runde {round}");
            }
        }
    }

    #[test]
    fn test_fewer_than_three_distinct_points_skip_hull() {
        let points = [Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), Vec2::new(10.0, 0.0)];
        let ring = reduce_boundary(&points, 1.0, true);
        assert_eq!(ring, vec![Vec2::new(5.0, 5.0), Vec2::new(10.0, 0.0)]);
        assert!(reduce_boundary(&[], 1.0, true).is_empty());
    }
}
