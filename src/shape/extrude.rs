//! Extrusion einer abgetasteten Kurve zu einem Boden-Prisma oder Wandband.
//!
//! Gefüllte Formen werden mit `lyon_tessellation` trianguliert und von `y = 0`
//! bis `y = depth` extrudiert. Wände laufen als Band mit Gehrung entlang der
//! Kurve. Der Umriss-Puffer wird zwischen Rebuilds wiederverwendet.

use super::boundary::signed_area;
use super::curve::SampledCurve;
use super::error::ExtrudeError;
use crate::core::MeshGeometry;
use glam::{Vec2, Vec3};
use lyon_tessellation::math::Point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

/// Punkte näher als diese Toleranz werden zusammengefasst.
const MERGE_TOLERANCE: f32 = 1e-4;
/// Untergrenze für den Gehrungs-Kosinus (verhindert Spitzen bei Kehren).
const MIN_MITER_COS: f32 = 0.25;

/// Art der Extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtrudeMode {
    /// Gefülltes Prisma (Boden/Block)
    Filled { depth: f32 },
    /// Vertikales Band entlang der Kurve
    Wall { height: f32, thickness: f32 },
}

impl ExtrudeMode {
    /// Mindestanzahl unterschiedlicher Umrisspunkte.
    pub fn required_points(&self) -> usize {
        match self {
            ExtrudeMode::Filled { .. } => 3,
            ExtrudeMode::Wall { .. } => 2,
        }
    }
}

/// Extrudiert Kurven; hält den wiederverwendeten Umriss-Puffer.
#[derive(Debug, Clone)]
pub struct MeshExtruder {
    mode: ExtrudeMode,
    outline: Vec<Vec2>,
}

impl MeshExtruder {
    pub fn new(mode: ExtrudeMode) -> Self {
        Self {
            mode,
            outline: Vec::new(),
        }
    }

    pub fn mode(&self) -> ExtrudeMode {
        self.mode
    }

    /// Kapazität des Umriss-Puffers.
    pub fn outline_capacity(&self) -> usize {
        self.outline.capacity()
    }

    /// Baut das Mesh zur Kurve.
    pub fn extrude(&mut self, curve: &SampledCurve) -> Result<MeshGeometry, ExtrudeError> {
        self.fill_outline(curve);

        let required = self.mode.required_points();
        if self.outline.len() < required {
            return Err(ExtrudeError::DegenerateOutline {
                count: self.outline.len(),
                required,
            });
        }

        match self.mode {
            ExtrudeMode::Filled { depth } => extrude_filled(&mut self.outline, depth),
            ExtrudeMode::Wall { height, thickness } => Ok(extrude_wall(
                &self.outline,
                curve.closed,
                height,
                thickness,
            )),
        }
    }

    /// Überträgt die Kurve in den Puffer (XZ), ohne aufeinanderfolgende Duplikate.
    fn fill_outline(&mut self, curve: &SampledCurve) {
        self.outline.clear();
        for p in curve.outline() {
            if self
                .outline
                .last()
                .is_some_and(|last| last.distance(p) <= MERGE_TOLERANCE)
            {
                continue;
            }
            self.outline.push(p);
        }
        // Schließender Punkt geschlossener Kurven
        if curve.closed && self.outline.len() > 1 {
            if let (Some(first), Some(last)) = (self.outline.first(), self.outline.last()) {
                if first.distance(*last) <= MERGE_TOLERANCE {
                    self.outline.pop();
                }
            }
        }
    }
}

/// Trianguliert den Umriss und baut Deckel, Boden und Seitenflächen.
fn extrude_filled(outline: &mut [Vec2], depth: f32) -> Result<MeshGeometry, ExtrudeError> {
    // Einheitliche Orientierung für die Seitenflächen
    if signed_area(outline) < 0.0 {
        outline.reverse();
    }

    let mut builder = Path::builder();
    builder.begin(Point::new(outline[0].x, outline[0].y));
    for p in outline.iter().skip(1) {
        builder.line_to(Point::new(p.x, p.y));
    }
    builder.close();
    let path = builder.build();

    let mut cap: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default(),
            &mut BuffersBuilder::new(&mut cap, |vertex: FillVertex| {
                Vec2::new(vertex.position().x, vertex.position().y)
            }),
        )
        .map_err(|e| ExtrudeError::Tessellation(format!("{e:?}")))?;

    if cap.indices.is_empty() {
        return Err(ExtrudeError::Tessellation(
            "Triangulierung ohne Dreiecke".to_string(),
        ));
    }

    let cap_count = cap.vertices.len() as u32;
    let ring_count = outline.len();
    let mut mesh = MeshGeometry {
        positions: Vec::with_capacity(cap.vertices.len() * 2 + ring_count * 4),
        indices: Vec::with_capacity(cap.indices.len() * 2 + ring_count * 6),
    };

    // Boden (y = 0), Deckel (y = depth)
    mesh.positions
        .extend(cap.vertices.iter().map(|v| Vec3::new(v.x, 0.0, v.y)));
    mesh.positions
        .extend(cap.vertices.iter().map(|v| Vec3::new(v.x, depth, v.y)));
    for tri in cap.indices.chunks_exact(3) {
        mesh.push_triangle(tri[0], tri[2], tri[1]);
        mesh.push_triangle(tri[0] + cap_count, tri[1] + cap_count, tri[2] + cap_count);
    }

    // Seitenflächen mit eigenen Vertices (harte Kanten)
    for i in 0..ring_count {
        let a = outline[i];
        let b = outline[(i + 1) % ring_count];
        let base = mesh.positions.len() as u32;
        mesh.positions.extend_from_slice(&[
            Vec3::new(a.x, 0.0, a.y),
            Vec3::new(b.x, 0.0, b.y),
            Vec3::new(b.x, depth, b.y),
            Vec3::new(a.x, depth, a.y),
        ]);
        mesh.push_quad(base, base + 1, base + 2, base + 3);
    }

    Ok(mesh)
}

/// Gehrungsversatz (halbe Stärke) für jeden Umrisspunkt.
fn miter_offsets(outline: &[Vec2], closed: bool, half: f32) -> Vec<Vec2> {
    let n = outline.len();
    let segment_normal = |i: usize, j: usize| (outline[j] - outline[i]).normalize_or_zero().perp();

    (0..n)
        .map(|i| {
            let prev = if i > 0 {
                Some(segment_normal(i - 1, i))
            } else if closed {
                Some(segment_normal(n - 1, 0))
            } else {
                None
            };
            let next = if i + 1 < n {
                Some(segment_normal(i, i + 1))
            } else if closed {
                Some(segment_normal(n - 1, 0))
            } else {
                None
            };

            match (prev, next) {
                (Some(a), Some(b)) => {
                    let miter = (a + b).normalize_or(b);
                    let cos = miter.dot(b).max(MIN_MITER_COS);
                    miter * (half / cos)
                }
                (Some(n), None) | (None, Some(n)) => n * half,
                (None, None) => Vec2::ZERO,
            }
        })
        .collect()
}

/// Baut ein Wandband: linke/rechte Fläche, Ober- und Unterkante, Endkappen bei offenen Kurven.
fn extrude_wall(outline: &[Vec2], closed: bool, height: f32, thickness: f32) -> MeshGeometry {
    let n = outline.len();
    let offsets = miter_offsets(outline, closed, thickness * 0.5);

    let mut mesh = MeshGeometry {
        positions: Vec::with_capacity(n * 4),
        indices: Vec::new(),
    };
    for (p, offset) in outline.iter().zip(&offsets) {
        let left = *p + *offset;
        let right = *p - *offset;
        mesh.positions.extend_from_slice(&[
            Vec3::new(left.x, 0.0, left.y),
            Vec3::new(left.x, height, left.y),
            Vec3::new(right.x, 0.0, right.y),
            Vec3::new(right.x, height, right.y),
        ]);
    }

    // Vertex-Layout je Punkt: links unten, links oben, rechts unten, rechts oben
    let corners = |i: usize| {
        let base = (i * 4) as u32;
        (base, base + 1, base + 2, base + 3)
    };

    let segments = if closed { n } else { n - 1 };
    for i in 0..segments {
        let (lb_a, lt_a, rb_a, rt_a) = corners(i);
        let (lb_b, lt_b, rb_b, rt_b) = corners((i + 1) % n);
        mesh.push_quad(lb_a, lb_b, lt_b, lt_a);
        mesh.push_quad(rb_b, rb_a, rt_a, rt_b);
        mesh.push_quad(lt_a, lt_b, rt_b, rt_a);
        mesh.push_quad(rb_a, rb_b, lb_b, lb_a);
    }

    if !closed {
        let (lb, lt, rb, rt) = corners(0);
        mesh.push_quad(rb, lb, lt, rt);
        let (lb, lt, rb, rt) = corners(n - 1);
        mesh.push_quad(lb, rb, rt, lt);
    }

    mesh
}
