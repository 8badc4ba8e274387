//! Zeichnet die RenderScene mit dem egui-Painter.
//!
//! Dreiecke werden projiziert und von hinten nach vorne gezeichnet, ohne
//! Tiefenpuffer. Für Marker und Wände in Editor-Größenordnung reicht das.

use crate::shared::{RenderLine, RenderMesh, RenderScene};
use glam::{Mat4, Vec2, Vec3};

/// Richtung des Schattierungslichts.
const SHADE_DIRECTION: Vec3 = Vec3::new(0.3, 1.0, 0.2);

fn to_color(rgba: [f32; 4], shade: f32) -> egui::Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(rgba[0] * shade),
        channel(rgba[1] * shade),
        channel(rgba[2] * shade),
        channel(rgba[3]),
    )
}

/// Projiziert in Bildschirmkoordinaten; liefert zusätzlich die Clip-Tiefe.
fn project(view_projection: &Mat4, world: Vec3, rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
    let clip = *view_projection * world.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let x = rect.min.x + (ndc.x + 1.0) * 0.5 * rect.width();
    let y = rect.min.y + (1.0 - ndc.y) * 0.5 * rect.height();
    Some((egui::pos2(x, y), clip.w))
}

struct ProjectedTriangle {
    points: [egui::Pos2; 3],
    depth: f32,
    color: egui::Color32,
}

fn collect_triangles(
    mesh: &RenderMesh,
    view_projection: &Mat4,
    rect: egui::Rect,
    light: Vec3,
    out: &mut Vec<ProjectedTriangle>,
) {
    for tri in mesh.indices.chunks_exact(3) {
        let (Some(a), Some(b), Some(c)) = (
            mesh.positions.get(tri[0] as usize),
            mesh.positions.get(tri[1] as usize),
            mesh.positions.get(tri[2] as usize),
        ) else {
            continue;
        };
        let (Some(pa), Some(pb), Some(pc)) = (
            project(view_projection, *a, rect),
            project(view_projection, *b, rect),
            project(view_projection, *c, rect),
        ) else {
            continue;
        };
        let normal = (*b - *a).cross(*c - *a).normalize_or_zero();
        let shade = 0.45 + 0.55 * normal.dot(light).abs();
        out.push(ProjectedTriangle {
            points: [pa.0, pb.0, pc.0],
            depth: (pa.1 + pb.1 + pc.1) / 3.0,
            color: to_color(mesh.color, shade),
        });
    }
}

fn paint_line(painter: &egui::Painter, line: &RenderLine, view_projection: &Mat4, rect: egui::Rect) {
    let points: Vec<egui::Pos2> = line
        .points
        .iter()
        .filter_map(|p| project(view_projection, *p, rect).map(|(pos, _)| pos))
        .collect();
    if points.len() >= 2 {
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(1.5, to_color(line.color, 1.0)),
        ));
    }
}

/// Zeichnet Boden-Raster, Meshes und Kurvenlinien in `rect`.
pub fn paint_scene(painter: &egui::Painter, rect: egui::Rect, scene: &RenderScene) {
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(24));

    let view_projection = scene
        .camera
        .view_projection(Vec2::new(rect.width(), rect.height()));
    let light = SHADE_DIRECTION.normalize();

    paint_ground_grid(painter, rect, &view_projection);

    let mut triangles = Vec::new();
    for mesh in &scene.meshes {
        collect_triangles(mesh, &view_projection, rect, light, &mut triangles);
    }
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut batch = egui::Mesh::default();
    for tri in &triangles {
        let base = batch.vertices.len() as u32;
        for p in tri.points {
            batch.colored_vertex(p, tri.color);
        }
        batch.add_triangle(base, base + 1, base + 2);
    }
    painter.add(egui::Shape::mesh(batch));

    for line in &scene.lines {
        paint_line(painter, line, &view_projection, rect);
    }

    paint_lights(painter, scene, &view_projection, rect);

    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        format!(
            "{} Dreiecke | Lichter {}/{} | Schatten r{}",
            scene.triangle_count(),
            scene.visible_light_count(),
            scene.lights.len(),
            scene.shadow_revision
        ),
        egui::FontId::monospace(12.0),
        egui::Color32::from_gray(180),
    );
}

/// Sichtbare Lichter als gefüllter Kreis, verdeckte als Ring.
fn paint_lights(painter: &egui::Painter, scene: &RenderScene, view_projection: &Mat4, rect: egui::Rect) {
    for light in &scene.lights {
        let Some((pos, _)) = project(view_projection, light.position, rect) else {
            continue;
        };
        if light.visible {
            painter.circle_filled(pos, 5.0, egui::Color32::from_rgb(255, 230, 100));
        } else {
            painter.circle_stroke(pos, 5.0, egui::Stroke::new(1.0, egui::Color32::from_gray(110)));
        }
    }
}

/// Bodenraster mit 50er Zellen um den Ursprung.
fn paint_ground_grid(painter: &egui::Painter, rect: egui::Rect, view_projection: &Mat4) {
    const HALF_EXTENT: f32 = 500.0;
    const CELL: f32 = 50.0;
    let stroke = egui::Stroke::new(0.5, egui::Color32::from_gray(60));

    let steps = (2.0 * HALF_EXTENT / CELL) as i32;
    for i in 0..=steps {
        let v = -HALF_EXTENT + i as f32 * CELL;
        for (from, to) in [
            (Vec3::new(v, 0.0, -HALF_EXTENT), Vec3::new(v, 0.0, HALF_EXTENT)),
            (Vec3::new(-HALF_EXTENT, 0.0, v), Vec3::new(HALF_EXTENT, 0.0, v)),
        ] {
            if let (Some((a, _)), Some((b, _))) = (
                project(view_projection, from, rect),
                project(view_projection, to, rect),
            ) {
                painter.line_segment([a, b], stroke);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Camera3D;

    #[test]
    fn test_target_projects_to_rect_center() {
        let camera = Camera3D::new();
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(800.0, 600.0));
        let vp = camera.view_projection(Vec2::new(800.0, 600.0));
        let (pos, depth) = project(&vp, camera.target, rect).expect("vor der Kamera");
        assert!((pos.x - 500.0).abs() < 1e-2);
        assert!((pos.y - 350.0).abs() < 1e-2);
        assert!(depth > 0.0);
    }

    #[test]
    fn test_color_conversion_clamps_shade() {
        let color = to_color([1.0, 0.5, 0.0, 1.0], 2.0);
        assert_eq!(color, egui::Color32::from_rgba_unmultiplied(255, 255, 0, 255));
    }
}
