use adjustable_shape_editor::app::hide_non_visible_lights;
use adjustable_shape_editor::core::{add_light_source, Scene};
use adjustable_shape_editor::shape::{ShapeArena, ShapeConfig};
use adjustable_shape_editor::EditorOptions;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::hint::black_box;

fn ring_points(count: usize, radius: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

fn bench_shape_rebuild(c: &mut Criterion) {
    let options = EditorOptions::default();
    let mut group = c.benchmark_group("shape_rebuild");

    for point_count in [4usize, 16, 64] {
        let mut scene = Scene::new();
        let mut arena = ShapeArena::new();
        let filled = arena
            .create(
                &mut scene,
                ShapeConfig::filled(&options, 1),
                &ring_points(point_count, 200.0),
                0.5,
                &options,
            )
            .expect("Form angelegt");
        let wall = arena
            .create(
                &mut scene,
                ShapeConfig::wall(&options, 2),
                &ring_points(point_count, 400.0),
                0.5,
                &options,
            )
            .expect("Wand angelegt");

        group.bench_with_input(
            BenchmarkId::new("filled_and_wall", point_count),
            &point_count,
            |b, _| {
                b.iter(|| {
                    arena.rebuild(&mut scene, black_box(&[filled, wall]), 0.5);
                    black_box(scene.geometries.live_count())
                })
            },
        );
    }

    group.finish();
}

fn bench_visibility_pass(c: &mut Criterion) {
    let options = EditorOptions::default();
    let mut group = c.benchmark_group("visibility_pass");

    for light_count in [8usize, 64] {
        let mut scene = Scene::new();
        let mut arena = ShapeArena::new();
        for (i, z) in [-150.0f32, 0.0, 150.0].into_iter().enumerate() {
            arena
                .create(
                    &mut scene,
                    ShapeConfig::wall(&options, i as u64 + 1),
                    &[
                        Vec3::new(-200.0, 0.0, z),
                        Vec3::new(0.0, 0.0, z + 30.0),
                        Vec3::new(200.0, 0.0, z),
                    ],
                    0.5,
                    &options,
                )
                .expect("Wand angelegt");
        }
        for position in ring_points(light_count, 300.0) {
            add_light_source(&mut scene, position + Vec3::Y * 10.0, options.light_hit_radius);
        }

        group.bench_with_input(
            BenchmarkId::new("lights", light_count),
            &light_count,
            |b, _| {
                b.iter(|| {
                    let report = hide_non_visible_lights(
                        &mut scene,
                        black_box(Vec3::new(25.0, 10.0, 25.0)),
                        options.view_distance,
                    );
                    black_box(report.visible.len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(core_benches, bench_shape_rebuild, bench_visibility_pass);
criterion_main!(core_benches);
