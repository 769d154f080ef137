use criterion::{Criterion, criterion_group, criterion_main};
use minichart_rs::animation::blend_series;
use minichart_rs::core::{Point, to_points, x_coordinates};
use std::hint::black_box;

fn bench_x_coordinates_10k(c: &mut Criterion) {
    let timestamps: Vec<i64> = (0..10_000).map(|i| i64::from(i) * 86_400_000).collect();

    c.bench_function("x_coordinates_10k", |b| {
        b.iter(|| {
            let _ = x_coordinates(
                black_box(1920.0),
                black_box(&timestamps),
                black_box(4.2),
                black_box(120.0),
            );
        })
    });
}

fn bench_to_points_10k(c: &mut Criterion) {
    let timestamps: Vec<i64> = (0..10_000).map(|i| i64::from(i) * 86_400_000).collect();
    let x_coords = x_coordinates(1920.0, &timestamps, 1.0, 0.0);
    let values: Vec<f64> = (0..10_000).map(|i| f64::from(i % 997)).collect();

    c.bench_function("to_points_10k", |b| {
        b.iter(|| {
            let _ = to_points(
                black_box(&x_coords),
                black_box(1080.0),
                black_box(996.0),
                black_box(&values),
            );
        })
    });
}

fn bench_blend_series_10k(c: &mut Criterion) {
    let prev: Vec<Point> = (0..10_000)
        .map(|i| Point::new(f64::from(i), f64::from(i % 500)))
        .collect();
    let next: Vec<Point> = (0..10_000)
        .map(|i| Point::new(f64::from(i), f64::from((i + 137) % 500)))
        .collect();

    c.bench_function("blend_series_10k", |b| {
        b.iter(|| {
            let _ = blend_series(
                black_box(Some(prev.as_slice())),
                black_box(&next),
                black_box(1080.0),
                black_box(0.42),
                black_box(false),
            );
        })
    });
}

criterion_group!(
    benches,
    bench_x_coordinates_10k,
    bench_to_points_10k,
    bench_blend_series_10k
);
criterion_main!(benches);
