#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmarks for canvas primitives and output.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_canvas::prelude::*;

fn line_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("line");

    for weight in [1.0f32, 4.0, 16.0] {
        group.bench_with_input(BenchmarkId::from_parameter(weight), &weight, |b, &weight| {
            let mut canvas = Canvas::new(512, 512).expect("canvas should be created");
            canvas.set_weight(weight);
            b.iter(|| {
                canvas.line(black_box(10.0), black_box(20.0), black_box(500.0), black_box(300.0));
            });
        });
    }

    group.finish();
}

fn curve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve");

    for weight in [1.0f32, 4.0, 16.0] {
        group.bench_with_input(
            BenchmarkId::new("cubic", weight),
            &weight,
            |b, &weight| {
                let mut canvas = Canvas::new(512, 512).expect("canvas should be created");
                canvas.set_weight(weight);
                b.iter(|| {
                    canvas.cubic_bezier(
                        black_box(20.0),
                        black_box(480.0),
                        black_box(120.0),
                        black_box(20.0),
                        black_box(380.0),
                        black_box(500.0),
                        black_box(490.0),
                        black_box(30.0),
                    );
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("ellipse", weight),
            &weight,
            |b, &weight| {
                let mut canvas = Canvas::new(512, 512).expect("canvas should be created");
                canvas.set_weight(weight);
                canvas.set_centered(true);
                b.iter(|| canvas.ellipse(black_box(256.0), black_box(256.0), 400.0, 250.0));
            },
        );
    }

    group.finish();
}

fn splat_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("splat");

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut canvas = Canvas::new(256, 256).expect("canvas should be created");
            b.iter(|| {
                for i in 0..count {
                    let t = i as f32 * 0.013;
                    canvas.point(128.0 + t.cos() * 100.0, 128.0 + t.sin() * 100.0);
                }
            });
        });
    }

    group.finish();
}

fn output_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");

    for size in [128u32, 512, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut canvas = Canvas::new(size, size).expect("canvas should be created");
            canvas.set_hsb(true);
            canvas.set_target_color(220.0, 70.0, 100.0);
            b.iter(|| {
                canvas.point(black_box(3.5), black_box(3.5));
                canvas.output()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, line_benchmark, curve_benchmark, splat_benchmark, output_benchmark);
criterion_main!(benches);
