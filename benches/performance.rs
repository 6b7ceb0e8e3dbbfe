// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point3;
use pcc_eval::evaluation::{earth_movers_distance, DistanceReport};
use pcc_eval::PointCloud;

fn synthetic_cloud(n: usize, jitter: f64) -> PointCloud {
    (0..n)
        .map(|i| {
            let t = i as f64;
            Point3::new((t * 0.013).sin() + jitter, (t * 0.007).cos(), t / n as f64)
        })
        .collect()
}

fn bench_emd(c: &mut Criterion) {
    let mut group = c.benchmark_group("emd");

    for size in [10_000, 100_000] {
        let original = synthetic_cloud(size, 0.0);
        let decoded = synthetic_cloud(size, 0.001);
        group.bench_with_input(BenchmarkId::new("points", size), &size, |b, _| {
            b.iter(|| earth_movers_distance(black_box(&original), black_box(&decoded)));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let output = "\
A->B,ACD1,p2point,0.000187503
A->B,ACD1,p2plane,9.6071e-05
B->A,ACD2,p2point,0.000194212
B->A,ACD2,p2plane,0.000101283
Symmetric,CD,p2point,0.000190857
Symmetric,CD-PSNR,p2point,64.0453
Symmetric,CD,p2plane,9.86772e-05
Symmetric,CD-PSNR,p2plane,66.9105
Symmetric,hF,p2point,0.0021389
Symmetric,hF,p2plane,0.00163871
";

    c.bench_function("parse_pc_error_output", |b| {
        b.iter(|| DistanceReport::parse(black_box(output)).unwrap());
    });
}

criterion_group!(benches, bench_emd, bench_parse);
criterion_main!(benches);
