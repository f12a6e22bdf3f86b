//! Benchmark affine fitting and validation throughput.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use yatra_align::{fit_affine, validate, AffineMap2D, SyncedPair, ValidationConfig};

/// Paired point sets related by a fixed affine map.
fn paired_points(n: usize) -> (Vec<[f64; 2]>, Vec<[f64; 2]>) {
    let map = AffineMap2D {
        a: [[0.9, -0.4], [0.4, 0.9]],
        b: [3.0, -1.0],
    };
    let tracker: Vec<[f64; 2]> = (0..n)
        .map(|i| {
            let s = i as f64 * 0.01;
            [s.cos() * 5.0 + s, (1.7 * s).sin() * 3.0]
        })
        .collect();
    let path = tracker.iter().map(|p| map.apply(*p)).collect();
    (tracker, path)
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_affine");
    for n in [100usize, 1_000, 10_000] {
        let (tracker, path) = paired_points(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| fit_affine(black_box(&tracker), black_box(&path)).unwrap());
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let (tracker, path) = paired_points(1_000);
    let pairs: Vec<SyncedPair> = tracker
        .iter()
        .zip(path.iter())
        .enumerate()
        .map(|(i, (t, p))| SyncedPair {
            timestamp_us: i as i64 * 1000,
            tracker: *t,
            path: *p,
        })
        .collect();
    let config = ValidationConfig {
        epochs: 100,
        batch_div: 10,
        seed: 42,
    };

    c.bench_function("validate_100_epochs", |b| {
        b.iter(|| validate(black_box(&pairs), black_box(&config)).unwrap());
    });
}

criterion_group!(benches, bench_fit, bench_validate);
criterion_main!(benches);
