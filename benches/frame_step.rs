//! Frame-step throughput at a typical desktop viewport.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, Criterion};
use driftmesh::Background;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn bench_frame(c: &mut Criterion) {
    c.bench_function("frame 1200x800", |b| {
        let mut renderer = Background::new().build(1200.0, 800.0);
        let mut now = 0.0;
        b.iter(|| {
            now += FRAME_MS;
            renderer.frame(now);
        });
    });

    c.bench_function("frame 3840x2160 max particles", |b| {
        let mut renderer = Background::new().build(3840.0, 2160.0);
        let mut now = 0.0;
        b.iter(|| {
            now += FRAME_MS;
            renderer.frame(now);
        });
    });

    c.bench_function("frame 1200x800 no triangles", |b| {
        let mut renderer = Background::new()
            .with_triangles(false)
            .build(1200.0, 800.0);
        let mut now = 0.0;
        b.iter(|| {
            now += FRAME_MS;
            renderer.frame(now);
        });
    });
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
