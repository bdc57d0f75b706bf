//! Criterion benchmarks for the polygon-kernel builder.
//! Convex inputs exercise the reflex-scan fast path; star inputs walk
//! the full sentinel-chain clipping loop.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use polykern::geom::rand::{draw_convex_polygon, draw_star_polygon, RadialCfg, ReplayToken};
use polykern::geom::GeomCfg;
use polykern::kernel::polygon_kernel;

fn bench_kernel(c: &mut Criterion) {
    let cfg = GeomCfg::default();
    let mut group = c.benchmark_group("kernel");

    for &n in &[8usize, 32, 128, 512] {
        group.bench_with_input(BenchmarkId::new("convex", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    draw_convex_polygon(
                        RadialCfg {
                            vertices: n,
                            ..RadialCfg::default()
                        },
                        ReplayToken::new(43, n as u64),
                    )
                },
                |poly| {
                    let _k = polygon_kernel(&poly, cfg);
                },
                BatchSize::SmallInput,
            )
        });
    }

    for &spikes in &[4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("star", 2 * spikes), &spikes, |b, &spikes| {
            b.iter_batched(
                || draw_star_polygon(spikes, 1.0, 0.45, ReplayToken::new(44, spikes as u64)),
                |poly| {
                    let _k = polygon_kernel(&poly, cfg);
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_kernel);
criterion_main!(benches);
