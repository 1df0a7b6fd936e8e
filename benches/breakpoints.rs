//! Benchmarks for breakpoint updates.
//!
//! These benchmarks measure the performance of:
//! - Acquiring and subscribing a query map
//! - Dispatching a resize that crosses every breakpoint
//! - Replacing the query map on a live provider
//!
//! Run with: cargo bench --bench breakpoints

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use floem_media_query::{HeadlessViewport, MediaQueryProvider, QueryMap};

fn query_map(n: usize) -> QueryMap {
    (0..n).map(|i| (format!("bp{i}"), i * 100)).collect()
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_provider");
    for n in [1, 6, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let viewport = HeadlessViewport::new(800.0);
            let queries = query_map(n);
            b.iter(|| black_box(MediaQueryProvider::new(viewport.clone(), queries.clone())));
        });
    }
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_across_all");
    for n in [1, 6, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let viewport = HeadlessViewport::new(0.0);
            let provider = MediaQueryProvider::new(viewport.clone(), query_map(n));
            let wide = (n * 100) as f64;
            b.iter(|| {
                viewport.resize(black_box(wide));
                viewport.resize(black_box(0.0));
            });
            black_box(provider.snapshot());
        });
    }
    group.finish();
}

fn bench_set_queries(c: &mut Criterion) {
    c.bench_function("set_queries_grid", |b| {
        let viewport = HeadlessViewport::new(800.0);
        let mut provider = MediaQueryProvider::new(viewport, QueryMap::grid());
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let queries = if flip { query_map(6) } else { QueryMap::grid() };
            black_box(provider.set_queries(queries));
        });
    });
}

criterion_group!(benches, bench_create, bench_resize, bench_set_queries);
criterion_main!(benches);
