use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use invoicectl_core::{format_currency, DemoDelays, Fetcher, MemoryStore};

fn bench_format_currency(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_currency");

    for cents in [5i64, 150_000, 12_345_678_901] {
        group.bench_with_input(BenchmarkId::from_parameter(cents), &cents, |b, &cents| {
            b.iter(|| format_currency(black_box(cents)));
        });
    }

    group.finish();
}

fn bench_memory_fetchers(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let fetcher = Fetcher::new(Arc::new(MemoryStore::seeded()), DemoDelays::none());

    c.bench_function("fetch_all_dashboard_data", |b| {
        b.iter(|| runtime.block_on(fetcher.fetch_all_dashboard_data()).unwrap());
    });

    c.bench_function("fetch_filtered_invoices/paid", |b| {
        b.iter(|| {
            runtime
                .block_on(fetcher.fetch_filtered_invoices(black_box("paid"), 1))
                .unwrap()
        });
    });

    c.bench_function("fetch_invoices_pages_cached/hit", |b| {
        b.iter(|| runtime.block_on(fetcher.fetch_invoices_pages_cached("")).unwrap());
    });
}

criterion_group!(benches, bench_format_currency, bench_memory_fetchers);
criterion_main!(benches);
