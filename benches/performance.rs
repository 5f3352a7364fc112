//! Performance benchmarks for the search widget.
//!
//! Run with: cargo bench
//!
//! Target performance:
//! - Index build over 1000 items: < 5ms
//! - Query latency: < 1ms per keystroke

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use expat_tax::core::{FuzzyMatcher, HotkeyRegistry, KeyPath, SearchController, SearchOptions};
use expat_tax::tax::{countries, Country};

/// Synthetic countries, `n` of them.
fn synthetic(n: usize) -> Vec<Country> {
    (0..n)
        .map(|i| {
            Country::new(
                &format!("Country {} of the Benchmark Union", i),
                &format!("{:02}", i % 100),
                "EUR",
                "€",
            )
        })
        .collect()
}

fn keys() -> Vec<KeyPath> {
    KeyPath::parse_all(&["country_name", "iso"]).expect("valid key paths")
}

/// Benchmark building the matcher index.
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [40usize, 200, 1000] {
        let items = synthetic(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| black_box(FuzzyMatcher::new(items.clone(), keys()).expect("index")))
        });
    }

    group.finish();
}

/// Benchmark queries against the bundled countries.
fn bench_queries(c: &mut Criterion) {
    let matcher = FuzzyMatcher::new(countries().expect("bundled countries"), keys()).expect("index");

    let queries = ["ch", "united", "gb", "nzl", "xyz"];

    let mut group = c.benchmark_group("query");

    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| black_box(matcher.search_capped(black_box(query), 5)))
        });
    }

    group.finish();
}

/// Benchmark a typing session through the controller.
fn bench_typing(c: &mut Criterion) {
    let registry = HotkeyRegistry::new();
    let options = SearchOptions::new(["country_name", "iso"], "country_name");
    let mut search =
        SearchController::with_registry(synthetic(1000), options, &registry).expect("controller");

    c.bench_function("typing_session", |b| {
        b.iter(|| {
            let mut query = String::new();
            for ch in "country 42".chars() {
                query.push(ch);
                search.query_changed(query.clone());
            }
            black_box(search.results().len())
        })
    });
}

criterion_group!(benches, bench_index_build, bench_queries, bench_typing);

criterion_main!(benches);
