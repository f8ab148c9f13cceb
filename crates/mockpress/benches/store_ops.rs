//! Store Operations Benchmarks
//!
//! Benchmarks for option encoding, post allocation, children lookup and the
//! fragment parse cache.
//!
//! Run with: `cargo bench --bench store_ops`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mockpress::{json, ExpectationStore, FragmentCache, Post, Value};

fn nested_option(width: usize) -> Value {
    let entries: serde_json::Map<String, Value> = (0..width)
        .map(|i| (format!("key_{i}"), json!({"index": i, "tags": ["a", "b"]})))
        .collect();
    Value::Object(entries)
}

fn bench_option_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("option_round_trip");

    for width in [1, 10, 100] {
        let value = nested_option(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &value, |bench, value| {
            let mut store = ExpectationStore::new();
            bench.iter(|| {
                store.set_option("settings", black_box(value.clone()));
                black_box(store.get_option("settings"));
            });
        });
    }

    group.finish();
}

fn bench_insert_posts(c: &mut Criterion) {
    c.bench_function("insert_1000_posts", |bench| {
        bench.iter(|| {
            let mut store = ExpectationStore::new();
            for i in 0..1000 {
                store.insert_post(Post::new().with_title(format!("post {i}")));
            }
            black_box(store.post_count());
        });
    });
}

fn bench_query_children(c: &mut Criterion) {
    let mut store = ExpectationStore::new();
    for limit in 0..100 {
        store.register_children(&json!({"type": "post", "limit": limit}), vec![json!(limit)]);
    }
    let query = json!({"limit": 50, "type": "post"});

    c.bench_function("query_children_hit", |bench| {
        bench.iter(|| black_box(store.query_children(black_box(&query))));
    });
}

fn bench_fragment_cache(c: &mut Criterion) {
    let fragment = (0..50)
        .map(|i| format!("<li class=\"item\"><a href=\"/p/{i}\">Post {i}</a></li>"))
        .collect::<String>();
    let fragment = format!("<ul>{fragment}</ul>");

    let mut group = c.benchmark_group("fragment_parse");
    group.bench_function("cold", |bench| {
        bench.iter(|| {
            let mut cache = FragmentCache::new();
            black_box(cache.parse(black_box(&fragment)).is_ok());
        });
    });
    group.bench_function("cached", |bench| {
        let mut cache = FragmentCache::new();
        let _ = cache.parse(&fragment);
        bench.iter(|| black_box(cache.parse(black_box(&fragment)).is_ok()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_option_round_trip,
    bench_insert_posts,
    bench_query_children,
    bench_fragment_cache
);
criterion_main!(benches);
