use bibliorec::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Sparse-ish rating matrix: `n` books rated by `users` users.
fn generate_ratings(n: usize, users: usize) -> VectorStore {
    let titles = (0..n).map(|i| format!("book_{i}")).collect();
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..users)
                .map(|u| {
                    let h = (i * 31 + u * 17) % 23;
                    if h < 5 {
                        (h * 2) as f64
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();
    VectorStore::from_rows(titles, &rows).expect("generated rows are uniform")
}

fn build(store: VectorStore, index: IndexKind) -> Recommender {
    let config = RecommendConfig {
        index,
        ..RecommendConfig::default()
    };
    Recommender::from_config(store, MetadataCatalog::default(), &config)
        .expect("default config is valid")
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_build");
    group.sample_size(10);

    for size in [100, 1_000].iter() {
        let store = generate_ratings(*size, 64);
        group.bench_with_input(BenchmarkId::new("hnsw", size), size, |b, _| {
            b.iter(|| build(black_box(store.clone()), IndexKind::Hnsw));
        });
    }

    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_search");
    group.sample_size(50); // Reduce samples for large datasets

    for size in [100, 1_000, 5_000].iter() {
        for kind in [IndexKind::Brute, IndexKind::Hnsw] {
            let rec = build(generate_ratings(*size, 64), kind);
            group.bench_with_input(BenchmarkId::new(kind.to_string(), size), size, |b, _| {
                b.iter(|| {
                    rec.recommend(black_box("book_0"), black_box(4))
                        .expect("should succeed")
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_build_index, bench_recommend);
criterion_main!(benches);
