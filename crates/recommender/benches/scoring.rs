//! Benchmarks for recommendation scoring
//!
//! Run with: cargo bench --package recommender
//!
//! The store is generated in-process so the benchmark needs no seed files.

use catalog::{ContentId, ContentItem, ContentStore, ContentType, Rating, UserId};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recommender::{similar_users, Recommender, RecommenderConfig};
use similarity::compute_similarity;
use std::sync::Arc;

const WORD_POOL: &[&str] = &[
    "starship", "galaxy", "heist", "detective", "kingdom", "rebellion", "voyage", "cipher",
    "harbor", "orchard", "tempest", "ember", "signal", "frontier", "relic", "mirage",
];

/// Deterministic store with `item_count` movies and `user_count` users,
/// each user rating a spread of items.
fn build_store(item_count: usize, user_count: usize) -> Arc<ContentStore> {
    let mut store = ContentStore::new();

    for i in 0..item_count {
        let w1 = WORD_POOL[i % WORD_POOL.len()];
        let w2 = WORD_POOL[(i * 7 + 3) % WORD_POOL.len()];
        let w3 = WORD_POOL[(i * 13 + 5) % WORD_POOL.len()];
        store.insert_item(
            ContentType::Movie,
            ContentItem {
                id: ContentId::new(format!("m{:04}", i)),
                title: format!("Feature {}", i),
                genres: vec!["Drama".to_string()],
                description: Some(format!("{} {} {} story", w1, w2, w3)),
                artist: None,
                album: None,
                author: None,
                average_rating: 2.5 + ((i % 5) as f64) * 0.5,
                rating_count: (i % 40) as u64,
            },
        );
    }

    for u in 0..user_count {
        for k in 0..8 {
            let item = (u * 11 + k * 29) % item_count;
            store.insert_rating(Rating {
                user_id: UserId::new(format!("user{:03}", u)),
                content_type: ContentType::Movie,
                content_id: ContentId::new(format!("m{:04}", item)),
                rating: 1.0 + (((u + k * 3) % 9) as f64) * 0.5,
            });
        }
    }

    Arc::new(store)
}

fn bench_compute_similarity(c: &mut Criterion) {
    let store = build_store(300, 0);

    c.bench_function("compute_similarity_300_items", |b| {
        b.iter(|| {
            let matrix = compute_similarity(black_box(&store), ContentType::Movie, 100);
            black_box(matrix)
        })
    });
}

fn bench_similar_users(c: &mut Criterion) {
    let store = build_store(300, 200);
    let config = RecommenderConfig::default();
    let user = UserId::new("user001");

    c.bench_function("similar_users_200_users", |b| {
        b.iter(|| {
            let neighbors = similar_users(black_box(&store), black_box(&user), &config);
            black_box(neighbors)
        })
    });
}

fn bench_recommend(c: &mut Criterion) {
    let store = build_store(300, 200);
    let engine = Recommender::new(store);
    let user = UserId::new("user001");

    c.bench_function("recommend_top_10", |b| {
        b.iter(|| {
            let results = engine
                .recommend(black_box(&user), ContentType::Movie, black_box(10))
                .unwrap();
            black_box(results)
        })
    });
}

criterion_group!(
    benches,
    bench_compute_similarity,
    bench_similar_users,
    bench_recommend
);
criterion_main!(benches);
