//! User-to-user similarity.
//!
//! Neighbors are found by comparing sparse rating vectors across all
//! content types at once: a user who rates the same movies and books the
//! same way is a neighbor regardless of which type is being recommended.

use crate::config::RecommenderConfig;
use crate::rating_index::{all_rating_vectors, ratings_of};
use crate::sparse::SparseVector;
use catalog::{ContentStore, UserId};
use rayon::prelude::*;
use tracing::instrument;

/// Denominator guard so a zero-norm projection cannot divide by zero
const NORM_EPSILON: f64 = 1e-10;

/// Find the users most similar to `user_id`.
///
/// A candidate must share at least `min_common_items` rated keys with the
/// target before any similarity is computed. Cosine similarity is then
/// taken over the projections onto those shared keys only, so two users
/// who agree perfectly on their overlap count as fully similar even when
/// the rest of their histories differ. Non-positive similarities are
/// discarded, the rest are sorted descending and capped at `neighbor_cap`.
///
/// Returns an empty list when the target user has no ratings at all.
#[instrument(skip(store, config))]
pub fn similar_users(
    store: &ContentStore,
    user_id: &UserId,
    config: &RecommenderConfig,
) -> Vec<(UserId, f64)> {
    let target = ratings_of(store, user_id);
    if target.is_empty() {
        return Vec::new();
    }

    let vectors = all_rating_vectors(store);
    let mut neighbors: Vec<(UserId, f64)> = vectors
        .par_iter()
        .filter_map(|(candidate_id, candidate)| {
            if candidate_id == user_id {
                return None;
            }
            let similarity = rating_similarity(&target, candidate, config.min_common_items)?;
            (similarity > 0.0).then(|| (candidate_id.clone(), similarity))
        })
        .collect();

    // Stable sort keeps ascending user-id order among equal similarities
    neighbors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    neighbors.truncate(config.neighbor_cap);
    neighbors
}

/// Cosine similarity of two rating vectors over their shared keys.
///
/// Returns `None` when fewer than `min_common_items` keys are shared.
fn rating_similarity(
    target: &SparseVector,
    candidate: &SparseVector,
    min_common_items: usize,
) -> Option<f64> {
    let common = target.common_keys(candidate);
    if common.len() < min_common_items {
        return None;
    }

    let target_projection = target.project(&common);
    let candidate_projection = candidate.project(&common);
    let denominator = norm(&target_projection) * norm(&candidate_projection) + NORM_EPSILON;

    Some(target.dot(candidate) / denominator)
}

fn norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{ContentId, ContentType, Rating};

    fn rating(user: &str, content_type: ContentType, id: &str, value: f64) -> Rating {
        Rating {
            user_id: UserId::new(user),
            content_type,
            content_id: ContentId::new(id),
            rating: value,
        }
    }

    fn store_with_ratings(ratings: Vec<Rating>) -> ContentStore {
        let mut store = ContentStore::new();
        for r in ratings {
            store.insert_rating(r);
        }
        store
    }

    #[test]
    fn test_agreeing_user_is_a_neighbor() {
        let store = store_with_ratings(vec![
            rating("u1", ContentType::Movie, "m1", 5.0),
            rating("u1", ContentType::Movie, "m2", 4.0),
            rating("u2", ContentType::Movie, "m1", 5.0),
            rating("u2", ContentType::Movie, "m2", 4.0),
        ]);

        let neighbors = similar_users(&store, &UserId::new("u1"), &RecommenderConfig::default());
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].0.as_str(), "u2");
        assert!(neighbors[0].1 > 0.99, "identical ratings should be near 1.0");
    }

    #[test]
    fn test_single_common_item_is_not_enough() {
        let store = store_with_ratings(vec![
            rating("u1", ContentType::Movie, "m1", 5.0),
            rating("u1", ContentType::Movie, "m2", 4.0),
            rating("u2", ContentType::Movie, "m1", 5.0),
            rating("u2", ContentType::Movie, "m9", 1.0),
        ]);

        let neighbors = similar_users(&store, &UserId::new("u1"), &RecommenderConfig::default());
        assert!(neighbors.is_empty(), "one shared item is below the threshold");
    }

    #[test]
    fn test_similarity_spans_content_types() {
        // The overlap is one movie plus one book; together they clear the
        // two-item threshold
        let store = store_with_ratings(vec![
            rating("u1", ContentType::Movie, "m1", 5.0),
            rating("u1", ContentType::Book, "b1", 4.0),
            rating("u2", ContentType::Movie, "m1", 5.0),
            rating("u2", ContentType::Book, "b1", 4.0),
        ]);

        let neighbors = similar_users(&store, &UserId::new("u1"), &RecommenderConfig::default());
        assert_eq!(neighbors.len(), 1);
    }

    #[test]
    fn test_same_id_in_different_types_does_not_collide() {
        // "1" rated as a movie is not the same key as "1" rated as a song
        let store = store_with_ratings(vec![
            rating("u1", ContentType::Movie, "1", 5.0),
            rating("u1", ContentType::Movie, "2", 4.0),
            rating("u2", ContentType::Song, "1", 5.0),
            rating("u2", ContentType::Song, "2", 4.0),
        ]);

        let neighbors = similar_users(&store, &UserId::new("u1"), &RecommenderConfig::default());
        assert!(neighbors.is_empty());
    }

    #[test]
    fn test_zero_valued_overlap_is_discarded() {
        let store = store_with_ratings(vec![
            rating("u1", ContentType::Movie, "m1", 5.0),
            rating("u1", ContentType::Movie, "m2", 4.0),
            rating("u2", ContentType::Movie, "m1", 0.0),
            rating("u2", ContentType::Movie, "m2", 0.0),
        ]);

        let neighbors = similar_users(&store, &UserId::new("u1"), &RecommenderConfig::default());
        assert!(neighbors.is_empty(), "zero dot product should not qualify");
    }

    #[test]
    fn test_agreement_on_overlap_counts_fully() {
        // u2 matches u1 exactly on the two shared items; u1's many other
        // ratings play no part because cosine only sees the overlap
        let store = store_with_ratings(vec![
            rating("u1", ContentType::Movie, "m1", 5.0),
            rating("u1", ContentType::Movie, "m2", 3.0),
            rating("u1", ContentType::Movie, "m3", 1.0),
            rating("u1", ContentType::Movie, "m4", 2.0),
            rating("u2", ContentType::Movie, "m1", 5.0),
            rating("u2", ContentType::Movie, "m2", 3.0),
        ]);

        let neighbors = similar_users(&store, &UserId::new("u1"), &RecommenderConfig::default());
        assert_eq!(neighbors.len(), 1);
        assert!(neighbors[0].1 > 0.99);
    }

    #[test]
    fn test_neighbors_sorted_descending_and_capped() {
        let mut ratings = vec![
            rating("u1", ContentType::Movie, "m1", 5.0),
            rating("u1", ContentType::Movie, "m2", 5.0),
        ];
        // Twelve candidates, each sharing both items with varying agreement
        for i in 0..12 {
            let name = format!("n{:02}", i);
            ratings.push(rating(&name, ContentType::Movie, "m1", 5.0));
            ratings.push(rating(&name, ContentType::Movie, "m2", 1.0 + (i as f64) / 4.0));
        }
        let store = store_with_ratings(ratings);

        let neighbors = similar_users(&store, &UserId::new("u1"), &RecommenderConfig::default());
        assert_eq!(neighbors.len(), 10, "neighbor list is capped at 10");
        for pair in neighbors.windows(2) {
            assert!(
                pair[0].1 >= pair[1].1,
                "neighbors must be sorted by similarity descending"
            );
        }
        // The closest candidate rates m2 highest, i.e. the last one built
        assert_eq!(neighbors[0].0.as_str(), "n11");
    }

    #[test]
    fn test_user_without_ratings_has_no_neighbors() {
        let store = store_with_ratings(vec![
            rating("u2", ContentType::Movie, "m1", 5.0),
            rating("u2", ContentType::Movie, "m2", 4.0),
        ]);

        let neighbors = similar_users(&store, &UserId::new("u1"), &RecommenderConfig::default());
        assert!(neighbors.is_empty());
    }
}
