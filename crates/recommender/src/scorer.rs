//! Hybrid recommendation scoring.
//!
//! Combines two signals for a user and a content type:
//! 1. Content-based: items textually similar to what the user already rated
//! 2. Collaborative: items that similar users rated well
//!
//! Both score maps are max-scaled to [0, 1], blended with fixed weights,
//! ranked, and padded with popular items when the blend comes up short.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use catalog::{ContentId, ContentItem, ContentStore, ContentType, Rating, UserId};
use serde::Serialize;
use similarity::{compute_similarity, SimilarityMatrix};
use tracing::{info, instrument};

use crate::config::RecommenderConfig;
use crate::neighbors::similar_users;

/// A recommended item together with its blended score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub recommendation_score: f64,
}

/// Hybrid recommendation engine over an in-memory content store.
pub struct Recommender {
    store: Arc<ContentStore>,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self {
            store,
            config: RecommenderConfig::default(),
        }
    }

    pub fn with_config(store: Arc<ContentStore>, config: RecommenderConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub(crate) fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommend up to `limit` items of `content_type` for `user_id`.
    ///
    /// Items the user has already rated within this content type never
    /// appear. A user with no ratings anywhere falls straight through to
    /// the popularity padding, so cold-start callers still get results.
    #[instrument(skip(self))]
    pub fn recommend(
        &self,
        user_id: &UserId,
        content_type: ContentType,
        limit: usize,
    ) -> Result<Vec<ScoredItem>> {
        let start_time = Instant::now();

        // Only ratings within the requested type drive the scores
        let typed_ratings: Vec<&Rating> = self
            .store
            .user_ratings(user_id)
            .iter()
            .filter(|r| r.content_type == content_type)
            .collect();
        let rated_ids: HashSet<&ContentId> =
            typed_ratings.iter().map(|r| &r.content_id).collect();
        info!(
            "User {} has {} {} ratings",
            user_id,
            typed_ratings.len(),
            content_type
        );

        let matrix = compute_similarity(&self.store, content_type, self.config.max_vocabulary);
        let content_scores = self.content_scores(matrix.as_ref(), &typed_ratings, &rated_ids);
        info!("Content-based pass scored {} candidates", content_scores.len());

        let neighbors = similar_users(&self.store, user_id, &self.config);
        let collab_scores = self.collab_scores(&neighbors, content_type, &rated_ids);
        info!(
            "Collaborative pass scored {} candidates from {} neighbors",
            collab_scores.len(),
            neighbors.len()
        );

        let blended = self.blend(content_scores, collab_scores);
        let ranked = self.rank_and_pad(blended, &rated_ids, content_type, limit);
        let recommendations = self.hydrate(ranked, content_type);

        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Accumulate similarity-weighted scores from the user's own ratings.
    ///
    /// Every unrated item in the matrix receives an entry, even at zero,
    /// so the candidate pool is the full matrix minus the rated items.
    fn content_scores(
        &self,
        matrix: Option<&SimilarityMatrix>,
        typed_ratings: &[&Rating],
        rated_ids: &HashSet<&ContentId>,
    ) -> BTreeMap<ContentId, f64> {
        let mut scores = BTreeMap::new();
        let Some(matrix) = matrix else {
            return scores;
        };

        for rating in typed_ratings {
            let Some(index) = matrix.position(&rating.content_id) else {
                continue;
            };
            let row = matrix.row(index);
            for (i, item_id) in matrix.item_ids().iter().enumerate() {
                if rated_ids.contains(item_id) {
                    continue;
                }
                *scores.entry(item_id.clone()).or_insert(0.0) += row[i] * rating.rating;
            }
        }

        scores
    }

    /// Accumulate neighbor ratings weighted by neighbor similarity.
    fn collab_scores(
        &self,
        neighbors: &[(UserId, f64)],
        content_type: ContentType,
        rated_ids: &HashSet<&ContentId>,
    ) -> BTreeMap<ContentId, f64> {
        let mut scores = BTreeMap::new();

        for (neighbor_id, similarity) in neighbors {
            for rating in self.store.user_ratings(neighbor_id) {
                if rating.content_type != content_type || rated_ids.contains(&rating.content_id) {
                    continue;
                }
                *scores.entry(rating.content_id.clone()).or_insert(0.0) +=
                    rating.rating * similarity;
            }
        }

        scores
    }

    /// Max-scale each signal to [0, 1] and combine with the configured
    /// weights. Items present in only one map keep the other weight at 0.
    fn blend(
        &self,
        content_scores: BTreeMap<ContentId, f64>,
        collab_scores: BTreeMap<ContentId, f64>,
    ) -> BTreeMap<ContentId, f64> {
        let content_scores = max_scaled(content_scores);
        let collab_scores = max_scaled(collab_scores);

        let mut blended = BTreeMap::new();
        for (item_id, score) in content_scores {
            blended.insert(item_id, score * self.config.content_weight);
        }
        for (item_id, score) in collab_scores {
            *blended.entry(item_id).or_insert(0.0) += score * self.config.collab_weight;
        }
        blended
    }

    /// Sort candidates by score descending (ties by id ascending) and top
    /// up with the highest-rated unrated items when there are fewer
    /// candidates than `limit`. Padded items carry their average rating
    /// as the score and are appended after the blended candidates.
    fn rank_and_pad(
        &self,
        blended: BTreeMap<ContentId, f64>,
        rated_ids: &HashSet<&ContentId>,
        content_type: ContentType,
        limit: usize,
    ) -> Vec<(ContentId, f64)> {
        let mut ranked: Vec<(ContentId, f64)> = blended.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(limit);

        if ranked.len() < limit {
            let selected: HashSet<ContentId> = ranked.iter().map(|(id, _)| id.clone()).collect();
            let mut popular: Vec<&ContentItem> = self.store.items(content_type).collect();
            popular.sort_by(|a, b| {
                b.average_rating
                    .partial_cmp(&a.average_rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            for item in popular {
                if ranked.len() >= limit {
                    break;
                }
                if rated_ids.contains(&item.id) || selected.contains(&item.id) {
                    continue;
                }
                ranked.push((item.id.clone(), item.average_rating));
            }
        }

        ranked
    }

    /// Resolve scored ids back to full items, dropping any id that has
    /// vanished from the store.
    fn hydrate(&self, ranked: Vec<(ContentId, f64)>, content_type: ContentType) -> Vec<ScoredItem> {
        ranked
            .into_iter()
            .filter_map(|(item_id, score)| {
                let item = self.store.get_item(content_type, &item_id)?;
                Some(ScoredItem {
                    item: item.clone(),
                    recommendation_score: round3(score),
                })
            })
            .collect()
    }
}

/// Divide every score by the map's maximum when that maximum is positive.
fn max_scaled(mut scores: BTreeMap<ContentId, f64>) -> BTreeMap<ContentId, f64> {
    let Some(max) = scores.values().copied().reduce(f64::max) else {
        return scores;
    };
    if max > 0.0 {
        for value in scores.values_mut() {
            *value /= max;
        }
    }
    scores
}

/// Round to three decimal places for response payloads.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
