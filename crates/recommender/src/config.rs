//! Tuning knobs for the hybrid recommender.

/// Configuration for hybrid scoring.
///
/// The defaults reproduce the production blend: 60% content-based score,
/// 40% collaborative score, a 100-term TF-IDF vocabulary, up to 10
/// neighbors per user and at least 2 co-rated items before a neighbor is
/// considered at all.
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Weight of the content-based score in the final blend (default: 0.6)
    pub content_weight: f64,
    /// Weight of the collaborative score in the final blend (default: 0.4)
    pub collab_weight: f64,
    /// Vocabulary cap for the TF-IDF vectorizer (default: 100)
    pub max_vocabulary: usize,
    /// Maximum number of similar users considered per request (default: 10)
    pub neighbor_cap: usize,
    /// Minimum number of co-rated items for neighbor candidacy (default: 2)
    pub min_common_items: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            content_weight: 0.6,
            collab_weight: 0.4,
            max_vocabulary: 100,
            neighbor_cap: 10,
            min_common_items: 2,
        }
    }
}
