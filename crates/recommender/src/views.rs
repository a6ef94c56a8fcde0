//! Catalog views that need no user history: trending and similar items.

use catalog::{ContentId, ContentItem, ContentType};
use serde::Serialize;
use similarity::compute_similarity;

use crate::scorer::{round3, Recommender};

/// An item related to a query item. `similarity` is absent when the
/// result came from the popularity fallback rather than the matrix.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarItem {
    #[serde(flatten)]
    pub item: ContentItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl Recommender {
    /// The most-rated items of a content type, ties broken by average
    /// rating descending.
    pub fn trending(&self, content_type: ContentType, limit: usize) -> Vec<ContentItem> {
        let mut items: Vec<&ContentItem> = self.store().items(content_type).collect();
        items.sort_by(|a, b| {
            b.rating_count.cmp(&a.rating_count).then_with(|| {
                b.average_rating
                    .partial_cmp(&a.average_rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        items.truncate(limit);
        items.into_iter().cloned().collect()
    }

    /// Items most similar to `content_id` within its own content type.
    ///
    /// When no similarity matrix can be built, or the id is not in it,
    /// falls back to up to `limit` other items of the type with no
    /// similarity attached. The query item itself is excluded by matrix
    /// position, so a duplicate listing elsewhere in the catalog can
    /// still be returned.
    pub fn similar_items(
        &self,
        content_id: &ContentId,
        content_type: ContentType,
        limit: usize,
    ) -> Vec<SimilarItem> {
        let Some(matrix) =
            compute_similarity(self.store(), content_type, self.config().max_vocabulary)
        else {
            return self.similar_fallback(content_id, content_type, limit);
        };
        let Some(index) = matrix.position(content_id) else {
            return self.similar_fallback(content_id, content_type, limit);
        };

        let row = matrix.row(index);
        let mut ranked: Vec<(usize, f64)> = (0..matrix.len())
            .filter(|&i| i != index)
            .map(|i| (i, row[i]))
            .collect();
        // Stable sort keeps id order among equal similarities
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(limit);

        ranked
            .into_iter()
            .filter_map(|(i, similarity)| {
                let item = self.store().get_item(content_type, &matrix.item_ids()[i])?;
                Some(SimilarItem {
                    item: item.clone(),
                    similarity: Some(round3(similarity)),
                })
            })
            .collect()
    }

    fn similar_fallback(
        &self,
        content_id: &ContentId,
        content_type: ContentType,
        limit: usize,
    ) -> Vec<SimilarItem> {
        self.store()
            .items(content_type)
            .filter(|item| &item.id != content_id)
            .take(limit)
            .map(|item| SimilarItem {
                item: item.clone(),
                similarity: None,
            })
            .collect()
    }
}
