//! Pairwise item-to-item similarity matrices.

use crate::features::feature_texts;
use crate::vectorizer::TfidfVectorizer;
use catalog::{ContentId, ContentStore, ContentType};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Symmetric item-to-item similarity matrix for one content type.
///
/// Values are cosine similarities of TF-IDF feature rows, stored row-major.
/// The diagonal is exactly 1.0 by construction, and `values[i][j] ==
/// values[j][i]` because the upper triangle is computed once and mirrored.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    item_ids: Vec<ContentId>,
    positions: HashMap<ContentId, usize>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of items covered by the matrix
    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }

    /// Item ids in matrix row order
    pub fn item_ids(&self) -> &[ContentId] {
        &self.item_ids
    }

    /// Row index of an item, if the matrix covers it
    pub fn position(&self, id: &ContentId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// One full row of similarities
    pub fn row(&self, index: usize) -> &[f64] {
        let n = self.len();
        &self.values[index * n..(index + 1) * n]
    }

    /// Similarity between two items by row index
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }
}

/// Build the similarity matrix over every item of `content_type`.
///
/// Returns `None` when no matrix can be built, either because the
/// collection is empty or because no vocabulary survives tokenization.
/// Callers treat `None` as "similarity unavailable" and fall back to
/// popularity-based orderings instead of failing.
#[instrument(skip(store))]
pub fn compute_similarity(
    store: &ContentStore,
    content_type: ContentType,
    max_vocabulary: usize,
) -> Option<SimilarityMatrix> {
    let pairs = feature_texts(store, content_type);
    if pairs.is_empty() {
        debug!("no items for {}, similarity unavailable", content_type);
        return None;
    }

    let (item_ids, texts): (Vec<ContentId>, Vec<String>) = pairs.into_iter().unzip();

    let mut vectorizer = TfidfVectorizer::new().with_max_features(max_vocabulary);
    let rows = match vectorizer.fit_transform(&texts) {
        Ok(rows) => rows,
        Err(err) => {
            debug!("similarity unavailable for {}: {}", content_type, err);
            return None;
        }
    };

    let n = item_ids.len();
    let width = vectorizer.vocabulary_len();

    // Rows are unit-length, so cosine reduces to a dot product. Compute the
    // upper triangle in parallel, then mirror it below the diagonal.
    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let row_i = &rows[i * width..(i + 1) * width];
            ((i + 1)..n)
                .map(|j| {
                    let row_j = &rows[j * width..(j + 1) * width];
                    row_i.iter().zip(row_j).map(|(a, b)| a * b).sum()
                })
                .collect()
        })
        .collect();

    let mut values = vec![0.0; n * n];
    for i in 0..n {
        values[i * n + i] = 1.0;
        for (offset, &sim) in upper[i].iter().enumerate() {
            let j = i + 1 + offset;
            values[i * n + j] = sim;
            values[j * n + i] = sim;
        }
    }

    let positions = item_ids
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, id)| (id, index))
        .collect();

    debug!("built {}x{} similarity matrix over {} terms", n, n, width);

    Some(SimilarityMatrix {
        item_ids,
        positions,
        values,
    })
}
