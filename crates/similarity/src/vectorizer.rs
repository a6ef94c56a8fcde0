//! TF-IDF vectorization of feature text.
//!
//! The vectorizer mirrors the common TF-IDF defaults: tokens are lowercase
//! runs of at least two word characters, English stop words are dropped,
//! idf is smoothed, and rows are L2-normalized. Because rows come out
//! unit-length, the cosine similarity of two documents is just the dot
//! product of their rows.

use crate::stopwords::is_stop_word;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors from fitting or applying a [`TfidfVectorizer`]
#[derive(Error, Debug)]
pub enum VectorizeError {
    /// No terms survived tokenization and stop-word removal
    #[error("Empty vocabulary: no terms survived tokenization and stop-word removal")]
    EmptyVocabulary,

    /// `transform` was called before `fit`
    #[error("Vectorizer has not been fitted")]
    NotFitted,
}

/// Term-frequency / inverse-document-frequency vectorizer.
///
/// The vocabulary is capped at `max_features` terms chosen by total corpus
/// frequency, with alphabetical order breaking ties so fits are
/// deterministic.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: 100,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Set the vocabulary cap (default: 100)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Number of terms in the fitted vocabulary
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Learn the vocabulary and document frequencies from a corpus
    pub fn fit(&mut self, documents: &[String]) -> Result<(), VectorizeError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_frequency: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                *term_counts.entry(token).or_insert(0) += 1;
                if seen.insert(token) {
                    *doc_frequency.entry(token).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        // Keep the most frequent terms; ties resolve alphabetically
        let mut candidates: Vec<(&str, usize)> = term_counts.into_iter().collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        candidates.truncate(self.max_features);

        let n_docs = documents.len() as f64;
        self.vocabulary = HashMap::with_capacity(candidates.len());
        self.idf = Vec::with_capacity(candidates.len());
        for (column, (term, _)) in candidates.into_iter().enumerate() {
            // Smoothed idf: ln((1 + n) / (1 + df)) + 1
            let df = doc_frequency.get(term).copied().unwrap_or(0) as f64;
            self.idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            self.vocabulary.insert(term.to_string(), column);
        }

        Ok(())
    }

    /// Produce the TF-IDF matrix for a corpus as a row-major `Vec<f64>`.
    ///
    /// Each row has [`vocabulary_len`](Self::vocabulary_len) columns and is
    /// L2-normalized. Documents with no in-vocabulary terms come out as
    /// all-zero rows, which makes their cosine against anything 0.
    pub fn transform(&self, documents: &[String]) -> Result<Vec<f64>, VectorizeError> {
        if self.vocabulary.is_empty() {
            return Err(VectorizeError::NotFitted);
        }

        let width = self.vocabulary.len();
        let mut rows = vec![0.0; documents.len() * width];
        for (doc_index, doc) in documents.iter().enumerate() {
            let row = &mut rows[doc_index * width..(doc_index + 1) * width];
            for token in tokenize(doc) {
                if let Some(&column) = self.vocabulary.get(token.as_str()) {
                    row[column] += 1.0;
                }
            }
            for (column, value) in row.iter_mut().enumerate() {
                *value *= self.idf[column];
            }
            normalize_row(row);
        }

        Ok(rows)
    }

    /// Fit on a corpus and transform it in one step
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<f64>, VectorizeError> {
        self.fit(documents)?;
        self.transform(documents)
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into lowercase tokens of two or more word characters,
/// dropping stop words. Single-character tokens carry no signal and are
/// discarded, matching the usual TF-IDF token pattern.
fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in lower.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.push(ch);
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, current);
    }
    tokens
}

fn push_token(tokens: &mut Vec<String>, token: String) {
    if token.chars().count() >= 2 && !is_stop_word(&token) {
        tokens.push(token);
    }
}

/// L2-normalize a row in place. All-zero rows are left untouched.
fn normalize_row(row: &mut [f64]) {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in row.iter_mut() {
            *value /= norm;
        }
    }
}
