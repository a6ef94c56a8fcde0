//! Sparse rating vectors.
//!
//! A user's ratings form a sparse vector keyed by namespaced item keys
//! (`"movie_m1"`, `"book_b7"`, ...). Keys are kept in a `BTreeMap` so every
//! derived operation sees them in the same order, which keeps the
//! collaborative math deterministic.

use std::collections::BTreeMap;

/// A sparse vector of rating values keyed by string.
///
/// Inserting the same key twice keeps the last value, matching how a plain
/// dictionary of ratings behaves when a user has rated an item more than
/// once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: BTreeMap<String, f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a key, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys present in both vectors, in ascending key order
    pub fn common_keys<'a>(&'a self, other: &'a SparseVector) -> Vec<&'a str> {
        self.entries
            .keys()
            .filter(|key| other.entries.contains_key(*key))
            .map(String::as_str)
            .collect()
    }

    /// Project this vector onto an explicit key order.
    ///
    /// Missing keys project to 0.0.
    pub fn project(&self, keys: &[&str]) -> Vec<f64> {
        keys.iter()
            .map(|key| self.get(key).unwrap_or(0.0))
            .collect()
    }

    /// Dot product over the key intersection of both vectors
    pub fn dot(&self, other: &SparseVector) -> f64 {
        self.entries
            .iter()
            .filter_map(|(key, value)| other.entries.get(key).map(|v| value * v))
            .sum()
    }
}
