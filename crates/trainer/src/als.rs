//! Alternating least squares over explicit ratings.
//!
//! Factorizes the user-item rating matrix into low-rank user and item
//! factors. Each half is solved in turn from the normal equations, with
//! the regularized system solved by Cholesky decomposition.

use anyhow::{Context, Result};
use catalog::{ContentId, Rating, UserId};
use ndarray::{Array1, Array2};
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

/// Training parameters
#[derive(Debug, Clone)]
pub struct AlsConfig {
    /// Number of latent factors
    pub rank: usize,
    /// Alternating update passes
    pub iterations: usize,
    /// L2 regularization strength (lambda)
    pub regularization: f64,
}

impl Default for AlsConfig {
    fn default() -> Self {
        Self {
            rank: 10,
            iterations: 10,
            regularization: 0.01,
        }
    }
}

/// Indexed view of the raw ratings.
///
/// Users and items get dense indices in first-seen order; the original
/// string ids are kept so trained factors can be reported against them.
pub struct TrainingSet {
    user_ids: Vec<UserId>,
    item_ids: Vec<ContentId>,
    by_user: Vec<Vec<(usize, f64)>>,
    by_item: Vec<Vec<(usize, f64)>>,
    rating_count: usize,
}

impl TrainingSet {
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let mut user_indices: HashMap<&UserId, usize> = HashMap::new();
        let mut item_indices: HashMap<&ContentId, usize> = HashMap::new();
        let mut user_ids = Vec::new();
        let mut item_ids = Vec::new();
        let mut by_user: Vec<Vec<(usize, f64)>> = Vec::new();
        let mut by_item: Vec<Vec<(usize, f64)>> = Vec::new();

        for rating in ratings {
            let user_idx = *user_indices.entry(&rating.user_id).or_insert_with(|| {
                user_ids.push(rating.user_id.clone());
                by_user.push(Vec::new());
                user_ids.len() - 1
            });
            let item_idx = *item_indices.entry(&rating.content_id).or_insert_with(|| {
                item_ids.push(rating.content_id.clone());
                by_item.push(Vec::new());
                item_ids.len() - 1
            });

            by_user[user_idx].push((item_idx, rating.rating));
            by_item[item_idx].push((user_idx, rating.rating));
        }

        let rating_count = ratings.len();
        Self {
            user_ids,
            item_ids,
            by_user,
            by_item,
            rating_count,
        }
    }

    pub fn user_count(&self) -> usize {
        self.user_ids.len()
    }

    pub fn item_count(&self) -> usize {
        self.item_ids.len()
    }

    pub fn rating_count(&self) -> usize {
        self.rating_count
    }

    pub fn user_id(&self, user_idx: usize) -> &UserId {
        &self.user_ids[user_idx]
    }

    pub fn item_id(&self, item_idx: usize) -> &ContentId {
        &self.item_ids[item_idx]
    }

    pub fn ratings_by_user(&self, user_idx: usize) -> &[(usize, f64)] {
        &self.by_user[user_idx]
    }
}

/// Trained factor matrices
pub struct AlsModel {
    user_factors: Array2<f64>,
    item_factors: Array2<f64>,
}

impl AlsModel {
    /// Predicted rating for an indexed user-item pair
    pub fn predict(&self, user_idx: usize, item_idx: usize) -> f64 {
        self.user_factors
            .row(user_idx)
            .dot(&self.item_factors.row(item_idx))
    }

    /// Root mean squared error over the observed ratings
    pub fn rmse(&self, training: &TrainingSet) -> f64 {
        training_rmse(&self.user_factors, &self.item_factors, training)
    }

    /// Top scoring unrated items for a training user, best first
    pub fn recommend(
        &self,
        training: &TrainingSet,
        user_idx: usize,
        limit: usize,
    ) -> Vec<(usize, f64)> {
        let rated: Vec<usize> = training
            .ratings_by_user(user_idx)
            .iter()
            .map(|&(item_idx, _)| item_idx)
            .collect();

        let mut scored: Vec<(usize, f64)> = (0..training.item_count())
            .filter(|item_idx| !rated.contains(item_idx))
            .map(|item_idx| (item_idx, self.predict(user_idx, item_idx)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored
    }
}

/// Fit user and item factors to the observed ratings.
pub fn train(training: &TrainingSet, config: &AlsConfig) -> Result<AlsModel> {
    let rank = config.rank;
    let mut rng = rand::rng();

    let mut user_factors = Array2::<f64>::zeros((training.user_count(), rank));
    let mut item_factors = Array2::<f64>::zeros((training.item_count(), rank));
    for value in user_factors.iter_mut() {
        *value = rng.random_range(-0.1..0.1);
    }
    for value in item_factors.iter_mut() {
        *value = rng.random_range(-0.1..0.1);
    }

    for iteration in 0..config.iterations {
        // Fix item factors, solve each user row
        for user_idx in 0..training.user_count() {
            let solved = solve_factors(
                &training.by_user[user_idx],
                &item_factors,
                config.regularization,
            )
            .with_context(|| format!("Failed to solve factors for user row {}", user_idx))?;
            user_factors.row_mut(user_idx).assign(&solved);
        }

        // Fix user factors, solve each item row
        for item_idx in 0..training.item_count() {
            let solved = solve_factors(
                &training.by_item[item_idx],
                &user_factors,
                config.regularization,
            )
            .with_context(|| format!("Failed to solve factors for item row {}", item_idx))?;
            item_factors.row_mut(item_idx).assign(&solved);
        }

        debug!(
            "Iteration {}: rmse = {:.4}",
            iteration + 1,
            training_rmse(&user_factors, &item_factors, training)
        );
    }

    Ok(AlsModel {
        user_factors,
        item_factors,
    })
}

fn training_rmse(
    user_factors: &Array2<f64>,
    item_factors: &Array2<f64>,
    training: &TrainingSet,
) -> f64 {
    if training.rating_count() == 0 {
        return 0.0;
    }

    let mut squared_error = 0.0;
    for user_idx in 0..training.user_count() {
        for &(item_idx, rating) in training.ratings_by_user(user_idx) {
            let error = rating - user_factors.row(user_idx).dot(&item_factors.row(item_idx));
            squared_error += error * error;
        }
    }
    (squared_error / training.rating_count() as f64).sqrt()
}

/// Normal equations for one factor row: (V^T V + lambda I) x = V^T r,
/// where V holds the fixed factors of the observed counterparts.
fn solve_factors(
    observed: &[(usize, f64)],
    fixed: &Array2<f64>,
    regularization: f64,
) -> Result<Array1<f64>> {
    let rank = fixed.ncols();
    let mut a = Array2::<f64>::zeros((rank, rank));
    let mut b = Array1::<f64>::zeros(rank);

    for &(other_idx, rating) in observed {
        let row = fixed.row(other_idx);
        for i in 0..rank {
            for j in 0..rank {
                a[[i, j]] += row[i] * row[j];
            }
            b[i] += rating * row[i];
        }
    }

    for i in 0..rank {
        a[[i, i]] += regularization;
    }

    solve_cholesky(&a, &b)
}

/// Solve A x = b for symmetric positive definite A via A = L L^T.
fn solve_cholesky(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    anyhow::bail!("Matrix is not positive definite");
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L y = b
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T x = y
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Ok(x)
}
