//! Offline collaborative filtering trainer.
//!
//! Reads the ratings seed file, factorizes the user-item matrix with
//! ALS, and writes top-N picks per user to a JSON artifact that can be
//! served without recomputation.

mod als;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use als::{train, AlsConfig, TrainingSet};
use catalog::{seed, ContentId, UserId};

#[derive(Parser)]
#[command(name = "medley-train")]
#[command(about = "Train the ALS collaborative filtering model", long_about = None)]
struct Args {
    /// Directory holding the seed JSON files
    #[arg(long, default_value = "demos/seed")]
    data_dir: PathBuf,

    /// Output path for the generated recommendations
    #[arg(long, default_value = "recommendations.json")]
    output: PathBuf,

    /// Number of latent factors
    #[arg(long, default_value_t = 10)]
    rank: usize,

    /// Alternating update passes
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// L2 regularization strength
    #[arg(long, default_value_t = 0.01)]
    regularization: f64,

    /// Recommendations to keep per user
    #[arg(long, default_value_t = 10)]
    per_user: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRecommendations {
    user_id: UserId,
    recommendations: Vec<RecommendedItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendedItem {
    content_id: ContentId,
    score: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let ratings_path = args.data_dir.join("ratings.json");
    let ratings = seed::read_ratings(&ratings_path)
        .with_context(|| format!("Failed to read {}", ratings_path.display()))?;
    if ratings.is_empty() {
        anyhow::bail!("No ratings in {}", ratings_path.display());
    }

    let training = TrainingSet::from_ratings(&ratings);
    info!(
        "Training on {} ratings from {} users over {} items",
        training.rating_count(),
        training.user_count(),
        training.item_count()
    );

    let config = AlsConfig {
        rank: args.rank,
        iterations: args.iterations,
        regularization: args.regularization,
    };
    let model = train(&training, &config)?;
    info!("Training complete, rmse = {:.4}", model.rmse(&training));

    // Only users seen in training get predictions; everyone else is
    // served by the online popularity fallback
    let results: Vec<UserRecommendations> = (0..training.user_count())
        .map(|user_idx| UserRecommendations {
            user_id: training.user_id(user_idx).clone(),
            recommendations: model
                .recommend(&training, user_idx, args.per_user)
                .into_iter()
                .map(|(item_idx, score)| RecommendedItem {
                    content_id: training.item_id(item_idx).clone(),
                    score,
                })
                .collect(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&results)?;
    fs::write(&args.output, json)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(
        "Wrote recommendations for {} users to {}",
        results.len(),
        args.output.display()
    );

    Ok(())
}
