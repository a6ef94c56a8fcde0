use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use catalog::{ContentId, ContentStore, ContentType, UserId};
use recommender::{Recommender, ScoredItem};

/// Medley - Hybrid Media Recommendation Engine
#[derive(Parser)]
#[command(name = "medley")]
#[command(about = "Recommendations across movies, songs, books, and series", long_about = None)]
struct Cli {
    /// Path to the seed data directory
    #[arg(short, long, default_value = "demos/seed")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: String,

        /// Content type: movie, song, book, or series
        #[arg(long)]
        content_type: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Find items similar to a given item
    Similar {
        /// Item ID to match against
        #[arg(long)]
        content_id: String,

        /// Content type: movie, song, book, or series
        #[arg(long)]
        content_type: String,

        /// Number of similar items to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show the most-rated items of a content type
    Trending {
        /// Content type: movie, song, book, or series
        #[arg(long)]
        content_type: String,

        /// Number of items to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Summarize the loaded catalog and its ratings
    Stats,

    /// Run benchmark to test recommendation latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog from {}...", cli.data_dir.display());
    let start = Instant::now();
    let store = Arc::new(ContentStore::load_from_dir(&cli.data_dir)?);
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend {
            user_id,
            content_type,
            limit,
        } => handle_recommend(store, user_id, content_type, limit)?,
        Commands::Similar {
            content_id,
            content_type,
            limit,
        } => handle_similar(store, content_id, content_type, limit)?,
        Commands::Trending {
            content_type,
            limit,
        } => handle_trending(store, content_type, limit)?,
        Commands::Stats => handle_stats(store)?,
        Commands::Benchmark { requests } => handle_benchmark(store, requests)?,
    }

    Ok(())
}

fn parse_content_type(raw: &str) -> Result<ContentType> {
    raw.parse()
        .map_err(|_| anyhow!("Unknown content type '{}' (expected movie, song, book, or series)", raw))
}

/// Handle the 'recommend' command
fn handle_recommend(
    store: Arc<ContentStore>,
    user_id: String,
    content_type: String,
    limit: usize,
) -> Result<()> {
    let content_type = parse_content_type(&content_type)?;
    let user_id = UserId::new(user_id);

    if store.user_ratings(&user_id).is_empty() {
        println!(
            "{}",
            format!("User {} has no ratings; showing popular items", user_id).yellow()
        );
    }

    let engine = Recommender::new(store);
    let recommendations = engine.recommend(&user_id, content_type, limit)?;

    println!(
        "{}",
        format!("Top {} picks for user {}:", content_type, user_id).bold().blue()
    );
    print_scored_items(&recommendations);
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(
    store: Arc<ContentStore>,
    content_id: String,
    content_type: String,
    limit: usize,
) -> Result<()> {
    let content_type = parse_content_type(&content_type)?;
    let content_id = ContentId::new(content_id);

    let engine = Recommender::new(store);
    let similar = engine.similar_items(&content_id, content_type, limit);

    println!(
        "{}",
        format!("Items similar to {}:", content_id).bold().blue()
    );
    if similar.iter().all(|entry| entry.similarity.is_none()) && !similar.is_empty() {
        println!(
            "{}",
            "Item is not in the similarity matrix; showing other items".yellow()
        );
    }
    for (i, entry) in similar.iter().enumerate() {
        let genres = entry.item.genres.join(", ");
        match entry.similarity {
            Some(similarity) => println!(
                "{}. {} [{}] - Similarity: {:.3}",
                (i + 1).to_string().green(),
                entry.item.title,
                genres,
                similarity
            ),
            None => println!(
                "{}. {} [{}]",
                (i + 1).to_string().green(),
                entry.item.title,
                genres
            ),
        }
    }
    Ok(())
}

/// Handle the 'trending' command
fn handle_trending(store: Arc<ContentStore>, content_type: String, limit: usize) -> Result<()> {
    let content_type = parse_content_type(&content_type)?;

    let engine = Recommender::new(store);
    let trending = engine.trending(content_type, limit);

    println!("{}", format!("Trending {}:", content_type).bold().blue());
    for (i, item) in trending.iter().enumerate() {
        println!(
            "{}. {} - {} ratings, avg {:.2}",
            (i + 1).to_string().green(),
            item.title,
            item.rating_count,
            item.average_rating
        );
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(store: Arc<ContentStore>) -> Result<()> {
    println!("{}", "Catalog statistics:".bold().blue());
    for content_type in ContentType::ALL {
        println!(
            "{}{}: {} items",
            "• ".green(),
            content_type,
            store.item_count(content_type)
        );
        let mut top: Vec<_> = store.items(content_type).collect();
        top.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for item in top.iter().take(3) {
            println!(
                "  - {} ({:.2} avg, {} ratings)",
                item.title, item.average_rating, item.rating_count
            );
        }
    }

    let (_, user_count, rating_count) = store.counts();
    println!(
        "{}Ratings: {} from {} users",
        "• ".cyan(),
        rating_count,
        user_count
    );

    // Distribution over rating values, keyed in tenths to stay ordered
    let mut distribution: std::collections::BTreeMap<i64, usize> = std::collections::BTreeMap::new();
    for rating in store.all_ratings() {
        *distribution.entry((rating.rating * 10.0).round() as i64).or_insert(0) += 1;
    }
    println!("Rating distribution:");
    for (key, count) in distribution {
        println!("  {:.1}: {}", key as f64 / 10.0, count);
    }

    println!("Average rating by content type:");
    for content_type in ContentType::ALL {
        let (total, count) = store
            .all_ratings()
            .filter(|r| r.content_type == content_type)
            .fold((0.0, 0usize), |(total, count), r| (total + r.rating, count + 1));
        if count > 0 {
            println!("  {}: {:.2} ({} ratings)", content_type, total / count as f64, count);
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(store: Arc<ContentStore>, requests: usize) -> Result<()> {
    use rand::Rng;

    let users: Vec<UserId> = store
        .users_with_ratings()
        .map(|(user_id, _)| user_id.clone())
        .collect();
    if users.is_empty() {
        anyhow::bail!("No rated users in the catalog to benchmark with");
    }

    let engine = Recommender::new(store);
    let mut rng = rand::rng();

    let mut timings = Vec::with_capacity(requests);
    for i in 0..requests {
        let user = &users[rng.random_range(0..users.len())];
        let content_type = ContentType::ALL[i % ContentType::ALL.len()];
        let start = Instant::now();
        engine.recommend(user, content_type, 10)?;
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_scored_items(recommendations: &[ScoredItem]) {
    if recommendations.is_empty() {
        println!("{}", "Nothing left to recommend".yellow());
        return;
    }
    for (i, rec) in recommendations.iter().enumerate() {
        let genres = rec.item.genres.join(", ");
        println!(
            "{}. {} [{}] - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.item.title,
            genres,
            rec.recommendation_score
        );
        if let Some(artist) = &rec.item.artist {
            println!("   by {}", artist);
        }
        if let Some(author) = &rec.item.author {
            println!("   by {}", author);
        }
    }
}
