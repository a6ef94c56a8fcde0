//! Hybrid recommendation engine.
//!
//! Blends content-based scores (TF-IDF text similarity between items)
//! with collaborative scores (ratings from users with similar taste),
//! then falls back to popularity so every caller gets a full page.
//!
//! # Main Components
//!
//! - [`Recommender`]: the engine; owns a shared [`catalog::ContentStore`]
//! - [`RecommenderConfig`]: blend weights and candidate thresholds
//! - [`similar_users`]: cross-type neighbor search over rating vectors
//! - [`ScoredItem`] / [`SimilarItem`]: response payloads
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use catalog::{ContentStore, ContentType, UserId};
//! use recommender::Recommender;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = Arc::new(ContentStore::load_from_dir(Path::new("demos/seed"))?);
//! let engine = Recommender::new(store);
//! let picks = engine.recommend(&UserId::new("u1"), ContentType::Movie, 10)?;
//! for pick in picks {
//!     println!("{} ({})", pick.item.title, pick.recommendation_score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod neighbors;
pub mod rating_index;
pub mod scorer;
pub mod sparse;
pub mod views;

pub use config::RecommenderConfig;
pub use neighbors::similar_users;
pub use scorer::{Recommender, ScoredItem};
pub use sparse::SparseVector;
pub use views::SimilarItem;
