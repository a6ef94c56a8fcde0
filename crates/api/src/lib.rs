//! HTTP API for the Medley recommendation engine.
//!
//! Exposes the recommender over four routes:
//!
//! - `GET /` health check
//! - `POST /api/recommendations` personalized picks for a user
//! - `GET /api/trending/:content_type` most-rated items
//! - `POST /api/similar` items similar to a given item

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
