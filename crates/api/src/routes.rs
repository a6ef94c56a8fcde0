use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health_check))
        // Recommendations
        .route("/api/recommendations", post(handlers::get_recommendations))
        // Catalog views
        .route("/api/trending/:content_type", get(handlers::get_trending))
        .route("/api/similar", post(handlers::get_similar_items))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
