use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use catalog::{ContentId, ContentItem, ContentType, UserId};
use recommender::{ScoredItem, SimilarItem};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub user_id: String,
    pub content_type: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarItemsRequest {
    pub content_id: String,
    pub content_type: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<ScoredItem>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub trending: Vec<ContentItem>,
}

#[derive(Debug, Serialize)]
pub struct SimilarItemsResponse {
    pub similar: Vec<SimilarItem>,
}

fn parse_content_type(raw: &str) -> ApiResult<ContentType> {
    raw.parse()
        .map_err(|_| ApiError::InvalidInput("Invalid content type".to_string()))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "message": "Medley API is running" }))
}

/// Personalized recommendations for a user within one content type
pub async fn get_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> ApiResult<Json<RecommendationsResponse>> {
    let content_type = parse_content_type(&request.content_type)?;
    let user_id = UserId::new(request.user_id);
    let limit = request.limit;

    // Scoring walks the whole similarity matrix, so keep it off the
    // async worker threads
    let engine = state.recommender.clone();
    let recommendations =
        tokio::task::spawn_blocking(move || engine.recommend(&user_id, content_type, limit))
            .await
            .context("recommendation task panicked")??;

    Ok(Json(RecommendationsResponse { recommendations }))
}

/// Most-rated items of a content type
pub async fn get_trending(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
    Query(query): Query<TrendingQuery>,
) -> ApiResult<Json<TrendingResponse>> {
    let content_type = parse_content_type(&content_type)?;
    let trending = state.recommender.trending(content_type, query.limit);
    Ok(Json(TrendingResponse { trending }))
}

/// Items most similar to a given item
pub async fn get_similar_items(
    State(state): State<AppState>,
    Json(request): Json<SimilarItemsRequest>,
) -> ApiResult<Json<SimilarItemsResponse>> {
    let content_type = parse_content_type(&request.content_type)?;
    let content_id = ContentId::new(request.content_id);
    let limit = request.limit;

    let engine = state.recommender.clone();
    let similar =
        tokio::task::spawn_blocking(move || engine.similar_items(&content_id, content_type, limit))
            .await
            .context("similarity task panicked")?;

    Ok(Json(SimilarItemsResponse { similar }))
}
