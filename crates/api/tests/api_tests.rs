use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use api::{create_router, AppState};
use catalog::{ContentId, ContentItem, ContentStore, ContentType, Rating, UserId};

fn movie(id: &str, description: &str, genre: &str, average: f64, count: u64) -> ContentItem {
    ContentItem {
        id: ContentId::new(id),
        title: format!("Title {}", id),
        genres: vec![genre.to_string()],
        description: Some(description.to_string()),
        artist: None,
        album: None,
        author: None,
        average_rating: average,
        rating_count: count,
    }
}

fn create_test_server() -> TestServer {
    let mut store = ContentStore::new();
    store.insert_item(
        ContentType::Movie,
        movie("m1", "starship crew explores deep space", "Sci-Fi", 4.5, 40),
    );
    store.insert_item(
        ContentType::Movie,
        movie("m2", "starship crew explores distant galaxy", "Sci-Fi", 4.2, 25),
    );
    store.insert_item(
        ContentType::Movie,
        movie("m3", "lighthouse keeper guards a secret", "Drama", 4.9, 60),
    );
    store.insert_rating(Rating {
        user_id: UserId::new("alice"),
        content_type: ContentType::Movie,
        content_id: ContentId::new("m1"),
        rating: 5.0,
    });

    let state = AppState::new(Arc::new(store));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Medley API is running");
}

#[tokio::test]
async fn test_get_recommendations() {
    let server = create_test_server();

    let response = server
        .post("/api/recommendations")
        .json(&json!({
            "userId": "alice",
            "contentType": "movie",
            "limit": 10
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();

    assert_eq!(recommendations.len(), 2, "both unrated movies come back");
    assert_eq!(recommendations[0]["_id"], "m2", "textual match ranks first");
    for rec in recommendations {
        assert_ne!(rec["_id"], "m1", "rated movie must not appear");
        assert!(rec["recommendationScore"].is_number());
        assert!(rec["title"].is_string());
    }
}

#[tokio::test]
async fn test_recommendations_default_limit() {
    let server = create_test_server();

    let response = server
        .post("/api/recommendations")
        .json(&json!({
            "userId": "alice",
            "contentType": "movie"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["recommendations"].as_array().unwrap().len() <= 10);
}

#[tokio::test]
async fn test_recommendations_invalid_content_type() {
    let server = create_test_server();

    let response = server
        .post("/api/recommendations")
        .json(&json!({
            "userId": "alice",
            "contentType": "album"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid content type");
}

#[tokio::test]
async fn test_recommendations_cold_start_user() {
    let server = create_test_server();

    let response = server
        .post("/api/recommendations")
        .json(&json!({
            "userId": "nobody",
            "contentType": "movie"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();

    assert_eq!(recommendations.len(), 3);
    assert_eq!(recommendations[0]["_id"], "m3", "popularity order for new users");
}

#[tokio::test]
async fn test_get_trending() {
    let server = create_test_server();

    let response = server
        .get("/api/trending/movie")
        .add_query_param("limit", 2)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let trending = body["trending"].as_array().unwrap();

    assert_eq!(trending.len(), 2);
    assert_eq!(trending[0]["_id"], "m3", "most ratings first");
    assert_eq!(trending[1]["_id"], "m1");
}

#[tokio::test]
async fn test_trending_invalid_content_type() {
    let server = create_test_server();

    let response = server.get("/api/trending/album").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_similar_items() {
    let server = create_test_server();

    let response = server
        .post("/api/similar")
        .json(&json!({
            "contentId": "m1",
            "contentType": "movie"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let similar = body["similar"].as_array().unwrap();

    assert_eq!(similar.len(), 2);
    assert_eq!(similar[0]["_id"], "m2");
    assert!(similar[0]["similarity"].is_number());
}

#[tokio::test]
async fn test_similar_items_unknown_id_falls_back() {
    let server = create_test_server();

    let response = server
        .post("/api/similar")
        .json(&json!({
            "contentId": "zzz",
            "contentType": "movie",
            "limit": 2
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let similar = body["similar"].as_array().unwrap();

    assert_eq!(similar.len(), 2);
    for entry in similar {
        assert!(
            entry.get("similarity").is_none(),
            "fallback results carry no similarity score"
        );
    }
}
