// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Root info and health endpoint tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use embedding_service::{
    api::{create_app, AppState},
    embeddings::HashedEmbeddingProvider,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_returns_static_metadata() {
    let app = create_app(AppState::new(Arc::new(HashedEmbeddingProvider::new(384))));
    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Embedding Service API",
            "model": "sentence-transformers/all-MiniLM-L6-v2",
            "max_tokens": 256,
            "dimensions": 384
        })
    );
}

#[tokio::test]
async fn test_root_without_provider() {
    let (status, body) = get_json(create_app(AppState::without_provider()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dimensions"], 384);
    assert_eq!(body["max_tokens"], 256);
}

#[tokio::test]
async fn test_health_with_provider() {
    let app = create_app(AppState::new(Arc::new(HashedEmbeddingProvider::new(384))));
    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_health_reports_healthy_without_provider() {
    // Health does not check the model
    let (status, body) = get_json(create_app(AppState::without_provider()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_app(AppState::without_provider());
    let req = Request::builder()
        .uri("/v1/embed")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
