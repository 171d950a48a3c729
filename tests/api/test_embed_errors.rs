// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Error handling tests for POST /v1/embeddings
//!
//! Provider failures of any kind surface as 500 with the provider message
//! copied into `detail`. Bodies that do not parse are rejected with 422.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use embedding_service::{
    api::{create_app, AppState},
    embeddings::{EmbeddingError, EmbeddingProvider},
};
use mockall::mock;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

mock! {
    pub Provider {}

    #[async_trait]
    impl EmbeddingProvider for Provider {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
        fn dimension(&self) -> usize;
        fn name(&self) -> &'static str;
    }
}

fn app_with(provider: MockProvider) -> Router {
    create_app(AppState::new(Arc::new(provider)))
}

async fn post_raw(app: Router, content_type: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/v1/embeddings")
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_provider_failure_returns_500_with_message() {
    let mut provider = MockProvider::new();
    provider
        .expect_embed()
        .times(1)
        .returning(|_| Err(EmbeddingError::Tokenization("unsupported character".to_string())));

    let (status, body) =
        post_raw(app_with(provider), "application/json", r#"{"input": "hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Tokenization failed: unsupported character");
}

#[tokio::test]
async fn test_provider_rejecting_empty_input_returns_500() {
    let mut provider = MockProvider::new();
    provider
        .expect_embed()
        .withf(|texts| texts.is_empty())
        .returning(|_| Err(EmbeddingError::Task("empty batch".to_string())));

    let (status, body) =
        post_raw(app_with(provider), "application/json", r#"{"input": []}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Embedding task failed: empty batch");
}

#[tokio::test]
async fn test_provider_count_mismatch_returns_500() {
    let mut provider = MockProvider::new();
    provider
        .expect_embed()
        .returning(|_| Ok(vec![vec![0.0; 384]]));

    let (status, body) = post_raw(
        app_with(provider),
        "application/json",
        r#"{"input": ["a", "b"]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Model returned 1 embeddings for 2 inputs");
}

#[tokio::test]
async fn test_provider_receives_normalized_texts() {
    let mut provider = MockProvider::new();
    provider
        .expect_embed()
        .withf(|texts| texts.len() == 1 && texts[0] == "only one")
        .times(1)
        .returning(|texts| Ok(vec![vec![1.0, 0.0]; texts.len()]));

    let (status, body) =
        post_raw(app_with(provider), "application/json", r#"{"input": "only one"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["embedding"], serde_json::json!([1.0, 0.0]));
}

#[tokio::test]
async fn test_missing_model_returns_500() {
    let app = create_app(AppState::without_provider());

    let (status, body) = post_raw(app, "application/json", r#"{"input": "hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Embedding model is not loaded");
}

#[tokio::test]
async fn test_malformed_json_returns_422() {
    let provider = MockProvider::new();

    let (status, body) = post_raw(app_with(provider), "application/json", "{not json").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!body["detail"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_input_returns_422() {
    let provider = MockProvider::new();

    let (status, body) =
        post_raw(app_with(provider), "application/json", r#"{"model": "m"}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_wrong_input_type_returns_422() {
    let provider = MockProvider::new();

    let (status, _) =
        post_raw(app_with(provider), "application/json", r#"{"input": 42}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_wrong_content_type_returns_422() {
    let provider = MockProvider::new();

    let (status, body) = post_raw(app_with(provider), "text/plain", r#"{"input": "x"}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_missing_content_type_returns_422() {
    let provider = MockProvider::new();
    let req = Request::builder()
        .method("POST")
        .uri("/v1/embeddings")
        .body(Body::from(r#"{"input": "x"}"#))
        .unwrap();

    let response = app_with(provider).oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}
