// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::embeddings::embeddings_handler;
use super::handlers::{health_handler, root_handler};
use crate::config::ServiceConfig;
use crate::embeddings::EmbeddingProvider;

/// Shared handler state
///
/// `provider` is `None` when the model failed to load at startup; the
/// service still answers `/` and `/health` in that case.
#[derive(Clone)]
pub struct AppState {
    pub provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn without_provider() -> Self {
        Self { provider: None }
    }
}

/// Builds the router
///
/// Request bodies are not size-limited; large batches are accepted.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/v1/embeddings", post(embeddings_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API until Ctrl-C
pub async fn start_server(config: &ServiceConfig, state: AppState) -> Result<()> {
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Embedding service listening on {}", listener.local_addr()?);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Embedding service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
