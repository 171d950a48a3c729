// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::embeddings::{DEFAULT_MODEL, EMBEDDING_DIMENSIONS, MAX_TOKENS};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const SERVICE_MESSAGE: &str = "Embedding Service API";

/// Static service metadata served at `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootInfo {
    pub message: String,
    pub model: String,
    pub max_tokens: usize,
    pub dimensions: usize,
}

impl Default for RootInfo {
    fn default() -> Self {
        Self {
            message: SERVICE_MESSAGE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            dimensions: EMBEDDING_DIMENSIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn root_handler() -> Json<RootInfo> {
    Json(RootInfo::default())
}

/// Liveness only; the embedding provider is not consulted
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
