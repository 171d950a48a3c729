// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /v1/embeddings HTTP handler

use crate::api::embeddings::{EmbeddingRequest, EmbeddingResponse, Usage};
use crate::api::http_server::AppState;
use crate::api::ApiError;
use crate::embeddings::EmbeddingError;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{error, info, warn};

/// POST /v1/embeddings handler
///
/// Normalizes `input` to a list, embeds it in one provider call and returns
/// one entry per input string in input order. The request either fully
/// succeeds or fails with a 500 whose `detail` is the provider's message.
pub async fn embeddings_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmbeddingRequest>, JsonRejection>,
) -> Result<Json<EmbeddingResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected embedding request body: {}", rejection.body_text());
        ApiError::InvalidRequest(rejection.body_text())
    })?;

    let texts = request.input.into_texts();
    let usage = Usage::from_texts(&texts);

    let embeddings = match embed_texts(&state, &texts).await {
        Ok(embeddings) => embeddings,
        Err(e) => {
            error!(count = texts.len(), "Embedding generation failed: {}", e);
            return Err(e.into());
        }
    };

    info!(
        count = texts.len(),
        prompt_tokens = usage.prompt_tokens,
        model = %request.model,
        "Generated embeddings"
    );

    Ok(Json(EmbeddingResponse::new(embeddings, request.model, usage)))
}

async fn embed_texts(state: &AppState, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let provider = state
        .provider
        .as_ref()
        .ok_or(EmbeddingError::ModelUnavailable)?;

    let embeddings = provider.embed(texts).await?;

    if embeddings.len() != texts.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: texts.len(),
            actual: embeddings.len(),
        });
    }

    Ok(embeddings)
}
