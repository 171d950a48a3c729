// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::embeddings::EmbeddingError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error body returned by every endpoint
///
/// `detail` is always a single message string, including for 422 responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

/// API failures
///
/// Anything that goes wrong after the request body has been parsed is an
/// `InternalError`, whether the cause was the input or the model. Only bodies
/// that cannot be parsed at all get a distinct status.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Request body is not a valid embedding request
    InvalidRequest(String),
    /// Normalization or embedding failed
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let detail = match self {
            ApiError::InvalidRequest(msg) | ApiError::InternalError(msg) => msg.clone(),
        };

        ErrorResponse { detail }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 422,
            ApiError::InternalError(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<EmbeddingError> for ApiError {
    fn from(error: EmbeddingError) -> Self {
        ApiError::InternalError(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_response())).into_response()
    }
}
