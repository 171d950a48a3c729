// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text embedding providers
//!
//! The HTTP layer only talks to [`EmbeddingProvider`]. The production
//! implementation is [`OnnxEmbeddingModel`] running all-MiniLM-L6-v2;
//! [`HashedEmbeddingProvider`] produces deterministic vectors without a model.

pub mod download;
pub mod error;
pub mod hashed;
pub mod onnx_model;

pub use download::{resolve_model_files, ModelFiles};
pub use error::EmbeddingError;
pub use hashed::HashedEmbeddingProvider;
pub use onnx_model::OnnxEmbeddingModel;

use crate::config::{Backend, ServiceConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Model advertised by the service and echoed when a request omits `model`
pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Output dimension of all-MiniLM-L6-v2
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// Maximum sequence length; longer inputs are truncated by the tokenizer
pub const MAX_TOKENS: usize = 256;

/// Converts texts into fixed-length vectors
///
/// Implementations must return exactly one vector per input, in input order.
/// An empty input slice yields an empty output.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Length of every vector returned by `embed`
    fn dimension(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Builds the provider selected by `config`
///
/// Called once at process start; the returned handle is shared by every
/// request for the lifetime of the process.
pub async fn load_provider(config: &ServiceConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    match config.backend {
        Backend::Hashed => {
            info!(
                "Using hashed embedding backend ({} dimensions)",
                EMBEDDING_DIMENSIONS
            );
            Ok(Arc::new(HashedEmbeddingProvider::new(EMBEDDING_DIMENSIONS)))
        }
        Backend::Onnx => {
            let files = resolve_model_files(&config.model)
                .await
                .context("Failed to locate embedding model files")?;

            let model = OnnxEmbeddingModel::new(
                config.model.repo.clone(),
                &files.model,
                &files.tokenizer,
                config.intra_threads,
            )
            .await?;

            info!(
                "Loaded embedding model {} ({} dimensions)",
                model.model_name(),
                model.dimension()
            );
            Ok(Arc::new(model))
        }
    }
}
