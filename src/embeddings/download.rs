// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding model file resolution
//!
//! Finds the ONNX model and tokenizer for a [`ModelSource`]. A local model
//! directory wins when it holds both files; otherwise the files come from the
//! Hugging Face Hub cache, downloading them unless running offline.

use crate::config::ModelSource;
use anyhow::{Context, Result};
use hf_hub::api::tokio::ApiBuilder;
use hf_hub::Cache;
use std::path::{Path, PathBuf};
use tracing::info;

/// ONNX export path inside a sentence-transformers Hub repository
pub const HUB_ONNX_FILE: &str = "onnx/model.onnx";

/// Tokenizer path inside a Hub repository
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// ONNX file name inside a local model directory
pub const LOCAL_ONNX_FILE: &str = "model.onnx";

/// On-disk locations of the files needed by [`OnnxEmbeddingModel`](super::OnnxEmbeddingModel)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub model: PathBuf,
    pub tokenizer: PathBuf,
}

/// Resolves model files, downloading from the Hub when needed
pub async fn resolve_model_files(source: &ModelSource) -> Result<ModelFiles> {
    if let Some(dir) = &source.local_dir {
        if let Some(files) = find_local_files(dir) {
            info!("Using local embedding model files from {}", dir.display());
            return Ok(files);
        }
        if source.offline {
            anyhow::bail!(
                "Model directory {} does not contain {} and {}",
                dir.display(),
                LOCAL_ONNX_FILE,
                TOKENIZER_FILE
            );
        }
    }

    if source.offline {
        return find_cached_files(source).with_context(|| {
            format!(
                "Model {} is not in the Hugging Face cache and offline mode is enabled",
                source.repo
            )
        });
    }

    download_files(source).await
}

/// Looks for `model.onnx` (or `onnx/model.onnx`) plus `tokenizer.json` in `dir`
pub fn find_local_files(dir: &Path) -> Option<ModelFiles> {
    let tokenizer = dir.join(TOKENIZER_FILE);
    if !tokenizer.is_file() {
        return None;
    }

    [dir.join(LOCAL_ONNX_FILE), dir.join(HUB_ONNX_FILE)]
        .into_iter()
        .find(|path| path.is_file())
        .map(|model| ModelFiles { model, tokenizer })
}

fn find_cached_files(source: &ModelSource) -> Option<ModelFiles> {
    let cache = match &source.cache_dir {
        Some(dir) => Cache::new(dir.clone()),
        None => Cache::default(),
    };
    let repo = cache.model(source.repo.clone());

    Some(ModelFiles {
        model: repo.get(HUB_ONNX_FILE)?,
        tokenizer: repo.get(TOKENIZER_FILE)?,
    })
}

async fn download_files(source: &ModelSource) -> Result<ModelFiles> {
    let mut builder = ApiBuilder::new().with_progress(false);
    if let Some(dir) = &source.cache_dir {
        builder = builder.with_cache_dir(dir.clone());
    }
    let api = builder
        .build()
        .context("Failed to initialize Hugging Face Hub client")?;
    let repo = api.model(source.repo.clone());

    info!("Fetching embedding model {} from Hugging Face Hub", source.repo);

    let model = repo
        .get(HUB_ONNX_FILE)
        .await
        .with_context(|| format!("Failed to download {} from {}", HUB_ONNX_FILE, source.repo))?;
    let tokenizer = repo
        .get(TOKENIZER_FILE)
        .await
        .with_context(|| format!("Failed to download {} from {}", TOKENIZER_FILE, source.repo))?;

    Ok(ModelFiles { model, tokenizer })
}
