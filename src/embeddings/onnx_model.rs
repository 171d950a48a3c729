// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! Runs the all-MiniLM-L6-v2 sentence transformer through ONNX Runtime.
//!
//! Features:
//! - ONNX model loading from disk
//! - Optional CUDA acceleration (`cuda` feature) with CPU fallback
//! - BERT tokenization with truncation to 256 tokens and batch padding
//! - Attention-masked mean pooling followed by L2 normalization
//! - 384-dimensional output vectors

use super::{EmbeddingError, EmbeddingProvider, EMBEDDING_DIMENSIONS, MAX_TOKENS};
use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::{Array2, Axis};
use ort::execution_providers::CPUExecutionProvider;
#[cfg(feature = "cuda")]
use ort::execution_providers::CUDAExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};
#[cfg(feature = "cuda")]
use tracing::warn;

/// ONNX-based embedding model (all-MiniLM-L6-v2)
///
/// # Model Details
/// - Input: text strings (truncated to 256 tokens)
/// - Output: 384-dimensional unit-length f32 vectors
///
/// # Thread Safety
/// Cloning is cheap; the session and tokenizer are shared through `Arc`.
/// The session needs `&mut` to run, so concurrent requests serialize on its
/// mutex.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
    max_length: usize,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// # Errors
    /// Returns error if:
    /// - Model or tokenizer file is missing or invalid
    /// - ONNX Runtime initialization fails
    /// - A probe inference does not produce 384-dimensional vectors
    ///
    /// # Example
    /// ```ignore
    /// let model = OnnxEmbeddingModel::new(
    ///     "sentence-transformers/all-MiniLM-L6-v2",
    ///     "./models/all-MiniLM-L6-v2/model.onnx",
    ///     "./models/all-MiniLM-L6-v2/tokenizer.json",
    ///     4,
    /// ).await?;
    /// ```
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
        intra_threads: usize,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        info!("Initializing ONNX embedding model from {}", model_path.display());
        let session = build_session(model_path, intra_threads)?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure tokenizer truncation: {}", e))?;
        // Batches are padded by hand to their longest member
        tokenizer.with_padding(None);

        let model = Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension: EMBEDDING_DIMENSIONS,
            max_length: MAX_TOKENS,
        };

        // Probe inference catches models with the wrong output shape at startup
        model
            .run_batch(&["validation test".to_string()])
            .context("Embedding model validation failed")?;

        info!("ONNX embedding model loaded successfully");
        Ok(model)
    }

    /// Tokenizes, runs and pools one batch on the calling thread
    fn run_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings = texts
            .iter()
            .map(|text| {
                self.tokenizer
                    .encode(text.as_str(), true)
                    .map_err(|e| EmbeddingError::Tokenization(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let max_len = encodings
            .iter()
            .map(|enc| enc.get_ids().len())
            .max()
            .unwrap_or(0);

        // Pad every sequence to max_len
        let mut input_ids_batch = Vec::with_capacity(texts.len() * max_len);
        let mut attention_mask_batch = Vec::with_capacity(texts.len() * max_len);
        let mut token_type_ids_batch = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let padding_needed = max_len - ids.len();

            input_ids_batch.extend(ids.iter().map(|&id| id as i64));
            input_ids_batch.extend(std::iter::repeat(0i64).take(padding_needed));

            attention_mask_batch.extend(mask.iter().map(|&m| m as i64));
            attention_mask_batch.extend(std::iter::repeat(0i64).take(padding_needed));

            token_type_ids_batch.extend(std::iter::repeat(0i64).take(max_len));
        }

        let attention_mask_for_pooling = attention_mask_batch.clone();

        let input_ids_array = Array2::from_shape_vec((texts.len(), max_len), input_ids_batch)?;
        let attention_mask_array =
            Array2::from_shape_vec((texts.len(), max_len), attention_mask_batch)?;
        let token_type_ids_array =
            Array2::from_shape_vec((texts.len(), max_len), token_type_ids_batch)?;

        let mut session_guard = self
            .session
            .lock()
            .map_err(|_| EmbeddingError::Task("ONNX session lock poisoned".to_string()))?;
        let outputs = session_guard.run(ort::inputs![
            "input_ids" => Value::from_array(input_ids_array)?,
            "attention_mask" => Value::from_array(attention_mask_array)?,
            "token_type_ids" => Value::from_array(token_type_ids_array)?
        ])?;

        // Output names differ between exports; the first output is the
        // token-level hidden state [batch, seq_len, hidden_dim]
        let output_array = outputs[0].try_extract_array::<f32>()?;
        let shape = output_array.shape();
        if shape.len() != 3 || shape[0] != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: shape.first().copied().unwrap_or(0),
            });
        }
        if shape[2] != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                index: 0,
                expected: self.dimension,
                actual: shape[2],
            });
        }

        let mut embeddings = Vec::with_capacity(texts.len());
        for batch_idx in 0..texts.len() {
            let item = output_array.index_axis(Axis(0), batch_idx);
            let mask_start = batch_idx * max_len;
            let item_mask = &attention_mask_for_pooling[mask_start..mask_start + max_len];

            let mut pooled = mean_pool(item.shape()[0], item.shape()[1], item_mask, |i, j| {
                item[[i, j]]
            });
            l2_normalize(&mut pooled);
            embeddings.push(pooled);
        }

        debug!(
            "Embedded batch of {} texts (padded length {})",
            texts.len(),
            max_len
        );

        Ok(embeddings)
    }

    /// Returns the output dimension of this model
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the truncation length applied by the tokenizer
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbeddingModel {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let model = self.clone();
        let texts = texts.to_vec();
        tokio::task::spawn_blocking(move || model.run_batch(&texts))
            .await
            .map_err(|e| EmbeddingError::Task(e.to_string()))?
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &'static str {
        "onnx"
    }
}

#[cfg(feature = "cuda")]
fn build_session(model_path: &Path, intra_threads: usize) -> Result<Session> {
    info!("   Attempting CUDA execution provider...");
    let cuda_result = Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .context("Failed to set CUDA execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(intra_threads)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path);

    match cuda_result {
        Ok(session) => {
            info!("CUDA execution provider initialized");
            Ok(session)
        }
        Err(e) => {
            warn!("CUDA execution provider failed: {}", e);
            warn!("   Falling back to CPU execution provider");
            build_cpu_session(model_path, intra_threads)
        }
    }
}

#[cfg(not(feature = "cuda"))]
fn build_session(model_path: &Path, intra_threads: usize) -> Result<Session> {
    build_cpu_session(model_path, intra_threads)
}

fn build_cpu_session(model_path: &Path, intra_threads: usize) -> Result<Session> {
    Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .context("Failed to set CPU execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(intra_threads)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path)
        .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))
}

/// Averages token vectors, weighting each by its attention mask value
fn mean_pool(
    seq_len: usize,
    hidden_dim: usize,
    mask: &[i64],
    value: impl Fn(usize, usize) -> f32,
) -> Vec<f32> {
    let mut pooled = vec![0.0f32; hidden_dim];
    let mut sum_mask = 0.0f32;

    for (i, &m) in mask.iter().enumerate().take(seq_len) {
        let mask_value = m as f32;
        sum_mask += mask_value;
        if mask_value == 0.0 {
            continue;
        }
        for (j, slot) in pooled.iter_mut().enumerate() {
            *slot += value(i, j) * mask_value;
        }
    }

    for val in &mut pooled {
        *val /= sum_mask.max(1e-9);
    }

    pooled
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}
