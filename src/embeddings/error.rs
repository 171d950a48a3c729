// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for embedding generation
//!
//! Every failure that can happen between receiving a list of texts and
//! handing back their vectors is one of these variants. The HTTP layer turns
//! all of them into a single internal error and copies the message verbatim.

use thiserror::Error;

/// Errors returned by an [`EmbeddingProvider`](super::EmbeddingProvider)
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// No model was loaded at startup
    #[error("Embedding model is not loaded")]
    ModelUnavailable,

    /// The tokenizer rejected an input text
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    /// ONNX Runtime failed while building inputs or running the session
    #[error("ONNX inference failed: {0}")]
    Inference(#[from] ort::Error),

    /// Input tensors could not be shaped for the batch
    #[error("Invalid tensor shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// The model produced vectors of an unexpected size
    #[error("Unexpected embedding dimension at index {index}: {actual} (expected {expected})")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// The model produced a different number of vectors than inputs
    #[error("Model returned {actual} embeddings for {expected} inputs")]
    CountMismatch { expected: usize, actual: usize },

    /// The blocking inference task panicked or was cancelled
    #[error("Embedding task failed: {0}")]
    Task(String),
}
