// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Request body for POST /v1/embeddings and input normalization

use crate::embeddings::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// The `input` field: one string or a list of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingInput {
    /// Produces the ordered list of texts to embed
    ///
    /// A single string becomes a one-element list. A list passes through
    /// untouched: no trimming, deduplication or empty-string filtering.
    pub fn into_texts(self) -> Vec<String> {
        match self {
            EmbeddingInput::Single(text) => vec![text],
            EmbeddingInput::Batch(texts) => texts,
        }
    }
}

impl From<&str> for EmbeddingInput {
    fn from(text: &str) -> Self {
        EmbeddingInput::Single(text.to_string())
    }
}

impl From<Vec<String>> for EmbeddingInput {
    fn from(texts: Vec<String>) -> Self {
        EmbeddingInput::Batch(texts)
    }
}

/// Request body for POST /v1/embeddings
///
/// # Example
/// ```json
/// {
///   "input": ["Hello world", "Another text"],
///   "model": "sentence-transformers/all-MiniLM-L6-v2"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub input: EmbeddingInput,

    /// Echoed back in the response; never used to pick a model
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl EmbeddingRequest {
    pub fn new(input: impl Into<EmbeddingInput>) -> Self {
        Self {
            input: input.into(),
            model: default_model(),
        }
    }
}
