// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! OpenAI-style response body for POST /v1/embeddings

use serde::{Deserialize, Serialize};

/// One vector in the response, tagged with its input position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingData {
    /// Always "embedding"
    pub object: String,
    pub index: usize,
    pub embedding: Vec<f32>,
}

/// Approximate token usage
///
/// Counts whitespace-separated words, not tokenizer output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub total_tokens: usize,
}

impl Usage {
    pub fn from_texts(texts: &[String]) -> Self {
        let tokens = count_prompt_tokens(texts);
        Self {
            prompt_tokens: tokens,
            total_tokens: tokens,
        }
    }
}

/// Sum of whitespace-separated words across all texts
///
/// Separators are Unicode whitespace plus the ASCII separator controls
/// U+001C..=U+001F, which `char::is_whitespace` does not cover.
pub fn count_prompt_tokens(texts: &[String]) -> usize {
    texts
        .iter()
        .map(|text| text.split(is_word_separator).filter(|w| !w.is_empty()).count())
        .sum()
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Response body for POST /v1/embeddings
///
/// # Example
/// ```json
/// {
///   "object": "list",
///   "data": [{"object": "embedding", "index": 0, "embedding": [0.1, ...]}],
///   "model": "sentence-transformers/all-MiniLM-L6-v2",
///   "usage": {"prompt_tokens": 2, "total_tokens": 2}
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingResponse {
    /// Always "list"
    pub object: String,
    pub data: Vec<EmbeddingData>,
    pub model: String,
    pub usage: Usage,
}

impl EmbeddingResponse {
    /// Pairs each vector with its position in input order
    pub fn new(embeddings: Vec<Vec<f32>>, model: String, usage: Usage) -> Self {
        let data = embeddings
            .into_iter()
            .enumerate()
            .map(|(index, embedding)| EmbeddingData {
                object: "embedding".to_string(),
                index,
                embedding,
            })
            .collect();

        Self {
            object: "list".to_string(),
            data,
            model,
            usage,
        }
    }
}
