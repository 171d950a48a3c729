// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deterministic embeddings derived from a hash of the input text
//!
//! No model files are needed, which makes this backend useful for tests and
//! offline smoke runs. Vectors carry no semantic meaning.

use super::{EmbeddingError, EmbeddingProvider};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct HashedEmbeddingProvider {
    dimension: usize,
}

impl HashedEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Generates a unit-length vector seeded by `text`
    pub fn generate(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dimension);

        // Linear congruential generator
        let mut current_seed = seed;
        for i in 0..self.dimension {
            current_seed =
                (current_seed.wrapping_mul(1664525).wrapping_add(1013904223)) ^ (i as u64);

            // Map to [-1, 1]
            let value = (current_seed as f64 / u64::MAX as f64) * 2.0 - 1.0;
            embedding.push(value as f32);
        }

        let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut embedding {
                *value /= norm;
            }
        }

        embedding
    }
}

#[async_trait]
impl EmbeddingProvider for HashedEmbeddingProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.generate(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &'static str {
        "hashed"
    }
}
