// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding API Module
//!
//! POST /v1/embeddings, shaped after the OpenAI embeddings endpoint.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::embeddings_handler;
pub use request::{EmbeddingInput, EmbeddingRequest};
pub use response::{count_prompt_tokens, EmbeddingData, EmbeddingResponse, Usage};
