// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embeddings;
pub mod errors;
pub mod handlers;
pub mod http_server;

pub use embeddings::{
    count_prompt_tokens, embeddings_handler, EmbeddingData, EmbeddingInput, EmbeddingRequest,
    EmbeddingResponse, Usage,
};
pub use errors::{ApiError, ErrorResponse};
pub use handlers::{health_handler, root_handler, HealthResponse, RootInfo};
pub use http_server::{create_app, start_server, AppState};
