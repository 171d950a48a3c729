// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::config::{
    Backend, ModelSource, ServiceConfig, DEFAULT_HOST, DEFAULT_INTRA_THREADS, DEFAULT_PORT,
};
use crate::embeddings::DEFAULT_MODEL;
use clap::Parser;
use std::path::PathBuf;

/// Embedding Service
#[derive(Parser, Debug)]
#[command(name = "embedding-service")]
#[command(version)]
#[command(about = "OpenAI-compatible text embedding API", long_about = None)]
pub struct Cli {
    /// Interface to bind
    #[arg(long, env = "EMBEDDING_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "EMBEDDING_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Embedding provider to load
    #[arg(long, env = "EMBEDDING_BACKEND", value_enum, default_value_t = Backend::Onnx)]
    pub backend: Backend,

    /// Hugging Face repository holding the ONNX export
    #[arg(long, env = "EMBEDDING_MODEL_REPO", default_value = DEFAULT_MODEL)]
    pub model_repo: String,

    /// Local directory with model.onnx and tokenizer.json
    #[arg(long, env = "EMBEDDING_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Hugging Face cache directory
    #[arg(long, env = "EMBEDDING_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Do not download model files
    #[arg(long, env = "EMBEDDING_OFFLINE")]
    pub offline: bool,

    /// ONNX Runtime intra-op threads
    #[arg(long, env = "EMBEDDING_INTRA_THREADS", default_value_t = DEFAULT_INTRA_THREADS)]
    pub intra_threads: usize,
}

impl From<Cli> for ServiceConfig {
    fn from(cli: Cli) -> Self {
        ServiceConfig {
            host: cli.host,
            port: cli.port,
            backend: cli.backend,
            model: ModelSource {
                repo: cli.model_repo,
                local_dir: cli.model_dir,
                cache_dir: cli.cache_dir,
                offline: cli.offline,
            },
            intra_threads: cli.intra_threads,
        }
    }
}
