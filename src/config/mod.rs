// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! Defaults reproduce the stock deployment: listen on all interfaces, port
//! 8000, serving all-MiniLM-L6-v2 through ONNX Runtime.

use crate::embeddings::DEFAULT_MODEL;
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_INTRA_THREADS: usize = 4;

/// Which embedding provider to load at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// all-MiniLM-L6-v2 via ONNX Runtime
    #[default]
    Onnx,
    /// Deterministic hash-based vectors, no model files required
    Hashed,
}

/// Where the ONNX model and tokenizer come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    /// Hugging Face Hub repository id
    pub repo: String,
    /// Directory holding `model.onnx` and `tokenizer.json`; checked before the Hub
    pub local_dir: Option<PathBuf>,
    /// Hub cache directory; `None` uses the hf-hub default
    pub cache_dir: Option<PathBuf>,
    /// Never touch the network
    pub offline: bool,
}

impl Default for ModelSource {
    fn default() -> Self {
        Self {
            repo: DEFAULT_MODEL.to_string(),
            local_dir: None,
            cache_dir: None,
            offline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub backend: Backend,
    pub model: ModelSource,
    /// ONNX Runtime intra-op thread count
    pub intra_threads: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backend: Backend::default(),
            model: ModelSource::default(),
            intra_threads: DEFAULT_INTRA_THREADS,
        }
    }
}

impl ServiceConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
