// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use embedding_service::{
    api::{start_server, AppState},
    cli::Cli,
    config::ServiceConfig,
    embeddings::load_provider,
    version,
};
use std::env;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from(Cli::parse());
    info!("Starting {}", version::get_version_string());
    info!(
        "Embedding backend: {:?}, model: {}",
        config.backend, config.model.repo
    );

    // The model is loaded once and shared for the lifetime of the process
    let state = match load_provider(&config).await {
        Ok(provider) => AppState::new(provider),
        Err(e) => {
            error!("Failed to initialize embedding model: {:#}", e);
            warn!("Serving without embeddings; /v1/embeddings will return errors");
            AppState::without_provider()
        }
    };

    start_server(&config, state).await
}
