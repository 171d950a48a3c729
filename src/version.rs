// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Embedding Service

/// Service title reported at startup
pub const SERVICE_NAME: &str = "Embedding Service";

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("{} v{}", SERVICE_NAME, VERSION)
}
