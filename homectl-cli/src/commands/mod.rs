//! Command implementations for homectl CLI

pub mod config;
pub mod poll;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use config::run_config;
pub use poll::run_poll;
pub use serve::run_serve;

use std::path::Path;

use anyhow::{Context, Result};
use homectl_server::db::{create_pool, SqlitePool};
use homectl_server::HttpSensorClient;

use crate::config::HomectlConfig;

/// Open the configured database, creating it on first use.
async fn open_database(path: &Path) -> Result<SqlitePool> {
    tracing::info!("Opening database at {}", path.display());
    create_pool(path)
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))
}

fn sensor_client(config: &HomectlConfig) -> Result<HttpSensorClient> {
    HttpSensorClient::new(config.sensor_timeout()).context("Failed to build sensor HTTP client")
}
