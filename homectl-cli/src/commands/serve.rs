//! HTTP server command: API plus background polling

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use homectl_server::http::{run_server, ServerConfig};

use super::{open_database, sensor_client};
use crate::config::HomectlConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b', env = "HOMECTL_BIND")]
    pub bind: Option<SocketAddr>,

    /// SQLite database file (default: ~/.homectl/homectl.db)
    #[arg(long, env = "HOMECTL_DATABASE")]
    pub database: Option<PathBuf>,

    /// Seconds between polling cycles until changed via /settings
    #[arg(long, env = "HOMECTL_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Timeout in seconds for a single sensor request
    #[arg(long, env = "HOMECTL_SENSOR_TIMEOUT")]
    pub sensor_timeout: Option<u64>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Serve the API without the background poller
    #[arg(long)]
    pub no_poll: bool,
}

impl ServeArgs {
    /// Flags and environment override the config file.
    pub fn apply(&self, mut config: HomectlConfig) -> Result<HomectlConfig> {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        if let Some(secs) = self.poll_interval {
            config.poll_interval_secs = secs;
        }
        if let Some(secs) = self.sensor_timeout {
            config.sensor_timeout_secs = secs;
        }
        config.cors_permissive |= self.cors_permissive;
        config.validate()?;
        Ok(config)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: HomectlConfig) -> Result<()> {
    let config = args.apply(config)?;

    tracing::info!("Starting homectl server on {}", config.bind);

    let pool = open_database(&config.database).await?;
    let client = sensor_client(&config)?;

    let server_config = ServerConfig {
        bind_addr: config.bind,
        cors_permissive: config.cors_permissive,
        poll_interval: config.poll_interval()?,
        poll: !args.no_poll,
    };

    // Run server (blocks until shutdown)
    run_server(pool, Arc::new(client), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
