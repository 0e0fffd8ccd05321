//! homectl configuration file
//!
//! Resolution order for every key: command-line flag, `HOMECTL_*`
//! environment variable (including `.env` files), config file, built-in
//! default.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use homectl_server::models::PollInterval;
use serde::{Deserialize, Serialize};

/// Contents of `~/.homectl/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomectlConfig {
    /// Address the HTTP server binds to
    pub bind: SocketAddr,
    /// SQLite database file
    pub database: PathBuf,
    /// Seconds between polling cycles until changed via /settings
    pub poll_interval_secs: u64,
    /// Timeout of a single sensor request
    pub sensor_timeout_secs: u64,
    /// Allow any CORS origin
    pub cors_permissive: bool,
}

impl Default for HomectlConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            database: home_dir().join("homectl.db"),
            poll_interval_secs: PollInterval::DEFAULT.as_secs(),
            sensor_timeout_secs: 10,
            cors_permissive: false,
        }
    }
}

impl HomectlConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.homectl/config.toml` is
    /// used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Get config file path: ~/.homectl/config.toml
    pub fn config_path() -> PathBuf {
        home_dir().join("config.toml")
    }

    pub fn poll_interval(&self) -> Result<PollInterval> {
        PollInterval::from_secs(self.poll_interval_secs).context("Invalid poll_interval_secs")
    }

    pub fn sensor_timeout(&self) -> Duration {
        Duration::from_secs(self.sensor_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        self.poll_interval()?;
        if self.sensor_timeout_secs == 0 {
            anyhow::bail!("sensor_timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// `~/.homectl`, or `./.homectl` when no home directory is known
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".homectl")
}

/// Outcome of loading one `.env` file
pub type EnvFileLoad = (PathBuf, std::result::Result<(), dotenvy::Error>);

/// Load `~/.homectl/.env`, then `./.env`; variables already set win.
///
/// Runs before tracing is initialised, so outcomes are returned for
/// [`log_env_files`].
pub fn load_env_files() -> Vec<EnvFileLoad> {
    load_env_from([home_dir().join(".env"), PathBuf::from(".env")])
}

fn load_env_from(paths: impl IntoIterator<Item = PathBuf>) -> Vec<EnvFileLoad> {
    paths
        .into_iter()
        .filter(|path| path.exists())
        .map(|path| {
            let result = dotenvy::from_path(&path);
            (path, result)
        })
        .collect()
}

pub fn log_env_files(loads: &[EnvFileLoad]) {
    for (path, result) in loads {
        match result {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to load env file"),
        }
    }
}
