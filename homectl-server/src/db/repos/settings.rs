//! Settings repository - key/value rows edited from the settings page

use sqlx::SqlitePool;

use super::DbError;
use crate::models::PollInterval;

const POLL_INTERVAL_KEY: &str = "poll_interval_secs";

/// Settings repository
pub struct SettingsRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SettingsRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool)
            .await?;
        Ok(value)
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?) ON CONFLICT (key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Stored polling interval, or `default` when unset or unreadable.
    pub async fn poll_interval(&self, default: PollInterval) -> Result<PollInterval, DbError> {
        let Some(raw) = self.get(POLL_INTERVAL_KEY).await? else {
            return Ok(default);
        };

        match raw.parse::<u64>().ok().and_then(|s| PollInterval::from_secs(s).ok()) {
            Some(interval) => Ok(interval),
            None => {
                tracing::warn!(value = %raw, "ignoring invalid stored poll interval");
                Ok(default)
            }
        }
    }

    pub async fn set_poll_interval(&self, interval: PollInterval) -> Result<(), DbError> {
        self.set(POLL_INTERVAL_KEY, &interval.as_secs().to_string()).await?;
        tracing::info!(secs = interval.as_secs(), "poll interval changed");
        Ok(())
    }
}
