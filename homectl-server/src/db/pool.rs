//! Database connection pool management
//!
//! Uses sqlx SqlitePool with foreign keys enforced so that deletes cascade.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};

/// Default maximum connections for the pool.
/// Kept low for single-user tooling.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const SCHEMA: &str = include_str!("schema.sql");

/// Open (creating if missing) the SQLite database at `path` and apply the schema.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(Path::new("homectl.db")).await?;
/// ```
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5)) // poller and handlers write concurrently
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// In-memory database for tests and dry runs.
///
/// A single connection, since every SQLite memory connection is its own database.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::debug!("applying schema");
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_pool_has_schema() {
        let pool = create_memory_pool().await.expect("pool creation failed");

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
             ('homes', 'rooms', 'sensors', 'measurements', 'measurement_types', 'measurement_values', 'settings')",
        )
        .fetch_one(&pool)
        .await
        .expect("query failed");

        assert_eq!(count, 7);
    }

    #[tokio::test]
    async fn file_pool_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("homectl.db");

        let pool = create_pool(&path).await.expect("pool creation failed");
        // schema is idempotent
        migrate(&pool).await.expect("second migration failed");
        pool.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn file_pool_accepts_url_characters_in_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("100% home?.db");

        let pool = create_pool(&path).await.expect("pool creation failed");
        pool.close().await;

        assert!(path.exists());
    }
}
