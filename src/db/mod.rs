//! Database helpers: connection setup, migrations and path handling.

pub mod logs;
pub mod schema;
pub mod settings;

use crate::config::Config;
use crate::error::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use tracing::{debug, info};

/// Open the database described by `config` and bring its schema up to date.
pub async fn open(config: &Config) -> Result<SqlitePool> {
    let pool = connect(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Connect to the SQLite file in WAL mode with a bounded lock wait.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    ensure_db_dir(&config.db_dir)?;
    let db_path = config.db_path();

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(config.busy_timeout());

    debug!("connecting to SQLite database at {:?}", db_path);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create tables, indexes, the FTS index and its triggers if absent.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    for statement in schema::SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!("database ready");
    Ok(())
}

/// Ensure the database folder exists.
pub fn ensure_db_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// Fresh migrated database in a temporary directory. Keep the `TempDir`
    /// alive for as long as the pool is used.
    pub async fn temp_pool() -> (TempDir, SqlitePool) {
        let dir = TempDir::new().unwrap();
        let config = Config::with_db_dir(dir.path().join("nested"));
        let pool = open(&config).await.unwrap();
        (dir, pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_directory_and_schema() {
        let (dir, pool) = test_support::temp_pool().await;
        assert!(dir.path().join("nested").join("app.db").exists());

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type IN ('table', 'trigger') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        for expected in [
            "app_settings",
            "logs",
            "logs_fts",
            "logs_fts_delete",
            "logs_fts_insert",
            "logs_fts_update",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let (_dir, pool) = test_support::temp_pool().await;
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn uses_wal_journal() {
        let (_dir, pool) = test_support::temp_pool().await;
        let (mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
