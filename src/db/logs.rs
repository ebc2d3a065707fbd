//! Log table and its full-text shadow index.
//!
//! Index maintenance lives in SQLite triggers (see `schema`), so the table and
//! `logs_fts` stay in lockstep no matter which code path writes the rows.

use crate::{
    error::{Error, Result},
    models::log::{level::Level, log_entry::LogEntry, new_log_entry::NewLogEntry},
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const LOG_COLUMNS: &str = "l.id, l.created_at, l.level, l.source, l.message, l.meta";

/// Durable store of log rows.
#[derive(Clone, Debug)]
pub struct LogStore {
    pool: SqlitePool,
}

impl LogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Append a row and return it as stored.
    pub async fn insert(&self, entry: &NewLogEntry) -> Result<LogEntry> {
        let meta = entry.meta.as_ref().map(serde_json::to_string).transpose()?;
        sqlx::query_as::<_, LogEntry>(
            "INSERT INTO logs (created_at, level, source, message, meta) \
             VALUES (COALESCE(?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')), ?, ?, ?, ?) \
             RETURNING id, created_at, level, source, message, meta",
        )
        .bind(entry.created_at.as_deref())
        .bind(entry.level)
        .bind(entry.source.as_deref())
        .bind(&entry.message)
        .bind(meta)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_db)
    }

    /// Remove every row; the delete trigger removes the index entries.
    pub async fn delete_all(&self) -> Result<u64> {
        let done = sqlx::query("DELETE FROM logs")
            .execute(&self.pool)
            .await
            .map_err(Error::from_db)?;
        Ok(done.rows_affected())
    }

    /// Newest rows whose level is in `levels`.
    pub async fn fetch_recent(&self, levels: &[Level], limit: u32) -> Result<Vec<LogEntry>> {
        if levels.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {LOG_COLUMNS} FROM logs l WHERE"));
        push_level_filter(&mut qb, levels);
        push_order_and_limit(&mut qb, limit);
        qb.build_query_as::<LogEntry>()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::from_db)
    }

    /// Newest rows matching the FTS5 expression `expr` whose level is in
    /// `levels`. `expr` must already be sanitized.
    pub async fn search(&self, expr: &str, levels: &[Level], limit: u32) -> Result<Vec<LogEntry>> {
        if levels.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {LOG_COLUMNS} FROM logs l \
             INNER JOIN logs_fts ON logs_fts.rowid = l.id \
             WHERE logs_fts MATCH "
        ));
        qb.push_bind(expr.to_string());
        qb.push(" AND");
        push_level_filter(&mut qb, levels);
        push_order_and_limit(&mut qb, limit);
        qb.build_query_as::<LogEntry>()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::from_db)
    }

    pub async fn count(&self) -> Result<i64> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM logs")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::from_db)?;
        Ok(n)
    }

    /// Number of documents held by the full-text index.
    pub async fn index_len(&self) -> Result<i64> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM logs_fts_docsize")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::from_db)?;
        Ok(n)
    }

    /// Fails when the index no longer matches the table.
    pub async fn verify_index(&self) -> Result<()> {
        sqlx::query("INSERT INTO logs_fts(logs_fts) VALUES ('integrity-check')")
            .execute(&self.pool)
            .await
            .map_err(Error::from_db)?;
        Ok(())
    }

    /// Regenerate the index from the table contents.
    pub async fn rebuild_index(&self) -> Result<()> {
        sqlx::query("INSERT INTO logs_fts(logs_fts) VALUES ('rebuild')")
            .execute(&self.pool)
            .await
            .map_err(Error::from_db)?;
        Ok(())
    }
}

fn push_level_filter(qb: &mut QueryBuilder<'_, Sqlite>, levels: &[Level]) {
    qb.push(" l.level IN (");
    let mut list = qb.separated(", ");
    for level in levels {
        list.push_bind(level.as_str());
    }
    list.push_unseparated(")");
}

// Ties on created_at fall back to id so equal timestamps order stably.
fn push_order_and_limit(qb: &mut QueryBuilder<'_, Sqlite>, limit: u32) {
    qb.push(" ORDER BY l.created_at DESC, l.id DESC LIMIT ");
    qb.push_bind(i64::from(limit));
}
