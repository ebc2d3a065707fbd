//! Log entry stored in SQLite and exposed via API.

use super::level::Level;
use serde::Serialize;
use sqlx::FromRow;

/// One persisted log row, returned by value from queries.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    pub created_at: String,
    pub level: Level,
    pub source: Option<String>,
    pub message: String,
    /// JSON-encoded side payload.
    pub meta: Option<String>,
}
