//! SQLite schema: log table, FTS5 shadow index and its sync triggers, settings.

/// Statements applied in order at startup. Every statement is idempotent.
///
/// Timestamps default to ISO-8601 UTC with milliseconds so lexical order
/// matches chronological order.
pub const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        level TEXT NOT NULL CHECK (level IN ('info', 'warn', 'error', 'debug')),
        source TEXT NULL,
        message TEXT NOT NULL,
        meta TEXT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_logs_created_at ON logs(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_logs_level ON logs(level)",
    "CREATE INDEX IF NOT EXISTS idx_logs_source ON logs(source)",
    r#"CREATE TABLE IF NOT EXISTS app_settings (
        key TEXT PRIMARY KEY,
        value TEXT NULL,
        updated_at TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )"#,
    r#"CREATE VIRTUAL TABLE IF NOT EXISTS logs_fts USING fts5(
        message,
        meta,
        content='logs',
        content_rowid='id'
    )"#,
    // External-content FTS5 tables must be told the old values on removal.
    r#"CREATE TRIGGER IF NOT EXISTS logs_fts_insert AFTER INSERT ON logs BEGIN
        INSERT INTO logs_fts(rowid, message, meta)
        VALUES (new.id, new.message, COALESCE(new.meta, ''));
    END"#,
    r#"CREATE TRIGGER IF NOT EXISTS logs_fts_delete AFTER DELETE ON logs BEGIN
        INSERT INTO logs_fts(logs_fts, rowid, message, meta)
        VALUES ('delete', old.id, old.message, COALESCE(old.meta, ''));
    END"#,
    r#"CREATE TRIGGER IF NOT EXISTS logs_fts_update AFTER UPDATE ON logs BEGIN
        INSERT INTO logs_fts(logs_fts, rowid, message, meta)
        VALUES ('delete', old.id, old.message, COALESCE(old.meta, ''));
        INSERT INTO logs_fts(rowid, message, meta)
        VALUES (new.id, new.message, COALESCE(new.meta, ''));
    END"#,
];
