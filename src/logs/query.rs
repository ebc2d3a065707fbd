//! Log query service: "the last N rows matching these filters".
//!
//! A non-empty search runs against the FTS5 index as a sanitized prefix
//! expression; anything else is a plain scan of the level index. Both paths
//! order newest first with `id` as the tie-break.

use super::logger::{LogOptions, Logger};
use crate::{
    db::logs::LogStore,
    error::Result,
    models::log::{level::Level, log_entry::LogEntry},
};
use tracing::debug;

pub const DEFAULT_LIMIT: u32 = 500;

/// Filter criteria for [`query_logs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilters {
    pub search: String,
    pub levels: Vec<Level>,
    pub limit: u32,
}

impl Default for LogFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            levels: Level::DEFAULT_FILTER.to_vec(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl LogFilters {
    /// Build filters from decoded query-string pairs.
    ///
    /// `levels` may repeat (also spelled `levels[]`, or comma separated).
    /// Unknown level names are ignored, so naming only unknown levels yields
    /// an empty set. A missing, non-numeric or non-positive `limit` falls
    /// back to [`DEFAULT_LIMIT`].
    pub fn from_query_pairs<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::default();
        let mut named_levels: Option<Vec<Level>> = None;

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "search" => filters.search = value.to_string(),
                "levels" | "levels[]" => {
                    let levels = named_levels.get_or_insert_with(Vec::new);
                    levels.extend(value.split(',').filter_map(|l| l.parse::<Level>().ok()));
                }
                "limit" => filters.limit = parse_limit(value),
                _ => {}
            }
        }

        if let Some(levels) = named_levels {
            filters.levels = levels;
        }
        filters
    }

    fn effective_limit(&self) -> u32 {
        if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }
}

fn parse_limit(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => DEFAULT_LIMIT,
    }
}

// Deduplicated, first occurrence wins.
fn normalize_levels(levels: &[Level]) -> Vec<Level> {
    let mut out = Vec::with_capacity(levels.len());
    for level in levels {
        if !out.contains(level) {
            out.push(*level);
        }
    }
    out
}

/// Turn free text into an FTS5 prefix expression that carries no query
/// syntax: each whitespace-separated word keeps only ASCII alphanumerics and
/// `_`, words without a letter or digit are dropped, and the rest get a `*`.
///
/// ```
/// use logvault::logs::build_fts_prefix_search;
/// assert_eq!(build_fts_prefix_search("timeout error"), "timeout* error*");
/// assert_eq!(build_fts_prefix_search("!!!___???"), "");
/// ```
pub fn build_fts_prefix_search(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|token| token.chars().any(|c| c.is_ascii_alphanumeric()))
        .map(|token| {
            // Uppercase AND/OR/NOT are operators to FTS5; the index is case-insensitive.
            if matches!(token.as_str(), "AND" | "OR" | "NOT") {
                format!("{}*", token.to_ascii_lowercase())
            } else {
                format!("{token}*")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rows matching `filters`, newest first, at most `filters.limit` of them.
pub async fn query_logs(store: &LogStore, filters: &LogFilters) -> Result<Vec<LogEntry>> {
    let levels = normalize_levels(&filters.levels);
    let limit = filters.effective_limit();

    let search = filters.search.trim();
    if !search.is_empty() {
        let expr = build_fts_prefix_search(search);
        // A search with nothing searchable left behaves as no search at all.
        if !expr.is_empty() {
            debug!(%expr, ?levels, limit, "full-text log query");
            return store.search(&expr, &levels, limit).await;
        }
    }

    debug!(?levels, limit, "plain log query");
    store.fetch_recent(&levels, limit).await
}

/// Delete every row, then record the clear itself. Returns the rows removed.
pub async fn clear_all(store: &LogStore, logger: &Logger) -> Result<u64> {
    let removed = store.delete_all().await?;
    logger.info("Logs cleared manually", LogOptions::default()).await;
    Ok(removed)
}
