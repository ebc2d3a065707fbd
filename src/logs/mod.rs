//! Log ingestion and query path: the Logger funnel and the query service.

pub mod logger;
pub mod query;

pub use logger::{LogOptions, Logger};
pub use query::{LogFilters, build_fts_prefix_search, clear_all, query_logs};
