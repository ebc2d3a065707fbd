//! logvault library entrypoint.
//!
//! Modules:
//! - `app`: startup and shared state
//! - `config`: flags and environment
//! - `db`: migrations, the log store and settings tables
//! - `logs`: the Logger and the log query service
//! - `http`: Axum router and handlers
//! - `models`: typed records used across layers
//! - `error`: crate error type
//! - `util`: tracing setup

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod logs;
pub mod models;
pub mod util;
