//! Runtime configuration from command-line flags and environment variables.

use crate::error::{Error, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// File name of the SQLite database inside the data directory.
pub const DB_FILE_NAME: &str = "app.db";

const DEFAULT_DB_DIR: &str = "./data";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
const DEFAULT_SERVICE_NAME: &str = "logvault";

/// Server configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "logvault", version, about = "Self-hosted log store with full-text search")]
pub struct Config {
    /// Directory holding the SQLite database
    #[arg(long, env = "DB_DIR", default_value = DEFAULT_DB_DIR)]
    pub db_dir: PathBuf,

    /// Interface to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port for the HTTP server
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// How long a writer waits for the database lock before failing
    #[arg(long, env = "BUSY_TIMEOUT_MS", default_value_t = DEFAULT_BUSY_TIMEOUT_MS)]
    pub busy_timeout_ms: u64,

    /// Service name reported by the health check
    #[arg(long, env = "SERVICE_NAME", default_value = DEFAULT_SERVICE_NAME)]
    pub service_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_dir: PathBuf::from(DEFAULT_DB_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Configuration rooted at `db_dir` with every other field at its default.
    pub fn with_db_dir(db_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_dir: db_dir.into(),
            ..Self::default()
        }
    }

    /// Path of the database file.
    pub fn db_path(&self) -> PathBuf {
        self.db_dir.join(DB_FILE_NAME)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Socket address the HTTP server listens on.
    pub fn addr(&self) -> Result<SocketAddr> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("host must not be empty".into()));
        }
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        Ok(format!("{}:{}", host, self.port).parse()?)
    }
}
