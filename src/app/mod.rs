//! Application setup and runtime.

use crate::{
  config::Config,
  db::{self, logs::LogStore, settings::SettingsStore},
  error::Result,
  http,
  logs::{LogOptions, Logger},
};
use sqlx::SqlitePool;
use std::{sync::Arc, time::Instant};
use tracing::info;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub db: SqlitePool,
  pub store: LogStore,
  pub settings: SettingsStore,
  pub logger: Logger,
  pub service_name: Arc<str>,
  pub started_at: Instant,
}

impl AppState {
  pub fn new(db: SqlitePool, service_name: &str) -> Self {
    let store = LogStore::new(db.clone());
    Self {
      settings: SettingsStore::new(db.clone()),
      logger: Logger::new(store.clone()),
      store,
      db,
      service_name: Arc::from(service_name),
      started_at: Instant::now(),
    }
  }

  /// Report uptime from `started_at` instead of from construction.
  pub fn with_started_at(mut self, started_at: Instant) -> Self {
    self.started_at = started_at;
    self
  }
}

/// Open the database and serve HTTP until the listener fails.
/// `started_at` is the process start; health uptime counts from it.
pub async fn run(config: Config, started_at: Instant) -> Result<()> {
  crate::util::init_tracing();

  let addr = config.addr()?;
  let pool = db::open(&config).await?;
  let state = AppState::new(pool, &config.service_name).with_started_at(started_at);

  let app = http::build_router(state.clone());

  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!("log store:        {}", config.db_path().display());
  info!("logs endpoint:    GET http://{}/api/logs", addr);
  info!("health endpoint:  GET http://{}/health", addr);
  state
    .logger
    .debug(
      &format!("Server running on port {}", addr.port()),
      LogOptions::source("server"),
    )
    .await;

  axum::serve(listener, app).await?;
  Ok(())
}
