//! HTTP router and handlers.

use crate::app::AppState;
use axum::{
  Router,
  http::{StatusCode, Uri},
  response::Response,
  routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod health;
pub mod logs;
pub mod response;

/// Assemble the HTTP router with all routes.
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health::health))
    .route("/api/logs", get(logs::list_logs))
    .route("/api/clear-log", post(logs::clear_log))
    .fallback(not_found)
    .with_state(state)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

// Unknown paths are answered but never written to the log store.
async fn not_found(uri: Uri) -> Response {
  response::respond_failure(format!("Not found: {}", uri.path()), StatusCode::NOT_FOUND)
}
