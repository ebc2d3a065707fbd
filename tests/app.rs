use axum::Router;
use logvault::{
    app::AppState,
    config::Config,
    db, http,
    logs::LogOptions,
    models::log::{level::Level, new_log_entry::NewLogEntry},
};
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::task::JoinHandle;

struct TestServer {
    base: String,
    state: AppState,
    _dir: TempDir,
    _handle: JoinHandle<()>,
}

async fn start_server() -> TestServer {
    start_server_with(|_| {}, Instant::now()).await
}

async fn start_server_with(tweak: impl FnOnce(&mut Config), started_at: Instant) -> TestServer {
    let dir = TempDir::new().expect("temp dir");
    let mut config = Config::with_db_dir(dir.path());
    config.service_name = "logvault-test".into();
    tweak(&mut config);
    let pool = db::open(&config).await.expect("open sqlite");
    let state = AppState::new(pool, &config.service_name).with_started_at(started_at);
    let app: Router = http::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base: format!("http://{}", addr),
        state,
        _dir: dir,
        _handle: handle,
    }
}

async fn get_logs(base: &str, query: &str) -> Value {
    let res = reqwest::get(format!("{}/api/logs{}", base, query))
        .await
        .unwrap();
    assert!(res.status().is_success());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    body
}

fn messages(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["message"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_service() {
    let srv = start_server().await;
    let res = reqwest::get(format!("{}/health", srv.base)).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("healthy"));
    assert_eq!(body["data"]["service"], json!("logvault-test"));
    assert!(body["data"]["uptime"].as_f64().unwrap() >= 0.0);
    assert!(body["data"]["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn health_uptime_counts_from_process_start() {
    let boot = Instant::now()
        .checked_sub(Duration::from_secs(5))
        .unwrap_or_else(Instant::now);
    let expect_min = boot.elapsed().as_secs_f64();
    let srv = start_server_with(|_| {}, boot).await;
    let body: Value = reqwest::get(format!("{}/health", srv.base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"]["uptime"].as_f64().unwrap() >= expect_min);
}

#[tokio::test]
async fn held_write_lock_returns_503() {
    let srv = start_server_with(|c| c.busy_timeout_ms = 200, Instant::now()).await;
    srv.state
        .store
        .insert(&NewLogEntry::new(Level::Info, "before lock"))
        .await
        .unwrap();

    let mut config = Config::with_db_dir(srv._dir.path());
    config.busy_timeout_ms = 200;
    let other = db::connect(&config).await.unwrap();
    let mut holder = other.acquire().await.unwrap();
    sqlx::query("BEGIN IMMEDIATE").execute(&mut *holder).await.unwrap();

    let client = reqwest::Client::new();
    let res = tokio::time::timeout(
        Duration::from_secs(10),
        client.post(format!("{}/api/clear-log", srv.base)).send(),
    )
    .await
    .expect("clear must give up after the busy timeout")
    .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to clear log: ")
    );

    sqlx::query("ROLLBACK").execute(&mut *holder).await.unwrap();
    drop(holder);
    let body = get_logs(&srv.base, "").await;
    assert_eq!(messages(&body), vec!["before lock"]);
}

#[tokio::test]
async fn default_levels_exclude_debug() {
    let srv = start_server().await;
    let logger = &srv.state.logger;
    logger.info("started worker", LogOptions::default()).await;
    logger.debug("verbose detail", LogOptions::default()).await;
    logger
        .warn("queue slow", LogOptions::source("queue").with_meta(json!({"depth": 90})))
        .await;

    let body = get_logs(&srv.base, "").await;
    assert_eq!(messages(&body), vec!["queue slow", "started worker"]);

    let newest = &body["data"][0];
    assert_eq!(newest["level"], json!("warn"));
    assert_eq!(newest["source"], json!("queue"));
    assert_eq!(newest["meta"], json!(r#"{"depth":90}"#));
    assert!(newest["id"].as_i64().is_some());
    assert!(newest["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn repeated_levels_and_limit() {
    let srv = start_server().await;
    for level in Level::ALL {
        for i in 0..3 {
            srv.state
                .store
                .insert(&NewLogEntry::new(level, format!("{level} event {i}")))
                .await
                .unwrap();
        }
    }

    let body = get_logs(&srv.base, "?levels=debug&levels=ERROR").await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 6);
    assert!(
        data.iter()
            .all(|l| l["level"] == json!("debug") || l["level"] == json!("error"))
    );

    let body = get_logs(&srv.base, "?levels=info&limit=2").await;
    assert_eq!(messages(&body), vec!["info event 2", "info event 1"]);

    let body = get_logs(&srv.base, "?levels=nonsense").await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_uses_prefix_matching() {
    let srv = start_server().await;
    let store = &srv.state.store;
    store
        .insert(&NewLogEntry::new(Level::Error, "Connection timeout occurred"))
        .await
        .unwrap();
    store
        .insert(&NewLogEntry::new(Level::Info, "Connection succeeded"))
        .await
        .unwrap();

    let body = get_logs(&srv.base, "?search=timeo").await;
    assert_eq!(messages(&body), vec!["Connection timeout occurred"]);

    let body = get_logs(&srv.base, "?search=conn%20succ&levels=info").await;
    assert_eq!(messages(&body), vec!["Connection succeeded"]);

    // Punctuation-only input behaves like no search at all.
    let plain = get_logs(&srv.base, "").await;
    let punct = get_logs(&srv.base, "?search=%21%21%21___%3F%3F%3F").await;
    assert_eq!(plain["data"], punct["data"]);
    assert_eq!(plain["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn clear_log_empties_store_and_records_notice() {
    let srv = start_server().await;
    for i in 0..5 {
        srv.state
            .logger
            .info(&format!("row {i}"), LogOptions::default())
            .await;
    }

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/clear-log", srv.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": true, "data": {"message": "Log cleared"}})
    );

    let body = get_logs(&srv.base, "").await;
    assert_eq!(messages(&body), vec!["Logs cleared manually"]);
    assert_eq!(srv.state.store.index_len().await.unwrap(), 1);
}

#[tokio::test]
async fn store_failure_returns_error_envelope() {
    let srv = start_server().await;
    srv.state.db.close().await;

    let res = reqwest::get(format!("{}/api/logs", srv.base)).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Error in /api/logs: ")
    );
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let srv = start_server().await;
    let res = reqwest::get(format!("{}/nowhere", srv.base)).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": false, "error": "Not found: /nowhere"})
    );

    // Unknown paths are not recorded.
    let body = get_logs(&srv.base, "?levels=error").await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(srv.state.store.count().await.unwrap(), 0);
}
