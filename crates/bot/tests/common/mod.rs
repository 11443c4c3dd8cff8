//! Shared helpers for HTTP integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use funnel_bot::config::BotConfig;
use funnel_bot::router::build_app_router;
use funnel_bot::state::AppState;
use funnel_engine::{Engine, PgStore};
use funnel_notify::NullNotifier;

/// Build a test `BotConfig` with safe defaults.
pub fn test_config() -> BotConfig {
    BotConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_secs: 1800,
        webhook_url: None,
    }
}

/// Build the full application router over the given database pool.
///
/// Mirrors the construction in `main.rs` (minus the session sweeper) so
/// integration tests exercise the same middleware stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let store = Arc::new(PgStore::new(pool.clone()));
    let engine = Engine::new(store, Arc::new(NullNotifier), config.session_ttl_secs)
        .expect("flow tables are valid");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        engine: Arc::new(engine),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Dispatch one action through the running app and return its reply `data`.
pub async fn dispatch(app: &Router, action: serde_json::Value) -> serde_json::Value {
    let response = post_json(app.clone(), "/api/v1/dispatch", action).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}
