#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use overlay_core::segments::SegmentDirectory;
use overlay_db::stores::MemoryOverlayStore;
use tower::ServiceExt;

use overlay_api::config::{ServerConfig, StoreBackend};
use overlay_api::router::build_app_router;
use overlay_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin and a 30-second request timeout.
pub fn test_config(streams_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        database_name: None,
        store: StoreBackend::Memory,
        streams_dir,
    }
}

/// Build the full application router over the given store and segment directory.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app_with(store: Arc<MemoryOverlayStore>, streams_dir: PathBuf) -> Router {
    let config = test_config(streams_dir.clone());
    let state = AppState {
        config: Arc::new(config.clone()),
        overlays: store,
        segments: Arc::new(SegmentDirectory::new(streams_dir)),
    };
    build_app_router(state, &config)
}

/// Build an app with a fresh in-memory store and a segment directory that
/// does not exist.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryOverlayStore::new()), missing_streams_dir())
}

/// A path under a fresh temporary directory that is never created.
///
/// The temporary directory itself is removed on drop, so the returned path
/// stays absent for the life of the test.
pub fn missing_streams_dir() -> PathBuf {
    let tmp = tempfile::tempdir().unwrap();
    tmp.path().join("streams")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
