#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use vitrine_api::config::{BackendConfig, ServerConfig};
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_core::backend::{BackendError, ContentBackend, InMemoryBackend};
use vitrine_core::catalog::ExternalUrlCatalog;
use vitrine_core::content::ContentRecord;
use vitrine_core::service::ContentService;
use vitrine_core::store::SiteContent;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the in-memory backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend: BackendConfig::Memory,
        seed_default_content: false,
        json_logs: false,
    }
}

/// Handles a test keeps next to the router.
pub struct TestApp {
    pub router: Router,
    pub backend: Arc<InMemoryBackend>,
    pub state: AppState,
}

impl TestApp {
    /// A fresh router over the same state, for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router over an empty in-memory backend.
pub fn build_test_app() -> TestApp {
    build_test_app_with(Arc::new(InMemoryBackend::new()))
}

/// Build the full application router over an in-memory backend holding
/// `catalogs`.
pub fn build_test_app_with_catalogs(catalogs: Vec<ExternalUrlCatalog>) -> TestApp {
    build_test_app_with(Arc::new(InMemoryBackend::with_catalogs(catalogs)))
}

fn build_test_app_with(backend: Arc<InMemoryBackend>) -> TestApp {
    let state = build_state(backend.clone());
    let router = build_app_router(state.clone(), &test_config());
    TestApp {
        router,
        backend,
        state,
    }
}

/// Build the full application router over an arbitrary backend.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_router_over(backend: Arc<dyn ContentBackend>) -> Router {
    build_app_router(build_state(backend), &test_config())
}

fn build_state(backend: Arc<dyn ContentBackend>) -> AppState {
    AppState {
        content: ContentService::new(backend),
        site: SiteContent::new(),
        config: Arc::new(test_config()),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
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

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Backend whose every call fails as if the network were down.
pub struct DownBackend;

#[async_trait::async_trait]
impl ContentBackend for DownBackend {
    async fn select_by_section(&self, _section: &str) -> Result<Vec<ContentRecord>, BackendError> {
        Err(down())
    }

    async fn select_by_id(&self, _id: &str) -> Result<Option<ContentRecord>, BackendError> {
        Err(down())
    }

    async fn select_all(&self) -> Result<Vec<ContentRecord>, BackendError> {
        Err(down())
    }

    async fn upsert(&self, _record: &ContentRecord) -> Result<Vec<ContentRecord>, BackendError> {
        Err(down())
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), BackendError> {
        Err(down())
    }

    async fn select_catalog(&self, _id: &str) -> Result<Option<ExternalUrlCatalog>, BackendError> {
        Err(down())
    }

    async fn select_catalogs(&self) -> Result<Vec<ExternalUrlCatalog>, BackendError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), BackendError> {
        Err(down())
    }
}

fn down() -> BackendError {
    BackendError::Request("connection refused".into())
}
