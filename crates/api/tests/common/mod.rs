#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use lexa_analyzer::RuleAnalyzer;
use lexa_api::config::ServerConfig;
use lexa_api::router::build_app_router;
use lexa_api::state::AppState;
use lexa_core::analyzer::{AnalysisError, AnalysisRequest, Analyzer, Document};
use serde_json::Value;
use tokio::sync::Notify;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        worker_count: 2,
        queue_capacity: 64,
        submit_timeout_ms: 250,
        max_input_chars: 100_000,
    }
}

/// Full application router backed by the rule-based analyzer.
///
/// The returned state shares the router's store and pool so tests can
/// inspect them directly.
pub fn build_test_app() -> (Router, AppState) {
    build_test_app_with(test_config(), Arc::new(RuleAnalyzer::default()))
}

pub fn build_test_app_with(config: ServerConfig, analyzer: Arc<dyn Analyzer>) -> (Router, AppState) {
    let state = AppState::new(config.clone(), analyzer);
    let app = build_app_router(state.clone(), &config);
    (app, state)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an already url-encoded form body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Poll the result endpoint until the job leaves `processing`.
///
/// Returns the `data` object of the final response.
pub async fn wait_for_terminal(app: &Router, id: &str) -> Value {
    let uri = format!("/api/v1/jobs/{id}/result");
    for _ in 0..200 {
        let json = body_json(get(app.clone(), &uri).await).await;
        if json["data"]["status"] != "processing" {
            return json["data"].clone();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {id} did not finish in time");
}

// ---------------------------------------------------------------------------
// Analyzers
// ---------------------------------------------------------------------------

/// Blocks every analysis until the test releases it.
pub struct GatedAnalyzer {
    pub started: Notify,
    gate: std::sync::Mutex<std::sync::mpsc::Receiver<()>>,
}

impl GatedAnalyzer {
    /// The analyzer plus the sender that lets one blocked call through per message.
    pub fn new() -> (Arc<Self>, std::sync::mpsc::Sender<()>) {
        let (tx, rx) = std::sync::mpsc::channel();
        let analyzer = Arc::new(Self {
            started: Notify::new(),
            gate: std::sync::Mutex::new(rx),
        });
        (analyzer, tx)
    }
}

impl Analyzer for GatedAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<Document, AnalysisError> {
        self.started.notify_one();
        let _ = self.gate.lock().unwrap().recv();
        RuleAnalyzer::default().analyze(request)
    }
}
