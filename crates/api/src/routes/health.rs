use axum::extract::State;
use axum::{routing::get, Json, Router};
use lexa_core::store::StatusCounts;
use serde::Serialize;

use crate::state::AppState;

/// Plain-text greeting served at `/`.
pub const BANNER: &str = "lexa text analysis service";

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Size of the worker pool.
    pub workers: usize,
    /// Jobs waiting for a free worker.
    pub queued: usize,
    pub queue_capacity: usize,
    /// Job counts by status.
    pub jobs: StatusCounts,
}

/// GET /health -- returns service, pool and job-store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let pool = state.pool.stats().await;
    let jobs = state.store.status_counts().await;

    let status = if pool.queued < pool.queue_capacity {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        workers: pool.workers,
        queued: pool.queued,
        queue_capacity: pool.queue_capacity,
        jobs,
    })
}

/// GET / -- plain-text banner.
async fn index() -> &'static str {
    BANNER
}

/// Mount root-level routes (NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
