pub mod analysis;
pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /jobs                       snapshot (GET), create (POST)
/// /jobs/{id}                  full record
/// /jobs/{id}/status           {id, status}
/// /jobs/{id}/result           output, error descriptor or processing marker
///
/// /sentences                  form `data` -> sentences job
/// /pos?tags=VERB,NOUN         form `data` -> pos job
/// /ents                       form `data` -> entities job
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/jobs", jobs::router())
        .merge(analysis::router())
}
