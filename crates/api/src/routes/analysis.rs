use axum::routing::post;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// Form-encoded analysis endpoints, mounted directly under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sentences", post(analysis::sentences))
        .route("/pos", post(analysis::pos))
        .route("/ents", post(analysis::ents))
}
