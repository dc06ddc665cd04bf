//! Form-encoded analysis endpoints.
//!
//! `POST /sentences`, `/pos?tags=...` and `/ents` take the text in a `data`
//! form field and create the same jobs as `POST /jobs`.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Form;
use lexa_core::analyzer::{AnalysisRequest, Operation};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::jobs::accepted;
use crate::handlers::{collect_field_errors, fields_result, MISSING_FIELD};
use crate::state::AppState;

/// Form body shared by every analysis endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct TextForm {
    #[validate(
        required(message = "Missing required field"),
        length(min = 1, message = "Missing required field")
    )]
    pub data: Option<String>,
}

/// Query string of `POST /pos`.
#[derive(Debug, Deserialize, Validate)]
pub struct PosQuery {
    /// Comma-separated Universal POS tags, e.g. `VERB,NOUN`.
    #[validate(
        required(message = "Missing required field"),
        length(min = 1, message = "Missing required field")
    )]
    pub tags: Option<String>,
}

/// Validate the form, merging its failures with `fields` already found in
/// the query, and dispatch when nothing is missing.
async fn dispatch_form(
    state: &AppState,
    operation: Operation,
    form: TextForm,
    mut fields: BTreeMap<String, String>,
) -> AppResult<impl IntoResponse> {
    collect_field_errors(&form, &mut fields);
    fields_result(fields)?;

    let input = form.data.unwrap_or_default();
    let job = state
        .dispatcher
        .dispatch(AnalysisRequest::new(operation, input))
        .await?;
    Ok(accepted(&job))
}

/// POST /api/v1/sentences
pub async fn sentences(
    State(state): State<AppState>,
    Form(form): Form<TextForm>,
) -> AppResult<impl IntoResponse> {
    dispatch_form(&state, Operation::Sentences, form, BTreeMap::new()).await
}

/// POST /api/v1/pos?tags=VERB,NOUN
///
/// A missing or blank `tags` is rejected alongside any form errors. Tag
/// values are checked when the job runs; an unknown tag yields an `error` job.
pub async fn pos(
    State(state): State<AppState>,
    Query(query): Query<PosQuery>,
    Form(form): Form<TextForm>,
) -> AppResult<impl IntoResponse> {
    let mut fields = BTreeMap::new();
    collect_field_errors(&query, &mut fields);

    let tags = query.tags.unwrap_or_default();
    if tags.trim().is_empty() {
        fields.insert("tags".into(), MISSING_FIELD.into());
    }

    dispatch_form(&state, Operation::PartOfSpeech { tags }, form, fields).await
}

/// POST /api/v1/ents
pub async fn ents(
    State(state): State<AppState>,
    Form(form): Form<TextForm>,
) -> AppResult<impl IntoResponse> {
    dispatch_form(&state, Operation::Entities, form, BTreeMap::new()).await
}
