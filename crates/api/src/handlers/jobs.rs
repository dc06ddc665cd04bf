//! Handlers for the `/jobs` resource.
//!
//! Creation goes through the [`Dispatcher`](crate::engine::dispatcher::Dispatcher);
//! every read goes straight to the job store and reflects its state at the
//! moment of the call.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lexa_core::analyzer::{AnalysisRequest, Operation};
use lexa_core::error::CoreError;
use lexa_core::job::{Job, JobId, JobOutcome, JobResult, JobStatus, OperationKind};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::{field_errors, MISSING_FIELD};
use crate::response::DataResponse;
use crate::state::AppState;

/// Shown alongside an empty result while a job is still running.
const PROCESSING_MESSAGE: &str = "Job is still processing";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/jobs`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    /// `sentences`, `pos` or `entities` (`ents` is accepted too).
    #[validate(required(message = "Missing required field"))]
    pub operation: Option<String>,
    #[validate(
        required(message = "Missing required field"),
        length(min = 1, message = "Missing required field")
    )]
    pub input: Option<String>,
    /// Comma-separated POS tags; required for `pos`.
    pub tags: Option<String>,
}

impl CreateJobRequest {
    /// Check required fields and resolve the operation.
    ///
    /// Tag values are not checked here; unknown tags fail the job itself.
    pub fn into_analysis_request(self) -> Result<AnalysisRequest, CoreError> {
        let mut fields = match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(errors) => field_errors(&errors),
        };

        let kind = match self.operation.as_deref().map(OperationKind::from_str) {
            Some(Ok(kind)) => Some(kind),
            Some(Err(message)) => {
                fields.insert("operation".into(), message);
                None
            }
            None => None,
        };

        let tags = self.tags.filter(|t| !t.trim().is_empty());
        if kind == Some(OperationKind::Pos) && tags.is_none() {
            fields.insert("tags".into(), MISSING_FIELD.into());
        }

        let (Some(kind), Some(input), true) = (kind, self.input, fields.is_empty()) else {
            return Err(CoreError::Fields(fields));
        };

        let operation = match kind {
            OperationKind::Sentences => Operation::Sentences,
            OperationKind::Pos => Operation::PartOfSpeech {
                tags: tags.unwrap_or_default(),
            },
            OperationKind::Entities => Operation::Entities,
        };
        Ok(AnalysisRequest::new(operation, input))
    }
}

/// `{id, status}` pair returned on creation and by the status endpoint.
#[derive(Debug, Serialize)]
pub struct JobTicket {
    pub id: JobId,
    pub status: JobStatus,
}

impl From<&Job> for JobTicket {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            status: job.status,
        }
    }
}

/// Payload of the result endpoint.
#[derive(Debug, Serialize)]
pub struct JobResultView {
    pub id: JobId,
    pub status: JobStatus,
    /// `null` while the job is processing.
    pub result: Option<JobResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a path id. Anything that is not a valid id cannot name a job.
fn parse_job_id(raw: &str) -> Result<JobId, CoreError> {
    raw.parse().map_err(|_| CoreError::NotFound {
        entity: "Job",
        id: raw.to_string(),
    })
}

/// `202 Accepted` with the freshly dispatched job's ticket.
pub(crate) fn accepted(job: &Job) -> impl IntoResponse {
    (
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: JobTicket::from(job),
        }),
    )
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs
///
/// Create a job and return `{id, status}` without waiting for the result.
/// Missing fields are rejected with 400 and no job is created.
pub async fn create_job(
    State(state): State<AppState>,
    Json(body): Json<CreateJobRequest>,
) -> AppResult<impl IntoResponse> {
    let request = body.into_analysis_request()?;
    let job = state.dispatcher.dispatch(request).await?;
    Ok(accepted(&job))
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// Snapshot of every job keyed by id.
pub async fn list_jobs(State(state): State<AppState>) -> Json<DataResponse<BTreeMap<String, Job>>> {
    let jobs = state
        .store
        .get_all()
        .await
        .into_iter()
        .map(|(id, job)| (id.to_string(), job))
        .collect();
    Json(DataResponse { data: jobs })
}

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Job>>> {
    let id = parse_job_id(&id)?;
    let job = state.store.get(&id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/jobs/{id}/status
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<JobTicket>>> {
    let id = parse_job_id(&id)?;
    let status = state.store.status(&id).await?;
    Ok(Json(DataResponse {
        data: JobTicket { id, status },
    }))
}

/// GET /api/v1/jobs/{id}/result
///
/// 200 with the output or error descriptor once the job is terminal;
/// 202 with `result: null` while it is still processing.
pub async fn get_job_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_job_id(&id)?;

    let (code, view) = match state.store.result(&id).await? {
        JobOutcome::Processing => (
            StatusCode::ACCEPTED,
            JobResultView {
                id,
                status: JobStatus::Processing,
                result: None,
                message: Some(PROCESSING_MESSAGE),
            },
        ),
        JobOutcome::Complete(output) => (
            StatusCode::OK,
            JobResultView {
                id,
                status: JobStatus::Complete,
                result: Some(JobResult::Output(output)),
                message: None,
            },
        ),
        JobOutcome::Error(descriptor) => (
            StatusCode::OK,
            JobResultView {
                id,
                status: JobStatus::Error,
                result: Some(JobResult::Failure(descriptor)),
                message: None,
            },
        ),
    };

    Ok((code, Json(DataResponse { data: view })))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn body(operation: Option<&str>, input: Option<&str>, tags: Option<&str>) -> CreateJobRequest {
        CreateJobRequest {
            operation: operation.map(String::from),
            input: input.map(String::from),
            tags: tags.map(String::from),
        }
    }

    #[test]
    fn pos_request_keeps_raw_tags() {
        let request = body(Some("pos"), Some("The cat sat."), Some("verb,FOO"))
            .into_analysis_request()
            .unwrap();
        assert_eq!(
            request.operation,
            Operation::PartOfSpeech {
                tags: "verb,FOO".into()
            }
        );
        assert_eq!(request.input, "The cat sat.");
    }

    #[test]
    fn ents_alias_resolves_to_entities() {
        let request = body(Some("ents"), Some("Ada"), None)
            .into_analysis_request()
            .unwrap();
        assert_eq!(request.operation, Operation::Entities);
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let err = body(None, Some(""), None)
            .into_analysis_request()
            .unwrap_err();
        assert_matches!(err, CoreError::Fields(fields) => {
            assert_eq!(fields.get("operation").map(String::as_str), Some(MISSING_FIELD));
            assert_eq!(fields.get("input").map(String::as_str), Some(MISSING_FIELD));
        });
    }

    #[test]
    fn pos_without_tags_is_rejected() {
        let err = body(Some("pos"), Some("text"), Some("  "))
            .into_analysis_request()
            .unwrap_err();
        assert_matches!(err, CoreError::Fields(fields) if fields.len() == 1 && fields.contains_key("tags"));
    }

    #[test]
    fn unknown_operation_is_a_field_error() {
        let err = body(Some("summarize"), Some("text"), None)
            .into_analysis_request()
            .unwrap_err();
        assert_matches!(err, CoreError::Fields(fields) => {
            assert!(fields["operation"].contains("summarize"));
        });
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert_matches!(
            parse_job_id("not-a-uuid"),
            Err(CoreError::NotFound { entity: "Job", .. })
        );
    }
}
