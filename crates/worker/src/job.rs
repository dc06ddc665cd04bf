//! Execution of a single job.
//!
//! [`execute_job`] validates the operation's parameters, runs the analyzer
//! on a blocking thread, shapes the operation's output mapping and writes
//! the terminal state back to the [`JobStore`]. Every failure after dispatch
//! ends up stored on the job; nothing is returned to the original caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use lexa_core::analyzer::{AnalysisRequest, Analyzer, Document, Operation};
use lexa_core::error::CoreError;
use lexa_core::job::{ErrorDescriptor, JobId, JobResult, JobStatus};
use lexa_core::pos::{select_tags, PosTag, INVALID_TAG_REASON};
use lexa_core::store::JobStore;
use serde_json::{json, Map, Value};

/// A unit of work queued on the pool.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub id: JobId,
    pub request: AnalysisRequest,
}

/// Operation with its parameters resolved and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Plan {
    Sentences,
    PartOfSpeech(Vec<PosTag>),
    Entities,
}

/// Run one job to completion and record its terminal state.
///
/// Returns the status that was stored. An `Err` means the outcome could not
/// be written (unknown id, or the job was already terminal).
pub async fn execute_job(
    store: &JobStore,
    analyzer: Arc<dyn Analyzer>,
    item: WorkItem,
) -> Result<JobStatus, CoreError> {
    let WorkItem { id, request } = item;

    let plan = match plan(&request) {
        Ok(plan) => plan,
        Err(failure) => {
            tracing::warn!(
                job_id = %id,
                error = %failure.message,
                "Job rejected before analysis",
            );
            store
                .update(&id, JobStatus::Error, JobResult::Failure(failure))
                .await?;
            return Ok(JobStatus::Error);
        }
    };

    let input = request.input.clone();
    let analysis = tokio::task::spawn_blocking(move || analyzer.analyze(&request)).await;

    let result = match analysis {
        Ok(Ok(document)) => JobResult::Output(build_output(&plan, &input, &document)),
        Ok(Err(e)) => {
            tracing::warn!(job_id = %id, error = %e, "Analysis failed");
            JobResult::Failure(ErrorDescriptor::new(input, e.to_string()))
        }
        Err(e) => {
            tracing::error!(job_id = %id, error = %e, "Analyzer task aborted");
            JobResult::Failure(ErrorDescriptor::new(
                input,
                format!("Analyzer crashed: {e}"),
            ))
        }
    };

    let status = result.status();
    store.update(&id, status, result).await?;
    Ok(status)
}

/// Resolve operation parameters, rejecting values outside their vocabulary.
fn plan(request: &AnalysisRequest) -> Result<Plan, ErrorDescriptor> {
    match &request.operation {
        Operation::Sentences => Ok(Plan::Sentences),
        Operation::Entities => Ok(Plan::Entities),
        Operation::PartOfSpeech { tags } => {
            let selection = select_tags(tags);
            if !selection.invalid.is_empty() {
                let details: BTreeMap<String, String> = selection
                    .invalid
                    .iter()
                    .map(|tag| (tag.clone(), INVALID_TAG_REASON.to_string()))
                    .collect();
                return Err(ErrorDescriptor::new(
                    request.input.clone(),
                    format!("Invalid POS tag(s): {}", selection.invalid.join(", ")),
                )
                .with_details(details));
            }
            if selection.valid.is_empty() {
                return Err(ErrorDescriptor::new(
                    request.input.clone(),
                    "No POS tags requested",
                ));
            }
            Ok(Plan::PartOfSpeech(selection.valid))
        }
    }
}

/// Shape the operation-specific output mapping.
fn build_output(plan: &Plan, input: &str, document: &Document) -> Map<String, Value> {
    let mut output = Map::new();
    match plan {
        Plan::Sentences => {
            output.insert("input".into(), json!(input));
            output.insert("amount".into(), json!(document.sentences.len()));
            output.insert("sentences".into(), json!(document.sentences));
        }
        Plan::PartOfSpeech(tags) => {
            for tag in tags {
                let words: Vec<&str> = document
                    .tokens
                    .iter()
                    .filter(|token| token.pos == *tag)
                    .map(|token| token.text.as_str())
                    .collect();
                output.insert(tag.as_str().to_string(), json!(words));
            }
        }
        Plan::Entities => {
            for entity in &document.entities {
                let texts = output
                    .entry(entity.label.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(texts) = texts {
                    texts.push(json!(entity.text));
                }
            }
        }
    }
    output
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
