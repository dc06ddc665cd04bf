//! In-memory job store.
//!
//! [`JobStore`] is the single source of truth for job status and results.
//! It is constructed explicitly and shared behind an `Arc`; every operation
//! takes the same exclusive lock, so reads and writes are serialised across
//! all jobs. Records are never evicted and are lost when the process exits.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::job::{Job, JobId, JobOutcome, JobResult, JobStatus, OperationKind};

/// Entity name used in `NotFound` errors.
const JOB_ENTITY: &str = "Job";

/// Per-status job counts at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub processing: usize,
    pub complete: usize,
    pub error: usize,
}

/// Mutex-guarded map from [`JobId`] to [`Job`].
pub struct JobStore {
    jobs: Mutex<HashMap<JobId, Job>>,
}

impl JobStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Register a new `Processing` job and return its id.
    ///
    /// Never fails. The id is drawn fresh and checked against the map under
    /// the lock, so an id is never handed out twice.
    pub async fn create_job(&self, operation: OperationKind) -> JobId {
        let mut jobs = self.jobs.lock().await;
        let mut id = JobId::new();
        while jobs.contains_key(&id) {
            id = JobId::new();
        }
        jobs.insert(id, Job::new(id, operation));
        id
    }

    /// Current record for `id`.
    pub async fn get(&self, id: &JobId) -> Result<Job, CoreError> {
        self.jobs
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Move a `Processing` job to a terminal status.
    ///
    /// Fails with `NotFound` for an unknown id, `Validation` if `status` is not
    /// terminal or does not match the payload, and `Conflict` if the job has
    /// already reached a terminal state (the stored record is left untouched).
    pub async fn update(
        &self,
        id: &JobId,
        status: JobStatus,
        result: JobResult,
    ) -> Result<Job, CoreError> {
        if !status.is_terminal() {
            return Err(CoreError::Validation(format!(
                "Job {id} cannot be moved back to {status}"
            )));
        }
        if result.status() != status {
            return Err(CoreError::Validation(format!(
                "A {} payload cannot be stored with status {status}",
                result.status()
            )));
        }

        let mut jobs = self.jobs.lock().await;
        let job = jobs.get_mut(id).ok_or_else(|| not_found(id))?;
        if job.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Job {id} is already {}",
                job.status
            )));
        }

        job.status = status;
        job.result = Some(result);
        job.updated_at = chrono::Utc::now();
        Ok(job.clone())
    }

    /// Point-in-time copy of every record.
    pub async fn get_all(&self) -> HashMap<JobId, Job> {
        self.jobs.lock().await.clone()
    }

    /// Status of `id`.
    pub async fn status(&self, id: &JobId) -> Result<JobStatus, CoreError> {
        self.jobs
            .lock()
            .await
            .get(id)
            .map(|job| job.status)
            .ok_or_else(|| not_found(id))
    }

    /// Result of `id`, or [`JobOutcome::Processing`] if it has not finished.
    pub async fn result(&self, id: &JobId) -> Result<JobOutcome, CoreError> {
        self.jobs
            .lock()
            .await
            .get(id)
            .map(Job::outcome)
            .ok_or_else(|| not_found(id))
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }

    /// Count records per status.
    pub async fn status_counts(&self) -> StatusCounts {
        let jobs = self.jobs.lock().await;
        let mut counts = StatusCounts {
            total: jobs.len(),
            ..StatusCounts::default()
        };
        for job in jobs.values() {
            match job.status {
                JobStatus::Processing => counts.processing += 1,
                JobStatus::Complete => counts.complete += 1,
                JobStatus::Error => counts.error += 1,
            }
        }
        counts
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &JobId) -> CoreError {
    CoreError::NotFound {
        entity: JOB_ENTITY,
        id: id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use serde_json::{json, Map, Value};

    use super::*;
    use crate::job::ErrorDescriptor;

    fn output(value: Value) -> JobResult {
        match value {
            Value::Object(map) => JobResult::Output(map),
            other => panic!("expected an object, got {other}"),
        }
    }

    #[tokio::test]
    async fn create_job_registers_processing_record() {
        let store = JobStore::new();
        let id = store.create_job(OperationKind::Sentences).await;

        let job = store.get(&id).await.unwrap();
        assert_eq!(job.id, id);
        assert_eq!(job.operation, OperationKind::Sentences);
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.result.is_none());
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let store = JobStore::new();
        store.create_job(OperationKind::Pos).await;

        let err = store.get(&JobId::new()).await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Job", .. });
    }

    #[tokio::test]
    async fn update_moves_job_to_complete() {
        let store = JobStore::new();
        let id = store.create_job(OperationKind::Sentences).await;

        let job = store
            .update(&id, JobStatus::Complete, output(json!({"amount": 1})))
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Complete);
        assert_eq!(store.status(&id).await.unwrap(), JobStatus::Complete);
        assert_matches!(
            store.result(&id).await.unwrap(),
            JobOutcome::Complete(map) if map["amount"] == 1
        );
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = JobStore::new();
        let err = store
            .update(&JobId::new(), JobStatus::Complete, JobResult::Output(Map::new()))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::NotFound { .. });
    }

    #[tokio::test]
    async fn terminal_job_rejects_further_updates() {
        let store = JobStore::new();
        let id = store.create_job(OperationKind::Entities).await;
        store
            .update(
                &id,
                JobStatus::Error,
                JobResult::Failure(ErrorDescriptor::new("x", "first")),
            )
            .await
            .unwrap();

        let err = store
            .update(&id, JobStatus::Complete, JobResult::Output(Map::new()))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));

        assert_matches!(
            store.result(&id).await.unwrap(),
            JobOutcome::Error(descriptor) if descriptor.message == "first"
        );
    }

    #[tokio::test]
    async fn update_rejects_processing_target() {
        let store = JobStore::new();
        let id = store.create_job(OperationKind::Sentences).await;

        let err = store
            .update(&id, JobStatus::Processing, JobResult::Output(Map::new()))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(store.status(&id).await.unwrap(), JobStatus::Processing);
    }

    #[tokio::test]
    async fn update_rejects_mismatched_payload() {
        let store = JobStore::new();
        let id = store.create_job(OperationKind::Sentences).await;

        let err = store
            .update(&id, JobStatus::Error, JobResult::Output(Map::new()))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[tokio::test]
    async fn processing_job_reports_processing_outcome() {
        let store = JobStore::new();
        let id = store.create_job(OperationKind::Pos).await;
        assert_eq!(store.result(&id).await.unwrap(), JobOutcome::Processing);
    }

    #[tokio::test]
    async fn get_all_is_a_detached_snapshot() {
        let store = JobStore::new();
        let first = store.create_job(OperationKind::Sentences).await;
        let snapshot = store.get_all().await;

        store.create_job(OperationKind::Pos).await;
        store
            .update(&first, JobStatus::Complete, JobResult::Output(Map::new()))
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[&first].status, JobStatus::Processing);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn status_counts_tally_each_state() {
        let store = JobStore::new();
        let a = store.create_job(OperationKind::Sentences).await;
        let b = store.create_job(OperationKind::Sentences).await;
        store.create_job(OperationKind::Sentences).await;
        store
            .update(&a, JobStatus::Complete, JobResult::Output(Map::new()))
            .await
            .unwrap();
        store
            .update(
                &b,
                JobStatus::Error,
                JobResult::Failure(ErrorDescriptor::new("", "nope")),
            )
            .await
            .unwrap();

        assert_eq!(
            store.status_counts().await,
            StatusCounts {
                total: 3,
                processing: 1,
                complete: 1,
                error: 1,
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_yield_distinct_ids() {
        let store = Arc::new(JobStore::new());

        let handles = (0..8).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let mut ids = Vec::with_capacity(250);
                for _ in 0..250 {
                    ids.push(store.create_job(OperationKind::Sentences).await);
                }
                ids
            })
        });

        let mut seen = HashSet::new();
        for ids in futures::future::join_all(handles).await {
            for id in ids.unwrap() {
                assert!(seen.insert(id), "duplicate job id {id}");
            }
        }
        assert_eq!(seen.len(), 2000);
        assert_eq!(store.len().await, 2000);
    }
}
