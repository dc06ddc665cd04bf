//! Job dispatcher.
//!
//! Registers each analysis request as a `processing` job and hands it to
//! the worker pool. The caller gets the job record back immediately and
//! polls the query endpoints for the outcome.

use std::sync::Arc;
use std::time::Duration;

use lexa_core::analyzer::AnalysisRequest;
use lexa_core::job::{ErrorDescriptor, Job, JobResult, JobStatus};
use lexa_core::store::JobStore;
use lexa_worker::{PoolError, WorkItem, WorkerPool};

use crate::error::{AppError, AppResult};

pub struct Dispatcher {
    store: Arc<JobStore>,
    pool: Arc<WorkerPool>,
    submit_timeout: Duration,
}

impl Dispatcher {
    /// `submit_timeout` bounds how long [`dispatch`](Self::dispatch) waits on
    /// a full queue.
    pub fn new(store: Arc<JobStore>, pool: Arc<WorkerPool>, submit_timeout: Duration) -> Self {
        Self {
            store,
            pool,
            submit_timeout,
        }
    }

    /// Create a job for `request` and queue it for execution.
    ///
    /// Never waits for the analysis itself. The returned record is normally
    /// `processing` but may already be terminal if a worker was quick.
    ///
    /// If the job cannot be queued it is moved to `error` before this returns,
    /// so no record stays `processing` without a worker behind it.
    pub async fn dispatch(&self, request: AnalysisRequest) -> AppResult<Job> {
        let operation = request.operation.kind();
        let id = self.store.create_job(operation).await;
        let input = request.input.clone();

        let submitted = self
            .pool
            .submit(WorkItem { id, request }, self.submit_timeout)
            .await;

        if let Err(e) = submitted {
            tracing::warn!(job_id = %id, %operation, error = %e, "Job could not be queued");
            self.store
                .update(
                    &id,
                    JobStatus::Error,
                    JobResult::Failure(ErrorDescriptor::new(input, e.to_string())),
                )
                .await?;
            return Err(match e {
                PoolError::QueueFull { .. } => AppError::QueueFull { id },
                PoolError::Closed => AppError::InternalError(e.to_string()),
            });
        }

        tracing::info!(job_id = %id, %operation, "Job dispatched");
        Ok(self.store.get(&id).await?)
    }
}
