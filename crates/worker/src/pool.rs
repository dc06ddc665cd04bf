//! Bounded pool of long-lived job workers.
//!
//! [`WorkerPool::start`] spawns a fixed number of worker loops that pull
//! [`WorkItem`]s off one bounded queue. At most `worker_count` analyses run
//! at once; once the queue is full, [`WorkerPool::submit`] waits up to the
//! caller's deadline and then reports [`PoolError::QueueFull`].

use std::sync::Arc;
use std::time::Duration;

use lexa_core::analyzer::Analyzer;
use lexa_core::store::JobStore;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::job::{execute_job, WorkItem};

/// Default number of queued items when none is configured.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Sizing of a [`WorkerPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of concurrent workers. Clamped to at least 1.
    pub worker_count: usize,
    /// Items that may wait for a free worker. Clamped to at least 1.
    pub queue_capacity: usize,
}

impl Default for PoolConfig {
    /// One worker per available core and the default queue capacity.
    fn default() -> Self {
        Self {
            worker_count: std::thread::available_parallelism().map_or(1, usize::from),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("Work queue is full ({capacity} jobs waiting)")]
    QueueFull { capacity: usize },

    #[error("Worker pool is shut down")]
    Closed,
}

/// Point-in-time load of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub workers: usize,
    pub queued: usize,
    pub queue_capacity: usize,
}

/// Fixed set of workers draining a bounded queue.
pub struct WorkerPool {
    sender: Mutex<Option<mpsc::Sender<WorkItem>>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    worker_count: usize,
    queue_capacity: usize,
}

impl WorkerPool {
    /// Spawn the workers. Must be called from within a Tokio runtime.
    pub fn start(config: PoolConfig, store: Arc<JobStore>, analyzer: Arc<dyn Analyzer>) -> Self {
        let worker_count = config.worker_count.max(1);
        let queue_capacity = config.queue_capacity.max(1);

        let (tx, rx) = mpsc::channel(queue_capacity);
        let rx = Arc::new(Mutex::new(rx));

        let handles = (0..worker_count)
            .map(|slot| {
                tokio::spawn(run_worker(
                    slot,
                    Arc::clone(&rx),
                    Arc::clone(&store),
                    Arc::clone(&analyzer),
                ))
            })
            .collect();

        tracing::info!(worker_count, queue_capacity, "Worker pool started");

        Self {
            sender: Mutex::new(Some(tx)),
            handles: Mutex::new(handles),
            worker_count,
            queue_capacity,
        }
    }

    /// Queue `item`, waiting at most `wait` for a free slot.
    pub async fn submit(&self, item: WorkItem, wait: Duration) -> Result<(), PoolError> {
        let sender = self.sender.lock().await.clone().ok_or(PoolError::Closed)?;

        sender.send_timeout(item, wait).await.map_err(|e| match e {
            mpsc::error::SendTimeoutError::Timeout(_) => PoolError::QueueFull {
                capacity: self.queue_capacity,
            },
            mpsc::error::SendTimeoutError::Closed(_) => PoolError::Closed,
        })
    }

    /// Stop accepting work, let the workers drain the queue, and wait for them.
    ///
    /// Idempotent; later calls return immediately.
    pub async fn shutdown(&self) {
        let Some(sender) = self.sender.lock().await.take() else {
            return;
        };
        drop(sender);

        let handles = std::mem::take(&mut *self.handles.lock().await);
        tracing::info!(workers = handles.len(), "Draining worker pool");
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Worker task ended abnormally");
            }
        }
        tracing::info!("Worker pool stopped");
    }

    pub async fn stats(&self) -> PoolStats {
        let queued = self
            .sender
            .lock()
            .await
            .as_ref()
            .map_or(0, |tx| self.queue_capacity.saturating_sub(tx.capacity()));
        PoolStats {
            workers: self.worker_count,
            queued,
            queue_capacity: self.queue_capacity,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }
}

/// One worker: take the next item, run it, repeat until the queue closes.
async fn run_worker(
    slot: usize,
    rx: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
    store: Arc<JobStore>,
    analyzer: Arc<dyn Analyzer>,
) {
    tracing::debug!(slot, "Worker started");

    loop {
        let next = rx.lock().await.recv().await;
        let Some(item) = next else {
            break;
        };

        let id = item.id;
        let operation = item.request.operation.kind();
        match execute_job(&store, Arc::clone(&analyzer), item).await {
            Ok(status) => {
                tracing::info!(slot, job_id = %id, %operation, %status, "Job finished");
            }
            Err(e) => {
                tracing::error!(slot, job_id = %id, error = %e, "Failed to record job outcome");
            }
        }
    }

    tracing::debug!(slot, "Worker stopped");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
