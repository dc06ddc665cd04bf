//! Background execution of analysis jobs.
//!
//! [`pool::WorkerPool`] owns a bounded queue and a fixed set of worker loops;
//! each worker runs [`job::execute_job`] for the items it dequeues and writes
//! the terminal outcome to the shared job store.

pub mod job;
pub mod pool;

pub use job::{execute_job, WorkItem};
pub use pool::{PoolConfig, PoolError, PoolStats, WorkerPool};
