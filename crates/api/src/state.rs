use std::sync::Arc;

use lexa_core::analyzer::Analyzer;
use lexa_core::store::JobStore;
use lexa_worker::WorkerPool;

use crate::config::ServerConfig;
use crate::engine::dispatcher::Dispatcher;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Job records, the single source of truth for status and results.
    pub store: Arc<JobStore>,
    /// Background workers running the analyzer.
    pub pool: Arc<WorkerPool>,
    /// Creates jobs and queues them on `pool`.
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Build the store, start the worker pool and wire up the dispatcher.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: ServerConfig, analyzer: Arc<dyn Analyzer>) -> Self {
        let store = Arc::new(JobStore::new());
        let pool = Arc::new(WorkerPool::start(
            config.pool_config(),
            Arc::clone(&store),
            analyzer,
        ));
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&store),
            Arc::clone(&pool),
            config.submit_timeout(),
        ));

        Self {
            config: Arc::new(config),
            store,
            pool,
            dispatcher,
        }
    }
}
