use std::time::Duration;

use lexa_analyzer::DEFAULT_MAX_CHARS;
use lexa_worker::pool::{PoolConfig, DEFAULT_QUEUE_CAPACITY};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining the worker pool at shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Concurrent analysis workers (default: available parallelism).
    pub worker_count: usize,
    /// Jobs that may wait for a free worker (default: `256`).
    pub queue_capacity: usize,
    /// How long a submission waits on a full queue before giving up.
    pub submit_timeout_ms: u64,
    /// Longest accepted input, in characters.
    pub max_input_chars: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `WORKER_COUNT`         | number of CPUs             |
    /// | `QUEUE_CAPACITY`       | `256`                      |
    /// | `SUBMIT_TIMEOUT_MS`    | `250`                      |
    /// | `MAX_INPUT_CHARS`      | `100000`                   |
    ///
    /// Panics on values that do not parse; misconfiguration should stop the
    /// process before it binds.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let worker_count: usize = match std::env::var("WORKER_COUNT") {
            Ok(v) => v.parse().expect("WORKER_COUNT must be a valid usize"),
            Err(_) => PoolConfig::default().worker_count,
        };

        let queue_capacity: usize = std::env::var("QUEUE_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_QUEUE_CAPACITY.to_string())
            .parse()
            .expect("QUEUE_CAPACITY must be a valid usize");

        let submit_timeout_ms: u64 = std::env::var("SUBMIT_TIMEOUT_MS")
            .unwrap_or_else(|_| "250".into())
            .parse()
            .expect("SUBMIT_TIMEOUT_MS must be a valid u64");

        let max_input_chars: usize = std::env::var("MAX_INPUT_CHARS")
            .unwrap_or_else(|_| DEFAULT_MAX_CHARS.to_string())
            .parse()
            .expect("MAX_INPUT_CHARS must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            worker_count: worker_count.max(1),
            queue_capacity: queue_capacity.max(1),
            submit_timeout_ms,
            max_input_chars,
        }
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            worker_count: self.worker_count,
            queue_capacity: self.queue_capacity,
        }
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }
}
