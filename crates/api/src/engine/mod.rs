//! Job execution engine.
//!
//! The [`dispatcher::Dispatcher`] turns accepted requests into tracked jobs
//! and queues them on the worker pool owned by [`crate::state::AppState`].

pub mod dispatcher;
