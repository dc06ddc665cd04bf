//! Domain types shared by the lexa crates.
//!
//! Holds the job model and its status lifecycle, the in-memory [`store::JobStore`],
//! the Universal POS tag vocabulary, and the [`analyzer::Analyzer`] seam that the
//! worker pool calls into. Nothing in here performs I/O.

pub mod analyzer;
pub mod error;
pub mod job;
pub mod pos;
pub mod store;
pub mod types;
