//! Job records and their status lifecycle.
//!
//! A job starts in [`JobStatus::Processing`] and moves exactly once to either
//! [`JobStatus::Complete`] or [`JobStatus::Error`]. The payload attached to a
//! terminal job is a [`JobResult`]: an operation-specific output mapping, or
//! an [`ErrorDescriptor`] holding only serialisable text.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// JobId
// ---------------------------------------------------------------------------

/// Opaque job identifier: a random 128-bit token (UUID v4).
///
/// Serialised as the lowercase hyphenated string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Processing,
    Complete,
    Error,
}

impl JobStatus {
    /// `true` for `Complete` and `Error`; no transition leaves these states.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Operation kind
// ---------------------------------------------------------------------------

/// Which analysis a job runs. Recorded on the job for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Sentence segmentation.
    Sentences,
    /// Part-of-speech filtering by requested tags.
    Pos,
    /// Named-entity extraction grouped by label.
    #[serde(alias = "ents")]
    Entities,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sentences => "sentences",
            Self::Pos => "pos",
            Self::Entities => "entities",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sentences" => Ok(Self::Sentences),
            "pos" => Ok(Self::Pos),
            "entities" | "ents" => Ok(Self::Entities),
            other => Err(format!(
                "Unknown operation '{other}' (expected sentences, pos or entities)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Text-only description of a failed job.
///
/// Always echoes the original input so a client can diagnose the failure
/// from the stored record alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDescriptor {
    pub input: String,
    pub message: String,
    /// Invalid parameter values mapped to the reason they were rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl ErrorDescriptor {
    pub fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: BTreeMap<String, String>) -> Self {
        self.details = Some(details);
        self
    }
}

/// Payload stored on a terminal job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JobResult {
    /// Operation-specific key/value mapping of a `Complete` job.
    Output(Map<String, Value>),
    /// Error descriptor of an `Error` job.
    Failure(ErrorDescriptor),
}

impl JobResult {
    /// The only status this payload may be stored under.
    pub fn status(&self) -> JobStatus {
        match self {
            Self::Output(_) => JobStatus::Complete,
            Self::Failure(_) => JobStatus::Error,
        }
    }
}

/// What a caller sees when asking for a job's result.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The job has not finished; there is no partial payload.
    Processing,
    Complete(Map<String, Value>),
    Error(ErrorDescriptor),
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// A tracked unit of asynchronous analysis work.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: JobId,
    pub operation: OperationKind,
    pub status: JobStatus,
    /// `None` while processing.
    pub result: Option<JobResult>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Job {
    /// A fresh `Processing` record with no result.
    pub fn new(id: JobId, operation: OperationKind) -> Self {
        let now = chrono::Utc::now();
        Self {
            id,
            operation,
            status: JobStatus::Processing,
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn outcome(&self) -> JobOutcome {
        match (&self.status, &self.result) {
            (JobStatus::Complete, Some(JobResult::Output(output))) => {
                JobOutcome::Complete(output.clone())
            }
            (JobStatus::Error, Some(JobResult::Failure(descriptor))) => {
                JobOutcome::Error(descriptor.clone())
            }
            _ => JobOutcome::Processing,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
