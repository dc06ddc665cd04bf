//! The seam between the job machinery and the text-analysis backend.
//!
//! Defines [`Analyzer`], the trait a backend implements, along with the
//! request it receives ([`AnalysisRequest`]), the [`Document`] it returns and
//! the [`AnalysisError`] it may fail with. Workers call
//! [`Analyzer::analyze`] on a blocking thread, so implementations are free to
//! be slow and synchronous.

use serde::Serialize;

use crate::job::OperationKind;
use crate::pos::PosTag;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Operation plus its operation-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Sentences,
    /// Raw, unvalidated comma-separated tag list as supplied by the client.
    PartOfSpeech { tags: String },
    Entities,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Sentences => OperationKind::Sentences,
            Self::PartOfSpeech { .. } => OperationKind::Pos,
            Self::Entities => OperationKind::Entities,
        }
    }
}

/// Everything a worker needs to run one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub operation: Operation,
    pub input: String,
}

impl AnalysisRequest {
    pub fn new(operation: Operation, input: impl Into<String>) -> Self {
        Self {
            operation,
            input: input.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A token with its byte span in the analysed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub pos: PosTag,
    pub start: usize,
    pub end: usize,
}

/// A named-entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub text: String,
    /// Entity label, e.g. `PERSON`, `GPE`, `DATE`.
    pub label: String,
}

/// Structured analysis of one input text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub sentences: Vec<String>,
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure raised by an analyzer. Carries only a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Input is {len} characters long; the limit is {max}")]
    InputTooLarge { len: usize, max: usize },

    #[error("Input contains no text to analyse")]
    EmptyInput,

    #[error("Analysis failed: {0}")]
    Failed(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A synchronous text-analysis backend.
///
/// Shared across all worker slots behind an `Arc`, hence `Send + Sync`.
/// An implementation may skip work the requested operation does not need,
/// but must fill every [`Document`] field that operation reads.
pub trait Analyzer: Send + Sync + 'static {
    fn analyze(&self, request: &AnalysisRequest) -> Result<Document, AnalysisError>;
}
