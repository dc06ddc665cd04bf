//! Rule-based text analyzer.
//!
//! [`RuleAnalyzer`] implements [`lexa_core::analyzer::Analyzer`] with
//! deterministic heuristics: punctuation- and abbreviation-aware sentence
//! segmentation, lexicon plus suffix part-of-speech tagging, and
//! capitalisation-driven named-entity spans. It needs no model files and
//! always gives the same answer for the same input.

pub mod entities;
pub mod lexicon;
pub mod segment;
pub mod tagger;

use lexa_core::analyzer::{AnalysisError, AnalysisRequest, Analyzer, Document, Operation};

/// Default upper bound on input length, in characters.
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Deterministic heuristic analyzer.
#[derive(Debug, Clone)]
pub struct RuleAnalyzer {
    max_chars: usize,
}

impl RuleAnalyzer {
    /// Analyzer rejecting inputs longer than `max_chars` characters.
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

impl Default for RuleAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl Analyzer for RuleAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<Document, AnalysisError> {
        let text = request.input.as_str();

        let len = text.chars().count();
        if len > self.max_chars {
            return Err(AnalysisError::InputTooLarge {
                len,
                max: self.max_chars,
            });
        }
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let spans = segment::sentence_spans(text);
        let mut document = Document {
            sentences: spans
                .iter()
                .map(|&(start, end)| text[start..end].to_string())
                .collect(),
            ..Document::default()
        };

        if request.operation != Operation::Sentences {
            for &(start, end) in &spans {
                let tokens = tagger::tag_sentence(&tagger::tokenize(text, start, end));
                if request.operation == Operation::Entities {
                    document
                        .entities
                        .extend(entities::extract_entities(text, &tokens));
                }
                document.tokens.extend(tokens);
            }
        }

        tracing::debug!(
            operation = %request.operation.kind(),
            chars = len,
            sentences = document.sentences.len(),
            tokens = document.tokens.len(),
            entities = document.entities.len(),
            "Analysis finished",
        );

        Ok(document)
    }
}
