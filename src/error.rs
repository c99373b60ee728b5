//! Error types for the redaction engine.
//!
//! Errors fall into two groups. [`RedactorError`] is fatal for a whole
//! document: the engine refuses to produce output. [`DetectionError`] is
//! scoped to one paragraph and, depending on the configured
//! [`FailurePolicy`](crate::config::FailurePolicy), is either recorded in the
//! report or escalated into [`RedactorError::DetectionAborted`].

use crate::domain::ParagraphLocation;
use thiserror::Error;

/// Result type alias for redaction operations.
pub type RedactorResult<T> = Result<T, RedactorError>;

/// Document-level error. Any of these means no trustworthy output exists.
#[derive(Debug, Error)]
pub enum RedactorError {
    /// The object model handed to the engine contradicts itself.
    #[error("structural error at {location}: {source}")]
    Structural {
        location: ParagraphLocation,
        #[source]
        source: StructuralError,
    },

    /// Detection failed and the failure policy says to abort the document.
    #[error("detection aborted at {location}: {source}")]
    DetectionAborted {
        location: ParagraphLocation,
        #[source]
        source: DetectionError,
    },

    /// Invalid configuration or parameters
    #[error("invalid configuration for '{parameter}': {reason}")]
    InvalidConfig { parameter: String, reason: String },

    /// Pattern compilation error
    #[error("pattern error for '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// The detection worker pool could not run to completion.
    #[error("detection worker pool failed: {reason}")]
    WorkerPool { reason: String },
}

impl From<regex::Error> for RedactorError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern {
            pattern: "<unknown>".to_string(),
            reason: err.to_string(),
        }
    }
}

/// The container object model violates its own invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The parser-reported paragraph text differs from the run concatenation.
    #[error("paragraph reports {reported} chars but its runs hold {assembled}")]
    TextMismatch { reported: usize, assembled: usize },

    /// The run offset table does not tile the paragraph text.
    #[error("run offsets end at {covered} but paragraph text has {expected} chars")]
    OffsetGap { covered: usize, expected: usize },

    /// The offset table and the run list disagree on the run count.
    #[error("offset table has {offsets} entries for {runs} runs")]
    RunCountMismatch { runs: usize, offsets: usize },
}

/// Failure of a single detector call.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The detector returned an error.
    #[error("detector '{detector}' failed: {source}")]
    Backend {
        detector: String,
        #[source]
        source: anyhow::Error,
    },

    /// The detector did not answer before the deadline.
    #[error("detector '{detector}' timed out after {timeout_ms} ms")]
    Timeout { detector: String, timeout_ms: u64 },

    /// The detector panicked while handling the paragraph.
    #[error("detector '{detector}' panicked")]
    Panicked { detector: String },
}

impl DetectionError {
    /// Returns true if this failure was a missed deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
