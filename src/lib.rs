//! Span-to-run PII redaction for rich-text documents.
//!
//! This library redacts personally identifiable information inside
//! word-processing documents and slide decks while keeping every
//! non-sensitive character, formatting attribute and structural element as
//! it was. An external detector reports character spans over the plain text
//! of each paragraph; the engine maps those spans onto the paragraph's runs
//! (independently formatted text fragments) and rewrites only the covered
//! ranges.
//!
//! # Features
//!
//! - **Run-accurate redaction**: spans crossing bold/italic/color boundaries
//!   are split so each run only loses its own covered characters
//! - **Two policies**: glyph substitution (length-preserving) or whole-run
//!   format blackout
//! - **Bounded concurrency**: detector calls run on a fixed-size worker pool
//!   with back-pressure and a per-call deadline
//! - **Explicit failure handling**: failed paragraphs are left, redacted in
//!   full, or abort the document, as configured, and always reported
//!
//! # Architecture
//!
//! - [`domain`]: Object model, paragraph text assembly and span normalization
//! - [`detection`]: Detector trait, gateway and offset-unit conversion
//! - [`redaction`]: Policies, the run redactor and the service layer
//! - [`traversal`]: Paragraph enumeration for word-processing and slide documents
//! - [`config`]: Engine configuration
//! - [`error`]: Error handling
//!
//! # Quick Start
//!
//! ```
//! use pii_redactor::{Paragraph, PatternDetector, RedactionService, WordDocument};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = PatternDetector::new().with_literal("PERSON", "Jane Doe");
//! let service = RedactionService::with_defaults(Arc::new(detector))?;
//!
//! let mut doc = WordDocument::new()
//!     .with_paragraph(Paragraph::from_texts(&["Jane ", "Doe works here"]));
//! let report = service.redact_word_document(&mut doc)?;
//!
//! assert_eq!(doc.paragraphs[0].text(), "████████ works here");
//! assert_eq!(report.spans_redacted(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Examples
//!
//! ## Blackout formatting and fail-closed detection
//!
//! ```
//! use pii_redactor::{
//!     FailurePolicy, PatternDetector, PolicyKind, Presentation, RedactionConfig,
//!     RedactionService,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RedactionConfig::new()
//!     .with_policy(PolicyKind::FormatBlackout)
//!     .with_failure_policy(FailurePolicy::RedactParagraph)
//!     .with_max_concurrent(8);
//! let detector = PatternDetector::new().with_pattern("EMAIL", r"[\w.]+@[\w.]+")?;
//! let service = RedactionService::new(Arc::new(detector), config)?;
//!
//! let mut deck = Presentation::default();
//! let report = service.redact_presentation(&mut deck)?;
//! assert!(!report.is_partial());
//! # Ok(())
//! # }
//! ```
//!
//! ## Run redaction without a detector
//!
//! ```
//! use pii_redactor::domain::{assemble_runs, Run, Span};
//! use pii_redactor::redaction::{redact_runs, CharacterSubstitution};
//!
//! let mut runs = vec![Run::text("Jane "), Run::text("Doe works here")];
//! let assembled = assemble_runs(&runs);
//! let outcome = redact_runs(
//!     &mut runs,
//!     &assembled.offsets,
//!     &[Span::new(2, 9)],
//!     &CharacterSubstitution::new('#'),
//! )
//! .unwrap();
//!
//! assert_eq!(runs[0].as_str(), "Ja###");
//! assert_eq!(runs[1].as_str(), "####works here");
//! assert_eq!(outcome.chars_redacted, 7);
//! ```

// Public API
pub mod config;
pub mod detection;
pub mod domain;
pub mod error;
pub mod redaction;
pub mod traversal;

// Re-exports for convenient access
pub use config::{FailurePolicy, RedactionConfig};
pub use detection::{DetectionGateway, OffsetUnit, PatternDetector, PiiDetector};
pub use domain::{
    Cell, DetectedSpan, Highlight, Paragraph, ParagraphLocation, Presentation, Rgb, Row, Run,
    RunFormat, Shape, Slide, Span, Table, TextFrame, WordDocument,
};
pub use error::{DetectionError, RedactorError, RedactorResult, StructuralError};
pub use redaction::{
    CharacterSubstitution, FormatBlackout, IssueKind, ParagraphAudit, ParagraphIssue, PolicyKind,
    RedactionPolicy, RedactionReport, RedactionService,
};
pub use traversal::{DocumentKind, ParagraphContainer};
