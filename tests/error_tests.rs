//! Error handling tests.
//!
//! These tests verify error display, source chains and the structural
//! checks that make the engine refuse a document.

use pii_redactor::domain::CellCoord;
use pii_redactor::error::{DetectionError, RedactorError, StructuralError};
use pii_redactor::{
    Paragraph, ParagraphLocation, PatternDetector, RedactionConfig, RedactionService, Run,
};
use std::error::Error as StdError;
use std::sync::Arc;

mod common;
use common::*;

#[test]
fn test_structural_error_display() {
    let err = RedactorError::Structural {
        location: ParagraphLocation::TableCell {
            path: vec![CellCoord {
                table: 0,
                row: 1,
                cell: 2,
            }],
            paragraph: 0,
        },
        source: StructuralError::TextMismatch {
            reported: 12,
            assembled: 10,
        },
    };

    let display = err.to_string();
    assert!(display.contains("T0R1C2/P0"));
    assert!(display.contains("12"));
    assert!(display.contains("10"));
}

#[test]
fn test_structural_error_source_chain() {
    let err = RedactorError::Structural {
        location: ParagraphLocation::Body { paragraph: 0 },
        source: StructuralError::OffsetGap {
            covered: 4,
            expected: 6,
        },
    };

    let source = err.source().expect("structural error keeps its source");
    assert!(source.to_string().contains("end at 4"));
}

#[test]
fn test_detection_aborted_chain_reaches_backend() {
    let err = RedactorError::DetectionAborted {
        location: ParagraphLocation::Slide {
            slide: 2,
            shape_path: vec![1],
            paragraph: 0,
        },
        source: DetectionError::Backend {
            detector: "analyzer".to_string(),
            source: anyhow::anyhow!("connection reset"),
        },
    };

    assert!(err.to_string().contains("S2/Sh1/P0"));
    let detection = err.source().unwrap();
    assert!(detection.to_string().contains("analyzer"));
    let backend = detection.source().unwrap();
    assert_eq!(backend.to_string(), "connection reset");
}

#[test]
fn test_timeout_display() {
    let err = DetectionError::Timeout {
        detector: "analyzer".to_string(),
        timeout_ms: 250,
    };
    assert!(err.is_timeout());
    assert_eq!(err.to_string(), "detector 'analyzer' timed out after 250 ms");
}

#[test]
fn test_invalid_pattern_is_reported() {
    let err = PatternDetector::new()
        .with_pattern("BROKEN", "(unclosed")
        .unwrap_err();

    match err {
        RedactorError::Pattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        other => panic!("expected Pattern, got {:?}", other),
    }
}

#[test]
fn test_invalid_config_rejected_by_service() {
    let config = RedactionConfig::new().with_queue_capacity(0);
    let err = RedactionService::new(Arc::new(PatternDetector::new()), config).unwrap_err();

    assert!(matches!(
        err,
        RedactorError::InvalidConfig { ref parameter, .. } if parameter == "queue_capacity"
    ));
}

#[test]
fn test_invalid_min_score_rejected() {
    let config = RedactionConfig::new().with_min_score(1.5);
    assert!(config.validate().is_err());
}

/// A paragraph whose reported text disagrees with its runs aborts the
/// document before anything is redacted.
#[test]
fn test_reported_text_mismatch_refuses_document() {
    let service =
        RedactionService::with_defaults(Arc::new(NeedleDetector::new(&["Jane Doe"]))).unwrap();
    let mut doc = TestDocBuilder::new()
        .with_paragraph(&["Jane Doe signed"])
        .build();
    doc.paragraphs.push(
        Paragraph::new(vec![Run::text("Jane "), Run::text("Doe")])
            .with_reported_text("Jane Doe, Esq."),
    );
    let before = doc.clone();

    let err = service.redact_word_document(&mut doc).unwrap_err();

    match err {
        RedactorError::Structural { location, source } => {
            assert_eq!(location, ParagraphLocation::Body { paragraph: 1 });
            assert_eq!(
                source,
                StructuralError::TextMismatch {
                    reported: 14,
                    assembled: 8,
                }
            );
        }
        other => panic!("expected Structural, got {:?}", other),
    }
    assert_eq!(doc, before);
}

/// A matching reported text is accepted.
#[test]
fn test_reported_text_match_is_accepted() {
    let service =
        RedactionService::with_defaults(Arc::new(NeedleDetector::new(&["Doe"]))).unwrap();
    let mut doc = TestDocBuilder::new().build();
    doc.paragraphs.push(
        Paragraph::new(vec![Run::text("Jane "), Run::text("Doe")]).with_reported_text("Jane Doe"),
    );

    service.redact_word_document(&mut doc).unwrap();
    assert_eq!(doc.paragraphs[0].runs[1].as_str(), "███");
}
