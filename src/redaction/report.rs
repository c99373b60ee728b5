//! Audit output of a redaction run.
//!
//! Records counts and locations only. Nothing here carries redacted text, so
//! a report can be logged, stored or shown to a user as-is.

use crate::domain::ParagraphLocation;
use crate::traversal::DocumentKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Per-paragraph redaction counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphAudit {
    pub location: ParagraphLocation,
    /// Normalized spans applied.
    pub spans_redacted: usize,
    /// Chars covered by those spans.
    pub chars_redacted: usize,
    /// Runs the policy touched.
    pub runs_touched: usize,
    /// Detector spans dropped as malformed.
    pub dropped_spans: usize,
    /// Applied spans per detector label. Unlabeled spans are not listed.
    pub labels: BTreeMap<String, usize>,
}

/// Category of a non-fatal problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Detector failed; paragraph left unredacted.
    DetectionFailed,
    /// Detector missed its deadline; paragraph left unredacted.
    DetectionTimedOut,
    /// Detector failed; paragraph redacted in full instead.
    RedactedWholeParagraph,
}

impl IssueKind {
    /// Returns true if sensitive content may remain in the paragraph.
    pub fn leaves_content_exposed(self) -> bool {
        matches!(self, Self::DetectionFailed | Self::DetectionTimedOut)
    }
}

/// A non-fatal problem recorded against one paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphIssue {
    pub location: ParagraphLocation,
    pub kind: IssueKind,
    pub message: String,
}

/// Outcome of redacting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactionReport {
    pub document_kind: DocumentKind,
    /// Name of the redaction policy applied.
    pub policy: String,
    /// Paragraphs the traversal visited.
    pub paragraphs_visited: usize,
    /// Paragraphs sent to the detector (non-blank ones).
    pub paragraphs_detected: usize,
    /// Paragraphs where spans were applied or dropped.
    pub paragraphs: Vec<ParagraphAudit>,
    pub issues: Vec<ParagraphIssue>,
}

impl RedactionReport {
    pub fn new(document_kind: DocumentKind, policy: impl Into<String>) -> Self {
        Self {
            document_kind,
            policy: policy.into(),
            paragraphs_visited: 0,
            paragraphs_detected: 0,
            paragraphs: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn spans_redacted(&self) -> usize {
        self.paragraphs.iter().map(|p| p.spans_redacted).sum()
    }

    pub fn chars_redacted(&self) -> usize {
        self.paragraphs.iter().map(|p| p.chars_redacted).sum()
    }

    /// Returns true if any applied spans were recorded.
    pub fn has_redactions(&self) -> bool {
        self.spans_redacted() > 0
    }

    /// Returns true if some paragraph may still hold undetected content.
    pub fn is_partial(&self) -> bool {
        self.issues.iter().any(|i| i.kind.leaves_content_exposed())
    }

    /// Audit entry for a paragraph, if anything was redacted there.
    pub fn paragraph(&self, location: &ParagraphLocation) -> Option<&ParagraphAudit> {
        self.paragraphs.iter().find(|p| &p.location == location)
    }

    /// Applied spans per label, summed across paragraphs.
    pub fn label_totals(&self) -> BTreeMap<String, usize> {
        let mut totals = BTreeMap::new();
        for audit in &self.paragraphs {
            for (label, count) in &audit.labels {
                *totals.entry(label.clone()).or_insert(0) += count;
            }
        }
        totals
    }

    /// One-line confirmation suitable for a user.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} item(s) redacted in {} paragraph(s)",
            self.spans_redacted(),
            self.paragraphs.len()
        );
        let unchecked = self
            .issues
            .iter()
            .filter(|i| i.kind.leaves_content_exposed())
            .count();
        let withheld = self.issues.len() - unchecked;
        if unchecked > 0 {
            line.push_str(&format!(
                "; {} paragraph(s) could not be checked",
                unchecked
            ));
        }
        if withheld > 0 {
            line.push_str(&format!(
                "; {} paragraph(s) redacted in full after detection failed",
                withheld
            ));
        }
        line
    }

    /// Renders the report as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RedactionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
