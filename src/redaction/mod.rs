//! Redaction service and its building blocks.
//!
//! [`RedactionService`] drives one document through the pipeline:
//!
//! 1. traverse the document, assembling each paragraph's text and offset table
//!    and rejecting structurally inconsistent paragraphs;
//! 2. run detection for every non-blank paragraph on a bounded worker pool;
//! 3. traverse again, normalizing each paragraph's spans and rewriting its runs
//!    with the configured [`RedactionPolicy`].
//!
//! Only step 2 runs concurrently. Steps 1 and 3 touch the shared document
//! tree and run on the caller's thread.

pub mod policy;
pub mod pool;
pub mod report;
pub mod runs;

pub use policy::{CharacterSubstitution, FormatBlackout, PolicyKind, RedactionPolicy};
pub use report::{IssueKind, ParagraphAudit, ParagraphIssue, RedactionReport};
pub use runs::{redact_runs, RunRedaction};

use crate::config::{FailurePolicy, RedactionConfig};
use crate::detection::{DetectionGateway, PiiDetector};
use crate::domain::{
    assemble_paragraph, normalize_spans, DetectedSpan, Paragraph, ParagraphLocation,
    ParagraphText, Presentation, WordDocument,
};
use crate::error::{DetectionError, RedactorError, RedactorResult, StructuralError};
use crate::traversal::ParagraphContainer;
use pool::{detect_all, DetectionJob, DetectionOutcome};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What phase 3 does with one paragraph.
enum Plan {
    /// Blank paragraph; the detector was not called.
    Skip,
    Redact(Vec<DetectedSpan>),
    Failed(DetectionError),
}

struct Prepared {
    location: ParagraphLocation,
    assembled: ParagraphText,
}

/// Redaction service coordinating detection and run rewriting.
pub struct RedactionService {
    gateway: DetectionGateway,
    policy: Box<dyn RedactionPolicy>,
    config: RedactionConfig,
}

impl RedactionService {
    /// Creates a service for `detector`, validating `config`.
    pub fn new(detector: Arc<dyn PiiDetector>, config: RedactionConfig) -> RedactorResult<Self> {
        config.validate()?;
        let gateway = DetectionGateway::new(detector)
            .with_timeout(config.detect_timeout)
            .with_max_in_flight(config.max_concurrent);
        let policy = config.policy.build(config.glyph);
        Ok(Self {
            gateway,
            policy,
            config,
        })
    }

    /// Creates a service with the default configuration.
    pub fn with_defaults(detector: Arc<dyn PiiDetector>) -> RedactorResult<Self> {
        Self::new(detector, RedactionConfig::default())
    }

    /// Replaces the configured policy with a custom one.
    pub fn with_policy(mut self, policy: Box<dyn RedactionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn RedactionPolicy {
        self.policy.as_ref()
    }

    /// Redacts a word-processing document in place.
    pub fn redact_word_document(&self, document: &mut WordDocument) -> RedactorResult<RedactionReport> {
        self.redact(document)
    }

    /// Redacts a slide deck in place.
    pub fn redact_presentation(&self, deck: &mut Presentation) -> RedactorResult<RedactionReport> {
        self.redact(deck)
    }

    /// Redacts any paragraph container in place.
    ///
    /// On `Err` no run has been modified. On `Ok`, non-fatal problems are
    /// listed in [`RedactionReport::issues`]; callers decide whether a partial
    /// result is acceptable.
    pub fn redact<C: ParagraphContainer>(&self, document: &mut C) -> RedactorResult<RedactionReport> {
        let mut report = RedactionReport::new(document.kind(), self.policy.name());
        tracing::info!(
            kind = %report.document_kind,
            policy = self.policy.name(),
            detector = self.gateway.detector_name(),
            "starting redaction"
        );

        let prepared = Self::prepare(document)?;
        report.paragraphs_visited = prepared.len();

        let jobs: Vec<DetectionJob<'_>> = prepared
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.assembled.is_blank())
            .map(|(slot, p)| DetectionJob {
                slot,
                text: &p.assembled.text,
            })
            .collect();
        report.paragraphs_detected = jobs.len();

        let outcomes = detect_all(
            &self.gateway,
            jobs,
            prepared.len(),
            self.config.max_concurrent,
            self.config.queue_capacity,
        )?;
        let plans = self.plan(&prepared, outcomes)?;

        let mut work = prepared.iter().zip(plans);
        let mut failure: Option<RedactorError> = None;
        document.for_each_paragraph(|location, paragraph| {
            let Some((prepared, plan)) = work.next() else {
                return;
            };
            if failure.is_some() {
                return;
            }
            if let Err(err) = self.apply_plan(location, paragraph, &prepared.assembled, plan, &mut report)
            {
                failure = Some(err);
            }
        });
        if let Some(err) = failure {
            return Err(err);
        }

        tracing::info!(
            paragraphs = report.paragraphs_visited,
            detected = report.paragraphs_detected,
            spans = report.spans_redacted(),
            chars = report.chars_redacted(),
            issues = report.issues.len(),
            "redaction finished"
        );
        Ok(report)
    }

    /// Redacts one paragraph with spans the caller already has, bypassing the
    /// detector. Spans are in char offsets and are normalized first.
    pub fn redact_paragraph_with_spans(
        &self,
        location: ParagraphLocation,
        paragraph: &mut Paragraph,
        spans: &[DetectedSpan],
    ) -> RedactorResult<ParagraphAudit> {
        let assembled = assemble_paragraph(paragraph).map_err(|source| RedactorError::Structural {
            location: location.clone(),
            source,
        })?;
        self.apply_spans(location.clone(), paragraph, &assembled, spans)
            .map_err(|source| RedactorError::Structural { location, source })
    }

    /// Phase 1: assemble every paragraph, stopping at the first structural error.
    fn prepare<C: ParagraphContainer>(document: &mut C) -> RedactorResult<Vec<Prepared>> {
        let mut prepared = Vec::new();
        let mut structural: Option<RedactorError> = None;

        document.for_each_paragraph(|location, paragraph| {
            if structural.is_some() {
                return;
            }
            match assemble_paragraph(paragraph) {
                Ok(assembled) => prepared.push(Prepared {
                    location,
                    assembled,
                }),
                Err(source) => structural = Some(RedactorError::Structural { location, source }),
            }
        });

        match structural {
            Some(err) => Err(err),
            None => Ok(prepared),
        }
    }

    /// Turns detection outcomes into per-paragraph plans. Under
    /// [`FailurePolicy::Abort`] the first failure in document order fails the
    /// whole run here, before anything is mutated.
    fn plan(
        &self,
        prepared: &[Prepared],
        outcomes: Vec<Option<DetectionOutcome>>,
    ) -> RedactorResult<Vec<Plan>> {
        let mut plans = Vec::with_capacity(prepared.len());
        for (paragraph, outcome) in prepared.iter().zip(outcomes) {
            let plan = match outcome {
                None | Some(Ok(None)) => Plan::Skip,
                Some(Ok(Some(spans))) => Plan::Redact(spans),
                Some(Err(source)) => {
                    if self.config.on_detection_failure == FailurePolicy::Abort {
                        tracing::warn!(
                            location = %paragraph.location,
                            error = %source,
                            "detection failed; aborting document"
                        );
                        return Err(RedactorError::DetectionAborted {
                            location: paragraph.location.clone(),
                            source,
                        });
                    }
                    Plan::Failed(source)
                }
            };
            plans.push(plan);
        }
        Ok(plans)
    }

    /// Phase 3 for one paragraph.
    fn apply_plan(
        &self,
        location: ParagraphLocation,
        paragraph: &mut Paragraph,
        assembled: &ParagraphText,
        plan: Plan,
        report: &mut RedactionReport,
    ) -> RedactorResult<()> {
        let spans = match plan {
            Plan::Skip => return Ok(()),
            Plan::Redact(spans) => spans,
            Plan::Failed(err) => match self.config.on_detection_failure {
                FailurePolicy::RedactParagraph => {
                    tracing::warn!(
                        %location,
                        error = %err,
                        "detection failed; redacting whole paragraph"
                    );
                    report.issues.push(ParagraphIssue {
                        location: location.clone(),
                        kind: IssueKind::RedactedWholeParagraph,
                        message: err.to_string(),
                    });
                    vec![DetectedSpan::new(0, assembled.char_len as i64)]
                }
                FailurePolicy::LeaveUnredacted | FailurePolicy::Abort => {
                    tracing::warn!(
                        %location,
                        error = %err,
                        "detection failed; paragraph left unredacted"
                    );
                    let kind = if err.is_timeout() {
                        IssueKind::DetectionTimedOut
                    } else {
                        IssueKind::DetectionFailed
                    };
                    report.issues.push(ParagraphIssue {
                        location,
                        kind,
                        message: err.to_string(),
                    });
                    return Ok(());
                }
            },
        };

        let audit = self
            .apply_spans(location.clone(), paragraph, assembled, &spans)
            .map_err(|source| RedactorError::Structural { location, source })?;
        if audit.spans_redacted > 0 || audit.dropped_spans > 0 {
            report.paragraphs.push(audit);
        }
        Ok(())
    }

    fn apply_spans(
        &self,
        location: ParagraphLocation,
        paragraph: &mut Paragraph,
        assembled: &ParagraphText,
        raw: &[DetectedSpan],
    ) -> Result<ParagraphAudit, StructuralError> {
        let normalized = normalize_spans(raw, assembled.char_len, self.config.min_score);
        let applied = redact_runs(
            &mut paragraph.runs,
            &assembled.offsets,
            &normalized.spans,
            self.policy.as_ref(),
        )?;

        let mut labels = BTreeMap::new();
        for span in &normalized.spans {
            if let Some(label) = &span.label {
                *labels.entry(label.clone()).or_insert(0) += 1;
            }
        }

        tracing::debug!(
            %location,
            spans = normalized.spans.len(),
            dropped = normalized.dropped,
            below_threshold = normalized.below_threshold,
            chars = applied.chars_redacted,
            runs = applied.runs_touched,
            "paragraph processed"
        );

        Ok(ParagraphAudit {
            location,
            spans_redacted: normalized.spans.len(),
            chars_redacted: applied.chars_redacted,
            runs_touched: applied.runs_touched,
            dropped_spans: normalized.dropped,
            labels,
        })
    }
}

impl std::fmt::Debug for RedactionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedactionService")
            .field("gateway", &self.gateway)
            .field("policy", &self.policy.name())
            .field("config", &self.config)
            .finish()
    }
}
