//! Detector spans and their normalization.

use serde::{Deserialize, Serialize};

/// A span as a detector reports it, already converted to char offsets.
///
/// Offsets are signed so that garbage from a detector (negative indices)
/// survives until normalization drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSpan {
    pub start: i64,
    pub end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl DetectedSpan {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            label: None,
            score: None,
        }
    }

    pub fn labeled(start: i64, end: i64, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(start, end)
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Normalized redaction span: `start < end <= paragraph length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Output of [`normalize_spans`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSpans {
    /// Sorted, disjoint spans: `spans[i].end < spans[i + 1].start`.
    pub spans: Vec<Span>,
    /// Spans dropped because clamping could not repair them.
    pub dropped: usize,
    /// Spans dropped for scoring below the configured threshold.
    pub below_threshold: usize,
}

/// Clamps, filters, sorts and merges raw spans over a paragraph of `len` chars.
///
/// Overlapping or touching spans collapse into one covering their union; the
/// merged span keeps the label of the earliest span in the group.
pub fn normalize_spans(raw: &[DetectedSpan], len: usize, min_score: Option<f32>) -> NormalizedSpans {
    let upper = i64::try_from(len).unwrap_or(i64::MAX);
    let mut dropped = 0;
    let mut below_threshold = 0;
    let mut clamped: Vec<Span> = Vec::with_capacity(raw.len());

    for span in raw {
        if let (Some(threshold), Some(score)) = (min_score, span.score) {
            if score < threshold {
                below_threshold += 1;
                continue;
            }
        }

        let start = span.start.clamp(0, upper);
        let end = span.end.clamp(0, upper);
        if start >= end {
            tracing::debug!(
                start = span.start,
                end = span.end,
                len,
                "dropping malformed span"
            );
            dropped += 1;
            continue;
        }

        // Both bounds lie in [0, len] after clamping.
        clamped.push(Span {
            start: start as usize,
            end: end as usize,
            label: span.label.clone(),
        });
    }

    clamped.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut spans: Vec<Span> = Vec::with_capacity(clamped.len());
    for span in clamped {
        match spans.last_mut() {
            Some(last) if last.end >= span.start => {
                last.end = last.end.max(span.end);
            }
            _ => spans.push(span),
        }
    }

    NormalizedSpans {
        spans,
        dropped,
        below_threshold,
    }
}
