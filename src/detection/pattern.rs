//! Regex-backed detector.
//!
//! Flags whatever the caller's patterns match. Useful for deterministic
//! tests, for known identifiers (case numbers, customer IDs), and as a
//! fallback when no model is available.

use super::{OffsetUnit, PiiDetector};
use crate::domain::DetectedSpan;
use crate::error::{RedactorError, RedactorResult};
use regex::Regex;

/// Detector built from caller-supplied `(label, pattern)` pairs.
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    patterns: Vec<(String, Regex)>,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a regular expression reported under `label`.
    pub fn with_pattern(mut self, label: impl Into<String>, pattern: &str) -> RedactorResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| RedactorError::Pattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.patterns.push((label.into(), regex));
        Ok(self)
    }

    /// Adds an exact string reported under `label`.
    pub fn with_literal(mut self, label: impl Into<String>, literal: &str) -> Self {
        // An escaped literal is always a valid pattern.
        if let Ok(regex) = Regex::new(&regex::escape(literal)) {
            self.patterns.push((label.into(), regex));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PiiDetector for PatternDetector {
    fn detect(&self, text: &str) -> anyhow::Result<Vec<DetectedSpan>> {
        let mut spans = Vec::new();
        for (label, regex) in &self.patterns {
            for m in regex.find_iter(text) {
                if m.start() == m.end() {
                    continue;
                }
                spans.push(DetectedSpan::labeled(
                    i64::try_from(m.start())?,
                    i64::try_from(m.end())?,
                    label.as_str(),
                ));
            }
        }
        Ok(spans)
    }

    fn name(&self) -> &str {
        "pattern"
    }

    fn offset_unit(&self) -> OffsetUnit {
        OffsetUnit::Bytes
    }
}
