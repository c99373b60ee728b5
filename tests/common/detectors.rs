//! Scripted detectors for deterministic tests.

use pii_redactor::{DetectedSpan, OffsetUnit, PiiDetector};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// Detector whose answers are keyed by exact paragraph text.
///
/// Unknown texts yield no spans. Every call is counted, and the peak number
/// of concurrent calls is tracked.
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    spans: HashMap<String, Vec<DetectedSpan>>,
    failing: HashSet<String>,
    slow: HashMap<String, Duration>,
    delay: Option<Duration>,
    unit: OffsetUnit,
    calls: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `text` with `spans`.
    pub fn with_spans(mut self, text: &str, spans: Vec<DetectedSpan>) -> Self {
        self.spans.insert(text.to_string(), spans);
        self
    }

    /// Answers `text` with one unlabeled span per `(start, end)`.
    pub fn with_ranges(self, text: &str, ranges: &[(i64, i64)]) -> Self {
        let spans = ranges.iter().map(|&(s, e)| DetectedSpan::new(s, e)).collect();
        self.with_spans(text, spans)
    }

    /// Fails every call for `text`.
    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }

    /// Sleeps for `delay` before answering `text`.
    pub fn slow_on(mut self, text: &str, delay: Duration) -> Self {
        self.slow.insert(text.to_string(), delay);
        self
    }

    /// Sleeps for `delay` on every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_unit(mut self, unit: OffsetUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Texts the detector was called with, in call order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl PiiDetector for ScriptedDetector {
    fn detect(&self, text: &str) -> anyhow::Result<Vec<DetectedSpan>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());

        if let Some(delay) = self.slow.get(text).copied().or(self.delay) {
            thread::sleep(delay);
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(text) {
            anyhow::bail!("analyzer rejected paragraph");
        }
        Ok(self.spans.get(text).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn offset_unit(&self) -> OffsetUnit {
        self.unit
    }
}

/// Flags every occurrence of each needle, reporting offsets in chars.
#[derive(Debug, Clone)]
pub struct NeedleDetector {
    needles: Vec<String>,
}

impl NeedleDetector {
    pub fn new(needles: &[&str]) -> Self {
        Self {
            needles: needles.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl PiiDetector for NeedleDetector {
    fn detect(&self, text: &str) -> anyhow::Result<Vec<DetectedSpan>> {
        let mut spans = Vec::new();
        for needle in &self.needles {
            for (byte_idx, _) in text.match_indices(needle.as_str()) {
                let start = text[..byte_idx].chars().count() as i64;
                let end = start + needle.chars().count() as i64;
                spans.push(DetectedSpan::labeled(start, end, "NEEDLE"));
            }
        }
        Ok(spans)
    }

    fn name(&self) -> &str {
        "needle"
    }
}
