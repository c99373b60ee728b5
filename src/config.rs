//! Engine configuration.
//!
//! Built in code with `with_*` setters, or from the environment:
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PII_REDACTOR_POLICY` | `substitute` or `blackout` | `substitute` |
//! | `PII_REDACTOR_GLYPH` | Substitution glyph (one char) | `█` |
//! | `PII_REDACTOR_MAX_CONCURRENT` | Detector calls in flight | 4 |
//! | `PII_REDACTOR_QUEUE_CAPACITY` | Pending paragraphs before back-pressure | 16 |
//! | `PII_REDACTOR_DETECT_TIMEOUT_MS` | Per-call deadline, 0 disables | 30000 |
//! | `PII_REDACTOR_ON_DETECTION_FAILURE` | `leave`, `redact` or `abort` | `leave` |
//! | `PII_REDACTOR_MIN_SCORE` | Drop spans scored below this | unset |

use crate::error::{RedactorError, RedactorResult};
use crate::redaction::policy::{PolicyKind, DEFAULT_GLYPH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// What to do with a paragraph whose detector call failed or timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail open: keep the paragraph as-is and record an issue.
    #[default]
    LeaveUnredacted,
    /// Fail closed: treat the whole paragraph as sensitive and record an issue.
    RedactParagraph,
    /// Fail the whole document before any run is mutated.
    Abort,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeaveUnredacted => f.write_str("leave"),
            Self::RedactParagraph => f.write_str("redact"),
            Self::Abort => f.write_str("abort"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leave" | "leave_unredacted" | "fail_open" => Ok(Self::LeaveUnredacted),
            "redact" | "redact_paragraph" | "fail_closed" => Ok(Self::RedactParagraph),
            "abort" => Ok(Self::Abort),
            other => Err(format!("unknown detection failure policy '{}'", other)),
        }
    }
}

/// Configuration for a redaction run.
#[derive(Debug, Clone, PartialEq)]
pub struct RedactionConfig {
    /// Policy applied to covered run ranges.
    pub policy: PolicyKind,
    /// Glyph used by character substitution.
    pub glyph: char,
    /// Maximum detector calls in flight.
    pub max_concurrent: usize,
    /// Paragraphs queued for detection before the producer blocks.
    pub queue_capacity: usize,
    /// Deadline for a single detector call.
    pub detect_timeout: Option<Duration>,
    /// Handling of failed detector calls.
    pub on_detection_failure: FailurePolicy,
    /// Spans with a score below this are ignored. Unscored spans always pass.
    pub min_score: Option<f32>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            glyph: DEFAULT_GLYPH,
            max_concurrent: 4,
            queue_capacity: 16,
            detect_timeout: Some(Duration::from_secs(30)),
            on_detection_failure: FailurePolicy::default(),
            min_score: None,
        }
    }
}

impl RedactionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(policy) = env_parse::<PolicyKind>("PII_REDACTOR_POLICY") {
            self.policy = policy;
        }
        if let Ok(v) = std::env::var("PII_REDACTOR_GLYPH") {
            let mut chars = v.chars();
            if let (Some(glyph), None) = (chars.next(), chars.next()) {
                self.glyph = glyph;
            }
        }
        if let Some(max) = env_parse::<usize>("PII_REDACTOR_MAX_CONCURRENT") {
            self.max_concurrent = max.max(1);
        }
        if let Some(capacity) = env_parse::<usize>("PII_REDACTOR_QUEUE_CAPACITY") {
            self.queue_capacity = capacity.max(1);
        }
        if let Some(ms) = env_parse::<u64>("PII_REDACTOR_DETECT_TIMEOUT_MS") {
            self.detect_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(policy) = env_parse::<FailurePolicy>("PII_REDACTOR_ON_DETECTION_FAILURE") {
            self.on_detection_failure = policy;
        }
        if let Some(score) = env_parse::<f32>("PII_REDACTOR_MIN_SCORE") {
            self.min_score = Some(score);
        }
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_detect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.detect_timeout = timeout;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_detection_failure = policy;
        self
    }

    pub fn with_min_score(mut self, score: f32) -> Self {
        self.min_score = Some(score);
        self
    }

    /// Checks that the configuration can drive a redaction run.
    pub fn validate(&self) -> RedactorResult<()> {
        if self.max_concurrent == 0 {
            return Err(invalid("max_concurrent", "must be at least 1"));
        }
        if self.queue_capacity == 0 {
            return Err(invalid("queue_capacity", "must be at least 1"));
        }
        if self.detect_timeout == Some(Duration::ZERO) {
            return Err(invalid(
                "detect_timeout",
                "must be positive; use None to disable the deadline",
            ));
        }
        if self.glyph.is_whitespace() || self.glyph.is_control() {
            return Err(invalid("glyph", "must be a visible character"));
        }
        if let Some(score) = self.min_score {
            if !(0.0..=1.0).contains(&score) {
                return Err(invalid("min_score", "must be within 0.0..=1.0"));
            }
        }
        Ok(())
    }
}

fn invalid(parameter: &str, reason: &str) -> RedactorError {
    RedactorError::InvalidConfig {
        parameter: parameter.to_string(),
        reason: reason.to_string(),
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.trim().parse().ok()
}
