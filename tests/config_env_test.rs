//! Environment configuration tests.
//!
//! Kept in their own test binary, and in a single test, because environment
//! variables are process-global.

use pii_redactor::{FailurePolicy, PolicyKind, RedactionConfig};
use std::time::Duration;

const VARS: [&str; 7] = [
    "PII_REDACTOR_POLICY",
    "PII_REDACTOR_GLYPH",
    "PII_REDACTOR_MAX_CONCURRENT",
    "PII_REDACTOR_QUEUE_CAPACITY",
    "PII_REDACTOR_DETECT_TIMEOUT_MS",
    "PII_REDACTOR_ON_DETECTION_FAILURE",
    "PII_REDACTOR_MIN_SCORE",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_env_overrides() {
    clear_env();
    assert_eq!(RedactionConfig::from_env(), RedactionConfig::default());

    std::env::set_var("PII_REDACTOR_POLICY", "blackout");
    std::env::set_var("PII_REDACTOR_GLYPH", "X");
    std::env::set_var("PII_REDACTOR_MAX_CONCURRENT", "8");
    std::env::set_var("PII_REDACTOR_QUEUE_CAPACITY", "32");
    std::env::set_var("PII_REDACTOR_DETECT_TIMEOUT_MS", "1500");
    std::env::set_var("PII_REDACTOR_ON_DETECTION_FAILURE", "fail_closed");
    std::env::set_var("PII_REDACTOR_MIN_SCORE", "0.6");

    let config = RedactionConfig::from_env();
    assert_eq!(config.policy, PolicyKind::FormatBlackout);
    assert_eq!(config.glyph, 'X');
    assert_eq!(config.max_concurrent, 8);
    assert_eq!(config.queue_capacity, 32);
    assert_eq!(config.detect_timeout, Some(Duration::from_millis(1500)));
    assert_eq!(config.on_detection_failure, FailurePolicy::RedactParagraph);
    assert_eq!(config.min_score, Some(0.6));
    assert!(config.validate().is_ok());

    // Zero disables the deadline. Unparseable values and multi-char glyphs are ignored.
    std::env::set_var("PII_REDACTOR_DETECT_TIMEOUT_MS", "0");
    std::env::set_var("PII_REDACTOR_GLYPH", "XX");
    std::env::set_var("PII_REDACTOR_MIN_SCORE", "high");
    std::env::set_var("PII_REDACTOR_MAX_CONCURRENT", "0");

    let config = RedactionConfig::new()
        .with_glyph('*')
        .with_env_overrides();
    assert_eq!(config.detect_timeout, None);
    assert_eq!(config.glyph, '*');
    assert_eq!(config.min_score, None);
    assert_eq!(config.max_concurrent, 1);

    clear_env();
}
