//! Custom assertions for redaction testing.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use pii_redactor::{Paragraph, ParagraphContainer, Span};

/// Paragraph texts in traversal order.
pub fn paragraph_texts<C: ParagraphContainer>(doc: &mut C) -> Vec<String> {
    let mut texts = Vec::new();
    doc.for_each_paragraph(|_, para| texts.push(para.text()));
    texts
}

/// Run count of every paragraph in traversal order.
pub fn run_counts<C: ParagraphContainer>(doc: &mut C) -> Vec<usize> {
    let mut counts = Vec::new();
    doc.for_each_paragraph(|_, para| counts.push(para.runs.len()));
    counts
}

/// Asserts that two documents have the same paragraphs and the same number
/// of runs in each.
///
/// # Panics
/// Panics if a paragraph or run was added or removed.
pub fn assert_same_structure<C: ParagraphContainer>(before: &mut C, after: &mut C) {
    assert_eq!(
        run_counts(before),
        run_counts(after),
        "Redaction must not add or remove paragraphs or runs"
    );
}

/// Asserts that every char inside `spans` is `glyph` and every char outside
/// is unchanged.
///
/// # Panics
/// Panics on the first char that breaks either rule.
pub fn assert_redacted_exactly(original: &str, redacted: &str, spans: &[Span], glyph: char) {
    let before: Vec<char> = original.chars().collect();
    let after: Vec<char> = redacted.chars().collect();
    assert_eq!(
        before.len(),
        after.len(),
        "Substitution must preserve length: '{}' vs '{}'",
        original,
        redacted
    );

    for (i, (b, a)) in before.iter().zip(&after).enumerate() {
        let covered = spans.iter().any(|s| s.start <= i && i < s.end);
        if covered {
            assert_eq!(*a, glyph, "char {} should be redacted in '{}'", i, redacted);
        } else {
            assert_eq!(a, b, "char {} should be untouched in '{}'", i, redacted);
        }
    }
}

/// Asserts that a paragraph's runs read `expected` in order.
///
/// # Panics
/// Panics if any run text differs.
pub fn assert_runs(paragraph: &Paragraph, expected: &[&str]) {
    let actual: Vec<&str> = paragraph.runs.iter().map(|r| r.as_str()).collect();
    assert_eq!(actual, expected, "Unexpected run texts");
}
