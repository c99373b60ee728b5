//! Span-to-run redaction.
//!
//! Walks runs and spans together with two monotonic cursors. Spans must be
//! sorted and disjoint (see [`normalize_spans`](crate::domain::normalize_spans)),
//! which keeps the walk linear in `runs + spans`.

use super::policy::RedactionPolicy;
use crate::domain::{Run, RunOffsetEntry, Span};
use crate::error::StructuralError;

/// What one paragraph pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunRedaction {
    /// Chars covered by spans, summed over all runs.
    pub chars_redacted: usize,
    /// Distinct runs the policy was applied to.
    pub runs_touched: usize,
}

/// Applies `policy` to every run sub-range covered by `spans`.
///
/// A span crossing run boundaries is split so each run only receives its own
/// overlapping range. Runs are never added, removed or reordered.
pub fn redact_runs(
    runs: &mut [Run],
    offsets: &[RunOffsetEntry],
    spans: &[Span],
    policy: &dyn RedactionPolicy,
) -> Result<RunRedaction, StructuralError> {
    if runs.len() != offsets.len() {
        return Err(StructuralError::RunCountMismatch {
            runs: runs.len(),
            offsets: offsets.len(),
        });
    }

    let mut result = RunRedaction::default();
    let mut span_idx = 0;

    for (run, entry) in runs.iter_mut().zip(offsets) {
        if span_idx >= spans.len() {
            break;
        }
        if entry.is_empty() {
            continue;
        }

        let (run_start, run_end) = (entry.run_start, entry.run_end);
        let mut touched = false;

        while span_idx < spans.len() && spans[span_idx].start < run_end {
            let span = &spans[span_idx];
            let overlap_start = run_start.max(span.start);
            let overlap_end = run_end.min(span.end);

            if overlap_start < overlap_end {
                result.chars_redacted +=
                    policy.apply(run, overlap_start - run_start, overlap_end - run_start);
                touched = true;
            }

            if span.end <= run_end {
                span_idx += 1;
            } else {
                // Span continues into the next run.
                break;
            }
        }

        if touched {
            result.runs_touched += 1;
        }
    }

    Ok(result)
}
