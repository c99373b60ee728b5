//! Bounded worker pool for detector calls.
//!
//! Detector calls are the only blocking step of a redaction run. Paragraph
//! texts are fed through a bounded queue to a fixed number of scoped worker
//! threads, and the producer blocks once `queue_capacity` paragraphs are
//! waiting. A call that outlives its deadline still counts against the
//! gateway's in-flight limit, so timeouts cannot grow the number of running
//! detector calls past it.

use crate::detection::DetectionGateway;
use crate::domain::DetectedSpan;
use crate::error::{DetectionError, RedactorError, RedactorResult};
use std::thread;

/// Result of one gateway call. `Ok(None)` means the paragraph was blank.
pub type DetectionOutcome = Result<Option<Vec<DetectedSpan>>, DetectionError>;

/// One paragraph queued for detection.
#[derive(Debug, Clone, Copy)]
pub struct DetectionJob<'a> {
    /// Position of the paragraph in traversal order.
    pub slot: usize,
    pub text: &'a str,
}

/// Runs every job through `gateway` and returns outcomes indexed by slot.
///
/// `slots` is the length of the returned vector; slots with no job stay `None`.
pub fn detect_all(
    gateway: &DetectionGateway,
    jobs: Vec<DetectionJob<'_>>,
    slots: usize,
    workers: usize,
    queue_capacity: usize,
) -> RedactorResult<Vec<Option<DetectionOutcome>>> {
    let mut outcomes: Vec<Option<DetectionOutcome>> = (0..slots).map(|_| None).collect();
    if jobs.is_empty() {
        return Ok(outcomes);
    }

    let expected = jobs.len();
    let workers = workers.clamp(1, expected);

    let received = thread::scope(|scope| -> RedactorResult<Vec<(usize, DetectionOutcome)>> {
        let (job_tx, job_rx) =
            crossbeam_channel::bounded::<DetectionJob<'_>>(queue_capacity.max(1));
        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        for id in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            thread::Builder::new()
                .name(format!("pii-detect-{}", id))
                .spawn_scoped(scope, move || {
                    for job in job_rx.iter() {
                        let outcome = gateway.detect(job.text);
                        if result_tx.send((job.slot, outcome)).is_err() {
                            break;
                        }
                    }
                })
                .map_err(|e| RedactorError::WorkerPool {
                    reason: format!("failed to spawn detection worker {}: {}", id, e),
                })?;
        }
        drop(job_rx);
        drop(result_tx);

        tracing::debug!(workers, jobs = expected, "detection pool started");

        for job in jobs {
            if job_tx.send(job).is_err() {
                return Err(RedactorError::WorkerPool {
                    reason: "all detection workers exited early".to_string(),
                });
            }
        }
        drop(job_tx);

        Ok(result_rx.iter().collect())
    })?;

    if received.len() != expected {
        return Err(RedactorError::WorkerPool {
            reason: format!("expected {} detection results, got {}", expected, received.len()),
        });
    }

    for (slot, outcome) in received {
        if let Some(entry) = outcomes.get_mut(slot) {
            *entry = Some(outcome);
        }
    }
    Ok(outcomes)
}
