//! Single call site for the external detector.

use super::units::to_char_offsets;
use super::PiiDetector;
use crate::domain::DetectedSpan;
use crate::error::DetectionError;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

type CallOutcome = thread::Result<anyhow::Result<Vec<DetectedSpan>>>;

/// Counting permits for detector calls in flight, kept as tokens in a
/// bounded channel.
#[derive(Clone)]
struct Permits {
    tx: Sender<()>,
    rx: Receiver<()>,
    limit: usize,
}

impl Permits {
    fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        let (tx, rx) = crossbeam_channel::bounded(limit);
        for _ in 0..limit {
            let _ = tx.send(());
        }
        Self { tx, rx, limit }
    }

    /// Blocks until a call slot is free.
    fn acquire(&self) -> Permit {
        // Both channel ends live in `self`, so this cannot disconnect.
        let _ = self.rx.recv();
        Permit {
            tx: self.tx.clone(),
        }
    }
}

/// Returns its slot when dropped.
struct Permit {
    tx: Sender<()>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        let _ = self.tx.try_send(());
    }
}

/// Wraps a detector with the engine's calling conventions.
#[derive(Clone)]
pub struct DetectionGateway {
    detector: Arc<dyn PiiDetector>,
    timeout: Option<Duration>,
    permits: Option<Permits>,
}

impl DetectionGateway {
    /// Creates a gateway without a deadline or call limit.
    pub fn new(detector: Arc<dyn PiiDetector>) -> Self {
        Self {
            detector,
            timeout: None,
            permits: None,
        }
    }

    /// Sets the per-call deadline. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps detector calls in flight across all clones of this gateway.
    ///
    /// A call abandoned at its deadline keeps its slot until the detector
    /// actually returns, so callers block rather than pile up more calls.
    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.permits = Some(Permits::new(limit));
        self
    }

    /// Call limit, if one is set.
    pub fn max_in_flight(&self) -> Option<usize> {
        self.permits.as_ref().map(|p| p.limit)
    }

    pub fn detector_name(&self) -> &str {
        self.detector.name()
    }

    /// Detects spans in one paragraph, returned in char offsets.
    ///
    /// Returns `Ok(None)` without calling the detector when `text` is empty
    /// or whitespace-only.
    pub fn detect(&self, text: &str) -> Result<Option<Vec<DetectedSpan>>, DetectionError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        // The deadline starts once a slot is held.
        let permit = self.permits.as_ref().map(Permits::acquire);
        let raw = match self.timeout {
            Some(timeout) => self.call_with_deadline(text, timeout, permit)?,
            None => {
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| self.detector.detect(text)));
                drop(permit);
                self.settle(outcome)?
            }
        };

        Ok(Some(to_char_offsets(text, self.detector.offset_unit(), raw)))
    }

    /// Runs the call on a helper thread and stops waiting at the deadline.
    /// A late answer is discarded when the helper finishes; the helper holds
    /// `permit` until then.
    fn call_with_deadline(
        &self,
        text: &str,
        timeout: Duration,
        permit: Option<Permit>,
    ) -> Result<Vec<DetectedSpan>, DetectionError> {
        let (tx, rx) = crossbeam_channel::bounded::<CallOutcome>(1);
        let detector = Arc::clone(&self.detector);
        let owned = text.to_owned();

        thread::Builder::new()
            .name("pii-detect-call".to_string())
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| detector.detect(&owned)));
                drop(permit);
                // The receiver is gone if the deadline already passed.
                let _ = tx.send(outcome);
            })
            .map_err(|e| DetectionError::Backend {
                detector: self.detector_name().to_string(),
                source: anyhow::Error::new(e).context("failed to spawn detector call thread"),
            })?;

        match rx.recv_timeout(timeout) {
            Ok(outcome) => self.settle(outcome),
            Err(RecvTimeoutError::Timeout) => Err(DetectionError::Timeout {
                detector: self.detector_name().to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
            Err(RecvTimeoutError::Disconnected) => Err(DetectionError::Panicked {
                detector: self.detector_name().to_string(),
            }),
        }
    }

    fn settle(&self, outcome: CallOutcome) -> Result<Vec<DetectedSpan>, DetectionError> {
        match outcome {
            Ok(Ok(spans)) => Ok(spans),
            Ok(Err(source)) => Err(DetectionError::Backend {
                detector: self.detector_name().to_string(),
                source,
            }),
            Err(_) => Err(DetectionError::Panicked {
                detector: self.detector_name().to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for DetectionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionGateway")
            .field("detector", &self.detector.name())
            .field("timeout", &self.timeout)
            .field("max_in_flight", &self.max_in_flight())
            .finish()
    }
}
