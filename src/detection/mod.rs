//! Detection gateway and detector abstraction.
//!
//! The engine does not decide what is sensitive. A [`PiiDetector`] does, and
//! the [`DetectionGateway`] is the only code that calls it: it skips blank
//! paragraphs, enforces the deadline, and converts offsets into chars.

pub mod gateway;
pub mod pattern;
pub mod units;

pub use gateway::DetectionGateway;
pub use pattern::PatternDetector;
pub use units::{to_char_offsets, OffsetUnit};

use crate::domain::DetectedSpan;

/// External PII detector.
///
/// Implementations wrap a model, a remote service, or a rule engine. They
/// are called once per non-blank paragraph, possibly from several worker
/// threads at once.
pub trait PiiDetector: Send + Sync {
    /// Returns sensitive spans in `text`, in [`Self::offset_unit`] units.
    /// Spans may be unsorted, overlapping or out of bounds.
    fn detect(&self, text: &str) -> anyhow::Result<Vec<DetectedSpan>>;

    /// Returns a human-readable name for logs and errors.
    fn name(&self) -> &str;

    /// Unit the returned offsets are counted in.
    fn offset_unit(&self) -> OffsetUnit {
        OffsetUnit::CodePoints
    }
}
