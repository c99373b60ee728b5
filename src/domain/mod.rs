//! Domain model: documents, paragraph text assembly and spans.
//!
//! Nothing in this module talks to a detector or mutates runs. It holds the
//! object model the engine operates on and the pure per-paragraph
//! computations that feed the run redactor.

pub mod assembler;
pub mod document;
pub mod location;
pub mod span;

pub use assembler::{assemble_paragraph, assemble_runs, ParagraphText, RunOffsetEntry};
pub use document::{
    Cell, Highlight, Paragraph, Presentation, Rgb, Row, Run, RunContent, RunFormat, Shape, Slide,
    Table, TextFrame, WordDocument,
};
pub use location::{CellCoord, ParagraphLocation};
pub use span::{normalize_spans, DetectedSpan, NormalizedSpans, Span};
