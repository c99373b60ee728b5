//! Document traversal adapters.
//!
//! Each adapter enumerates every paragraph of one document shape in a fixed,
//! repeatable order. The redaction service relies on that order: it walks a
//! document once to collect paragraph texts and again to write results back.

pub mod slides;
pub mod word;

use crate::domain::{Paragraph, ParagraphLocation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Family of container format a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    WordProcessing,
    Slides,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WordProcessing => f.write_str("word-processing"),
            Self::Slides => f.write_str("slides"),
        }
    }
}

/// A document whose paragraphs can be visited mutably.
pub trait ParagraphContainer {
    fn kind(&self) -> DocumentKind;

    /// Calls `f` once per paragraph, always in the same order for an
    /// unchanged document.
    fn for_each_paragraph<F>(&mut self, f: F)
    where
        F: FnMut(ParagraphLocation, &mut Paragraph);

    fn paragraph_count(&mut self) -> usize {
        let mut count = 0;
        self.for_each_paragraph(|_, _| count += 1);
        count
    }
}
