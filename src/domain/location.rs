//! Paragraph addresses used in logs, errors and audit records.
//!
//! A location identifies a paragraph by position only. It never carries
//! paragraph text, so it is safe to log and to return to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step into a table: which table among its siblings, then row and cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub table: usize,
    pub row: usize,
    pub cell: usize,
}

/// Where a paragraph lives inside its document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "container", rename_all = "snake_case")]
pub enum ParagraphLocation {
    /// Top-level paragraph of a word-processing body.
    Body { paragraph: usize },
    /// Paragraph in a table cell. `path` runs from the outermost table inward.
    TableCell {
        path: Vec<CellCoord>,
        paragraph: usize,
    },
    /// Paragraph in a slide shape. `shape_path` descends through group shapes.
    Slide {
        slide: usize,
        shape_path: Vec<usize>,
        paragraph: usize,
    },
}

impl ParagraphLocation {
    /// Index of the paragraph within its immediate container.
    pub fn paragraph_index(&self) -> usize {
        match self {
            Self::Body { paragraph }
            | Self::TableCell { paragraph, .. }
            | Self::Slide { paragraph, .. } => *paragraph,
        }
    }
}

impl fmt::Display for ParagraphLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body { paragraph } => write!(f, "P{}", paragraph),
            Self::TableCell { path, paragraph } => {
                for coord in path {
                    write!(f, "T{}R{}C{}/", coord.table, coord.row, coord.cell)?;
                }
                write!(f, "P{}", paragraph)
            }
            Self::Slide {
                slide,
                shape_path,
                paragraph,
            } => {
                write!(f, "S{}/Sh", slide)?;
                for (i, shape) in shape_path.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{}", shape)?;
                }
                write!(f, "/P{}", paragraph)
            }
        }
    }
}
