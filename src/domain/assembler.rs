//! Paragraph text assembly.
//!
//! Concatenates run texts into the logical paragraph string the detector
//! sees, and records where each run sits inside it. Offsets are in chars.

use super::document::{Paragraph, Run};
use crate::error::StructuralError;

/// Position of one run inside the assembled paragraph text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOffsetEntry {
    pub run_index: usize,
    pub run_start: usize,
    pub run_end: usize,
}

impl RunOffsetEntry {
    pub fn len(&self) -> usize {
        self.run_end - self.run_start
    }

    pub fn is_empty(&self) -> bool {
        self.run_start == self.run_end
    }
}

/// Assembled paragraph text plus its run offset table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphText {
    pub text: String,
    pub offsets: Vec<RunOffsetEntry>,
    pub char_len: usize,
}

impl ParagraphText {
    /// True if there is nothing a detector could flag.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Builds the offset table for `runs`. Every run gets an entry, including
/// empty runs and embedded objects, so entry `i` always describes run `i`.
pub fn assemble_runs(runs: &[Run]) -> ParagraphText {
    let mut text = String::new();
    let mut offsets = Vec::with_capacity(runs.len());
    let mut cursor = 0;

    for (run_index, run) in runs.iter().enumerate() {
        let run_text = run.as_str();
        let len = run_text.chars().count();
        text.push_str(run_text);
        offsets.push(RunOffsetEntry {
            run_index,
            run_start: cursor,
            run_end: cursor + len,
        });
        cursor += len;
    }

    ParagraphText {
        text,
        offsets,
        char_len: cursor,
    }
}

/// Assembles a paragraph and checks it against what the parser reported.
pub fn assemble_paragraph(paragraph: &Paragraph) -> Result<ParagraphText, StructuralError> {
    let assembled = assemble_runs(&paragraph.runs);

    if let Some(reported) = &paragraph.reported_text {
        if *reported != assembled.text {
            return Err(StructuralError::TextMismatch {
                reported: reported.chars().count(),
                assembled: assembled.char_len,
            });
        }
    }

    verify_offsets(&assembled, paragraph.runs.len())?;
    Ok(assembled)
}

/// Checks that the offset table tiles `[0, char_len)` with one entry per run.
pub fn verify_offsets(assembled: &ParagraphText, run_count: usize) -> Result<(), StructuralError> {
    if assembled.offsets.len() != run_count {
        return Err(StructuralError::RunCountMismatch {
            runs: run_count,
            offsets: assembled.offsets.len(),
        });
    }

    let mut expected_start = 0;
    for entry in &assembled.offsets {
        if entry.run_start != expected_start || entry.run_end < entry.run_start {
            return Err(StructuralError::OffsetGap {
                covered: expected_start,
                expected: assembled.char_len,
            });
        }
        expected_start = entry.run_end;
    }

    if expected_start != assembled.char_len {
        return Err(StructuralError::OffsetGap {
            covered: expected_start,
            expected: assembled.char_len,
        });
    }
    Ok(())
}
