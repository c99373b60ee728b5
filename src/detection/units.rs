//! Offset unit conversion.
//!
//! Detectors count offsets in whatever unit their runtime uses. The engine
//! counts chars. This is the one place the two are reconciled.

use crate::domain::DetectedSpan;
use serde::{Deserialize, Serialize};

/// Unit a detector uses for its span offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetUnit {
    /// Unicode scalar values (Rust `char`). No conversion needed.
    #[default]
    CodePoints,
    /// UTF-16 code units (JavaScript, Java, .NET, Office APIs).
    Utf16,
    /// UTF-8 bytes (Rust `str` indices, most regex engines).
    Bytes,
}

/// Converts detector offsets in `unit` into char offsets over `text`.
///
/// A start that lands inside a multi-unit character rounds down and an end
/// rounds up, so a partially flagged character is covered whole. Negative
/// offsets pass through untouched and offsets past the end map to the char
/// length; normalization deals with both.
pub fn to_char_offsets(text: &str, unit: OffsetUnit, spans: Vec<DetectedSpan>) -> Vec<DetectedSpan> {
    if unit == OffsetUnit::CodePoints {
        return spans;
    }

    let boundaries = unit_boundaries(text, unit);
    spans
        .into_iter()
        .map(|span| DetectedSpan {
            start: map_offset(&boundaries, span.start, Rounding::Down),
            end: map_offset(&boundaries, span.end, Rounding::Up),
            ..span
        })
        .collect()
}

#[derive(Clone, Copy)]
enum Rounding {
    Down,
    Up,
}

/// `boundaries[i]` is the unit offset where char `i` starts; the final entry
/// is the total length in units.
fn unit_boundaries(text: &str, unit: OffsetUnit) -> Vec<usize> {
    let mut boundaries = Vec::with_capacity(text.len() + 1);
    let mut cursor = 0;
    for ch in text.chars() {
        boundaries.push(cursor);
        cursor += match unit {
            OffsetUnit::CodePoints => 1,
            OffsetUnit::Utf16 => ch.len_utf16(),
            OffsetUnit::Bytes => ch.len_utf8(),
        };
    }
    boundaries.push(cursor);
    boundaries
}

fn map_offset(boundaries: &[usize], offset: i64, rounding: Rounding) -> i64 {
    let Ok(offset) = usize::try_from(offset) else {
        return offset;
    };
    let char_len = boundaries.len() - 1;
    if offset >= boundaries[char_len] {
        return char_len as i64;
    }

    let index = match rounding {
        Rounding::Down => boundaries.partition_point(|&b| b <= offset) - 1,
        Rounding::Up => boundaries.partition_point(|&b| b < offset),
    };
    index as i64
}
