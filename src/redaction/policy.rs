//! Redaction policies: how an overlapping char range of a run is altered.

use crate::domain::{Highlight, Rgb, Run};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default glyph written over redacted characters.
pub const DEFAULT_GLYPH: char = '█';

/// Strategy applied to the part of a run that a span covers.
///
/// Implementations must never change the number of chars in a run, so that
/// later spans over the same run keep valid local offsets.
pub trait RedactionPolicy: Send + Sync {
    /// Alters chars `[start, end)` of `run` (run-local char offsets) and
    /// returns how many chars were covered.
    fn apply(&self, run: &mut Run, start: usize, end: usize) -> usize;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;

    /// Returns whether covered characters are still present in the output.
    fn preserves_text(&self) -> bool;
}

/// Replaces every covered char with a fixed glyph. Formatting is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSubstitution {
    glyph: char,
}

impl CharacterSubstitution {
    pub fn new(glyph: char) -> Self {
        Self { glyph }
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }
}

impl Default for CharacterSubstitution {
    fn default() -> Self {
        Self::new(DEFAULT_GLYPH)
    }
}

impl RedactionPolicy for CharacterSubstitution {
    fn apply(&self, run: &mut Run, start: usize, end: usize) -> usize {
        if run.is_object() || start >= end {
            return 0;
        }

        let mut covered = 0;
        let replaced: String = run
            .as_str()
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                if (start..end).contains(&i) {
                    covered += 1;
                    self.glyph
                } else {
                    ch
                }
            })
            .collect();
        run.set_text(replaced);
        covered
    }

    fn name(&self) -> &str {
        "CharacterSubstitution"
    }

    fn preserves_text(&self) -> bool {
        false
    }
}

/// Forces the whole run to a blacked-out appearance; text is kept.
///
/// Coarser than substitution: a run only partly covered by a span is blacked
/// out in full, hiding its non-sensitive remainder as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatBlackout {
    color: Rgb,
    highlight: Highlight,
}

impl FormatBlackout {
    pub fn new(color: Rgb, highlight: Highlight) -> Self {
        Self { color, highlight }
    }
}

impl Default for FormatBlackout {
    fn default() -> Self {
        Self::new(Rgb::BLACK, Highlight::Black)
    }
}

impl RedactionPolicy for FormatBlackout {
    fn apply(&self, run: &mut Run, start: usize, end: usize) -> usize {
        if run.is_object() || start >= end {
            return 0;
        }
        run.format.color = Some(self.color);
        run.format.highlight = Some(self.highlight);
        end.min(run.char_len()).saturating_sub(start)
    }

    fn name(&self) -> &str {
        "FormatBlackout"
    }

    fn preserves_text(&self) -> bool {
        true
    }
}

/// Configurable choice of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    CharacterSubstitution,
    FormatBlackout,
}

impl PolicyKind {
    /// Builds the policy value this kind names.
    pub fn build(self, glyph: char) -> Box<dyn RedactionPolicy> {
        match self {
            Self::CharacterSubstitution => Box::new(CharacterSubstitution::new(glyph)),
            Self::FormatBlackout => Box::new(FormatBlackout::default()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CharacterSubstitution => f.write_str("substitute"),
            Self::FormatBlackout => f.write_str("blackout"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substitute" | "substitution" | "character_substitution" => {
                Ok(Self::CharacterSubstitution)
            }
            "blackout" | "format_blackout" => Ok(Self::FormatBlackout),
            other => Err(format!("unknown redaction policy '{}'", other)),
        }
    }
}
