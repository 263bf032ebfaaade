//! Paragraph and character-formatting types.

use serde::{Deserialize, Serialize};

/// Canonical character formatting for a run of text.
///
/// Produced by the formatting normalizer from raw font metadata; two runs
/// with equal `CharFormat` values are always merged into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharFormat {
    /// Canonical font family (alias-resolved, e.g. "Arial")
    pub font_family: String,

    /// Rounded font size in points
    pub font_size: u32,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Text color as a 6-hex-digit string (e.g., "#000000")
    pub color: String,
}

impl Default for CharFormat {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 12,
            bold: false,
            italic: false,
            color: "#000000".to_string(),
        }
    }
}

/// A half-open character range `[start, end)` with uniform formatting.
///
/// Offsets count Unicode scalar values. Within one paragraph (and within the
/// assembled content stream) runs are contiguous, non-overlapping, and cover
/// the full text length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingRun {
    /// Start offset (inclusive)
    pub start: usize,

    /// End offset (exclusive)
    pub end: usize,

    /// Character formatting for the range
    pub format: CharFormat,
}

impl FormattingRun {
    /// Create a new run.
    pub fn new(start: usize, end: usize, format: CharFormat) -> Self {
        Self { start, end, format }
    }

    /// Length of the run in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the run covers no characters.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Paragraph alignment inferred from line geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// A paragraph inferred from one or more clustered lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedParagraph {
    /// Concatenated paragraph text
    pub text: String,

    /// Formatting runs covering `text` exactly
    pub runs: Vec<FormattingRun>,

    /// Inferred alignment
    pub alignment: Alignment,

    /// Page number (1-based)
    pub page: u32,

    /// Top Y coordinate on the page
    pub y: f32,

    /// Whether the paragraph ends with a paragraph break
    pub trailing_break: bool,
}

impl AnalyzedParagraph {
    /// Length of the paragraph text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check that the runs tile `[0, char_len)` without gaps or overlaps.
    pub fn runs_cover_text(&self) -> bool {
        let mut expected = 0usize;
        for run in &self.runs {
            if run.start != expected || run.end < run.start {
                return false;
            }
            expected = run.end;
        }
        expected == self.char_len()
    }
}
