//! Formatting normalization: canonical character formats and run merging.
//!
//! Raw font metadata is noisy (subset prefixes, style suffixes, vendor
//! variants), so families are resolved through a fixed alias table and sizes
//! are rounded. Adjacent runs with identical formatting are always merged so
//! any input produces a unique, minimal run list.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{CharFormat, FormattingRun, PositionedTextItem};

/// Canonical fallback family for unmapped fonts.
const FALLBACK_FAMILY: &str = "Arial";

/// Alias table from normalized name fragments to canonical families.
/// Checked in order; first containment match wins.
const FONT_ALIASES: &[(&str, &str)] = &[
    ("helvetica", "Arial"),
    ("arial", "Arial"),
    ("timesnewroman", "Times New Roman"),
    ("times", "Times New Roman"),
    ("couriernew", "Courier New"),
    ("courier", "Courier New"),
    ("georgia", "Georgia"),
    ("verdana", "Verdana"),
    ("garamond", "Garamond"),
    ("calibri", "Calibri"),
    ("cambria", "Cambria"),
    ("tahoma", "Tahoma"),
    ("trebuchet", "Trebuchet MS"),
    ("comicsans", "Comic Sans MS"),
    ("impact", "Impact"),
    ("symbol", "Symbol"),
];

fn subset_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Embedded-font subset prefixes look like "ABCDEF+Helvetica"
    RE.get_or_init(|| Regex::new(r"^[A-Z]{6}\+").unwrap())
}

fn style_noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)bold|italic|oblique|regular|light|medium|semi|demi|extra|black|heavy|thin|book|condensed|narrow|extended|[-_,.\s]",
        )
        .unwrap()
    })
}

/// Resolve a raw font name to a canonical family.
///
/// Strips subset prefixes, separators, and style keywords, then matches the
/// remainder case-insensitively against the alias table. Unknown names fall
/// back to "Arial".
pub fn normalize_font_family(raw: &str) -> String {
    let stripped = subset_prefix_re().replace(raw, "");
    let normalized = style_noise_re().replace_all(&stripped, "").to_lowercase();

    for (fragment, family) in FONT_ALIASES {
        if normalized.contains(fragment) {
            return (*family).to_string();
        }
    }
    FALLBACK_FAMILY.to_string()
}

/// Derive the canonical character format for one fragment.
pub fn char_format(item: &PositionedTextItem) -> CharFormat {
    CharFormat {
        font_family: normalize_font_family(&item.font_name),
        font_size: item.font_size.round().max(0.0) as u32,
        bold: item.bold.unwrap_or(false),
        italic: item.italic.unwrap_or(false),
        color: item
            .color
            .map(|c| c.to_hex())
            .unwrap_or_else(|| "#000000".to_string()),
    }
}

/// Accumulates text and formatting runs, merging adjacent identical runs.
///
/// Offsets count Unicode scalar values; the finished runs always tile
/// `[0, char_len)`.
#[derive(Debug, Default)]
pub struct RunBuilder {
    text: String,
    len: usize,
    runs: Vec<FormattingRun>,
}

impl RunBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current length in characters.
    pub fn char_len(&self) -> usize {
        self.len
    }

    /// Check if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append text with the given format, extending the previous run when
    /// the formatting is identical.
    pub fn push(&mut self, text: &str, format: CharFormat) {
        let chars = text.chars().count();
        if chars == 0 {
            return;
        }
        self.text.push_str(text);
        match self.runs.last_mut() {
            Some(last) if last.end == self.len && last.format == format => {
                last.end += chars;
            }
            _ => {
                self.runs
                    .push(FormattingRun::new(self.len, self.len + chars, format));
            }
        }
        self.len += chars;
    }

    /// Append text attributed to the previous run's format (separator and
    /// sentinel characters carry no formatting of their own).
    pub fn push_plain(&mut self, text: &str) {
        let format = self
            .runs
            .last()
            .map(|r| r.format.clone())
            .unwrap_or_default();
        self.push(text, format);
    }

    /// Consume the builder, yielding the text and its minimal run list.
    pub fn finish(self) -> (String, Vec<FormattingRun>) {
        (self.text, self.runs)
    }
}

/// Slice a string by character offsets `[start, end)`.
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i);
    let from = indices.clone().nth(start).unwrap_or(text.len());
    let to = if end > start {
        indices.nth(end - 1).map_or(text.len(), |i| {
            i + text[i..].chars().next().map_or(0, char::len_utf8)
        })
    } else {
        from
    };
    &text[from..to]
}
