//! Assembled document output: the content stream, its side tables, and
//! document-wide settings.

use serde::{Deserialize, Serialize};

use super::{Alignment, AnalyzedCell, DocumentMetadata, FormattingRun, ImagePlacement};

/// Reserved placeholder code point standing in for an embedded object.
pub const OBJECT_PLACEHOLDER: char = '\u{FFFC}';

/// Reserved page-break marker code point.
pub const PAGE_BREAK: char = '\u{000C}';

/// The single offset-addressed text buffer plus its side tables.
///
/// Every offset referenced by a side table lies within `text`; formatting
/// runs tile the buffer exactly, and the buffer contains one
/// [`OBJECT_PLACEHOLDER`] per entry in `objects`, in the same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStream {
    /// The reconstructed document body
    pub text: String,

    /// Character-level formatting runs covering the whole buffer
    pub runs: Vec<FormattingRun>,

    /// Paragraph-formatting entries keyed by paragraph start offset
    pub paragraphs: Vec<ParagraphEntry>,

    /// Embedded-object references keyed by insertion offset
    pub objects: Vec<EmbeddedObjectRef>,

    /// Substitution-field table reserved by the host model (always empty here)
    pub fields: Vec<FieldRef>,

    /// Repeating-section table reserved by the host model (always empty here)
    pub sections: Vec<SectionRef>,

    /// Hyperlink table reserved by the host model (always empty here)
    pub hyperlinks: Vec<HyperlinkRef>,
}

impl ContentStream {
    /// Length of the text buffer in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of object placeholders present in the buffer.
    pub fn placeholder_count(&self) -> usize {
        self.text.chars().filter(|&c| c == OBJECT_PLACEHOLDER).count()
    }

    /// Number of page-break markers present in the buffer.
    pub fn page_break_count(&self) -> usize {
        self.text.chars().filter(|&c| c == PAGE_BREAK).count()
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

/// Paragraph properties recorded at the paragraph's start offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphEntry {
    /// Buffer offset of the paragraph's first character
    pub offset: usize,

    /// Paragraph alignment
    pub alignment: Alignment,
}

/// An embedded-object reference recorded at its placeholder's offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedObjectRef {
    /// Buffer offset of the placeholder code point
    pub offset: usize,

    /// Generated identifier (`imported-image-3`, `imported-table-7`, ...)
    pub id: String,

    /// The referenced object
    pub object: EmbeddedObject,
}

/// Payload of an embedded-object reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmbeddedObject {
    /// An embedded raster image
    Image {
        /// Block or inline placement
        placement: ImagePlacement,
        /// Width in pixels
        width: f32,
        /// Height in pixels
        height: f32,
        /// Data-encoded payload
        data: String,
        /// MIME type
        mime_type: String,
    },

    /// An inferred table
    Table {
        /// Aggregate width (sum of column widths)
        width: f32,
        /// Aggregate height (row count x fixed row height)
        height: f32,
        /// Column widths in source units
        column_widths: Vec<f32>,
        /// Per-cell content, row-major
        rows: Vec<Vec<AnalyzedCell>>,
    },
}

/// Substitution-field reference (reserved; never produced by this pipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Buffer offset of the field placeholder
    pub offset: usize,
    /// Field name
    pub name: String,
}

/// Repeating-section reference (reserved; never produced by this pipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRef {
    /// Buffer offset where the section starts
    pub offset: usize,
    /// Section identifier
    pub id: String,
}

/// Hyperlink reference (reserved; never produced by this pipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperlinkRef {
    /// Buffer offset where the link starts
    pub offset: usize,
    /// Link target
    pub url: String,
}

/// Page dimensions and estimated margins, derived once from page 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page width in source units
    pub width: f32,

    /// Page height in source units
    pub height: f32,

    /// Estimated margins
    pub margins: Margins,
}

impl PageInfo {
    /// Horizontal span between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        // Letter with one-inch margins
        Self {
            width: 612.0,
            height: 792.0,
            margins: Margins::uniform(72.0),
        }
    }
}

/// Margins on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Margins {
    /// Create margins with the same value on all sides.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Multiply every side by a linear factor.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
            left: self.left * factor,
        }
    }
}

/// Standard page sizes recognized by the settings synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// US Letter, 612 x 792 points
    Letter,
    /// US Legal, 612 x 1008 points
    Legal,
    /// ISO A3, 842 x 1191 points
    A3,
    /// ISO A4, 595 x 842 points (the fallback)
    A4,
}

impl PageSize {
    /// Portrait dimensions in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::A3 => (842.0, 1191.0),
            PageSize::A4 => (595.0, 842.0),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Height >= width
    Portrait,
    /// Width > height
    Landscape,
}

/// The host's display unit for margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    /// CSS pixels (96 per inch)
    #[default]
    Pixels,
}

impl DisplayUnit {
    /// Fixed linear factor from source units (points) to this unit.
    pub fn per_point(self) -> f32 {
        match self {
            DisplayUnit::Pixels => 96.0 / 72.0,
        }
    }
}

/// Document-wide settings synthesized from page-1 geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Matched standard page size
    pub page_size: PageSize,

    /// Page orientation
    pub orientation: Orientation,

    /// Margins converted to `unit`
    pub margins: Margins,

    /// Display unit of `margins`
    pub unit: DisplayUnit,
}

/// One page of the reconstructed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedPage {
    /// Generated identifier (`imported-page-<n>`)
    pub id: String,

    /// Page number (1-based)
    pub number: u32,
}

impl ImportedPage {
    /// Create a page entry for the given 1-based index.
    pub fn new(number: u32) -> Self {
        Self {
            id: format!("imported-page-{}", number),
            number,
        }
    }
}

/// The assembled output handed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// The content stream and its side tables
    pub content: ContentStream,

    /// Synthesized document settings
    pub settings: DocumentSettings,

    /// Page list sized to the source page count
    pub pages: Vec<ImportedPage>,

    /// Metadata carried through from extraction
    pub metadata: DocumentMetadata,

    /// Soft warnings aggregated during analysis (e.g. rejected table counts)
    pub warnings: Vec<String>,
}
