//! Input contract types produced by the external extraction stage.
//!
//! The extraction stage opens the source document and yields, per page, a set
//! of positioned text fragments and raster images plus document metadata.
//! These types are input-only: the pipeline never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One positioned run of text as extracted from a source page.
///
/// Coordinates are top-left origin in source units (points).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionedTextItem {
    /// The text content
    pub text: String,

    /// X position (left edge)
    pub x: f32,

    /// Y position (top edge)
    pub y: f32,

    /// Width of the rendered text
    pub width: f32,

    /// Glyph height
    pub height: f32,

    /// Raw font name as reported by the source (e.g., "Helvetica-Bold")
    pub font_name: String,

    /// Font size in points
    pub font_size: f32,

    /// Bold flag, if the source reports one
    #[serde(default)]
    pub bold: Option<bool>,

    /// Italic flag, if the source reports one
    #[serde(default)]
    pub italic: Option<bool>,

    /// Text color, if the source reports one
    #[serde(default)]
    pub color: Option<RgbColor>,
}

impl PositionedTextItem {
    /// Right edge of the fragment.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the fragment.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// An RGB color as reported by the extraction stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl RgbColor {
    /// Create a new color.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a 6-hex-digit string (e.g., "#1a2b3c").
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A positioned raster image on a source page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImage {
    /// X position (left edge)
    pub x: f32,

    /// Y position (top edge)
    pub y: f32,

    /// Width in pixels
    pub width: f32,

    /// Height in pixels
    pub height: f32,

    /// Data-encoded image payload (e.g., a data URI)
    pub data: String,

    /// MIME type (e.g., "image/png")
    pub mime_type: String,
}

/// One extracted page: dimensions plus unordered fragments and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedPage {
    /// Page number (1-based)
    pub number: u32,

    /// Page width in source units
    pub width: f32,

    /// Page height in source units
    pub height: f32,

    /// Positioned text fragments (order irrelevant)
    #[serde(default)]
    pub items: Vec<PositionedTextItem>,

    /// Positioned raster images (order irrelevant)
    #[serde(default)]
    pub images: Vec<RawImage>,
}

impl ExtractedPage {
    /// Create a new empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            items: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Check if the page has no content.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.images.is_empty()
    }
}

/// Document metadata reported by the extraction stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

/// The whole extracted document handed to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Total source page count (may exceed `pages.len()` when trailing pages
    /// have no content)
    pub page_count: u32,

    /// Extracted pages
    pub pages: Vec<ExtractedPage>,

    /// Document metadata
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl ExtractedDocument {
    /// Create a document from its pages, deriving the page count.
    pub fn from_pages(pages: Vec<ExtractedPage>) -> Self {
        let page_count = pages.iter().map(|p| p.number).max().unwrap_or(0);
        Self {
            page_count,
            pages,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_hex() {
        assert_eq!(RgbColor::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(RgbColor::new(255, 128, 10).to_hex(), "#ff800a");
    }

    #[test]
    fn test_item_edges() {
        let item = PositionedTextItem {
            text: "Hi".to_string(),
            x: 72.0,
            y: 100.0,
            width: 24.0,
            height: 12.0,
            font_name: "Helvetica".to_string(),
            font_size: 12.0,
            bold: None,
            italic: None,
            color: None,
        };
        assert_eq!(item.right(), 96.0);
        assert_eq!(item.bottom(), 112.0);
    }

    #[test]
    fn test_document_from_pages() {
        let doc = ExtractedDocument::from_pages(vec![
            ExtractedPage::new(1, 612.0, 792.0),
            ExtractedPage::new(3, 612.0, 792.0),
        ]);
        assert_eq!(doc.page_count, 3);
        assert!(!doc.is_empty());
    }
}
