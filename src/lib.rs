//! # relayout
//!
//! Layout inference and document assembly for extracted page content.
//!
//! Given positioned text fragments and images pulled out of a paginated
//! source document, this library reconstructs logical structure: it clusters
//! fragments into lines, folds lines into paragraphs, infers tables from
//! column alignment, classifies paragraph alignment, and assembles everything
//! into a single offset-addressed content stream with formatting runs,
//! paragraph entries, and embedded-object references.
//!
//! ## Quick Start
//!
//! ```no_run
//! use relayout::{analyze, ExtractedDocument};
//!
//! fn main() -> relayout::Result<()> {
//!     let json = std::fs::read_to_string("extracted.json")?;
//!     let extracted: ExtractedDocument = serde_json::from_str(&json)?;
//!
//!     let document = analyze(&extracted)?;
//!     println!("{} chars, {} pages", document.content.char_len(), document.pages.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line and paragraph inference**: Y-proximity clustering with
//!   spacing- and indent-based paragraph breaks
//! - **Table detection**: column boundaries from X-position histograms,
//!   with a confidence gate and paragraph fallback
//! - **Formatting normalization**: canonical font families, merged runs
//! - **Page-layout estimation**: margins and standard page-size matching
//! - **Parallel processing**: uses Rayon for multi-page documents

pub mod analyzer;
pub mod assembler;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use analyzer::{
    analyze_page, estimate_page_info, AnalyzeOptions, LayoutOptions, PageAnalysis, TableOptions,
};
pub use assembler::{build_document, derive_settings};
pub use error::{Error, Result};
pub use model::{
    Alignment, AnalyzedCell, AnalyzedImage, AnalyzedParagraph, AnalyzedTable, CharFormat,
    ContentStream, DocumentMetadata, DocumentModel, DocumentSettings, EmbeddedObject,
    EmbeddedObjectRef, ExtractedDocument, ExtractedPage, FormattingRun, ImagePlacement,
    ImportedPage, Margins, Orientation, PageInfo, PageSize, ParagraphEntry, PositionedTextItem,
    RawImage, RgbColor, OBJECT_PLACEHOLDER, PAGE_BREAK,
};

use rayon::prelude::*;

/// Analyze an extracted document with default options.
///
/// # Example
///
/// ```no_run
/// use relayout::{analyze, ExtractedDocument, ExtractedPage};
///
/// let extracted = ExtractedDocument::from_pages(vec![ExtractedPage::new(1, 612.0, 792.0)]);
/// let document = analyze(&extracted).unwrap();
/// assert_eq!(document.pages.len(), 1);
/// ```
pub fn analyze(document: &ExtractedDocument) -> Result<DocumentModel> {
    analyze_with_options(document, &AnalyzeOptions::default())
}

/// Analyze an extracted document with custom options.
///
/// Page layout is estimated once from the first page and shared across the
/// document; pages are then analyzed independently (in parallel unless
/// disabled) and reassembled in page order.
///
/// # Example
///
/// ```no_run
/// use relayout::{analyze_with_options, AnalyzeOptions, ExtractedDocument, ExtractedPage};
///
/// let extracted = ExtractedDocument::from_pages(vec![ExtractedPage::new(1, 612.0, 792.0)]);
/// let options = AnalyzeOptions::new().with_tables(false).sequential();
/// let document = analyze_with_options(&extracted, &options).unwrap();
/// ```
pub fn analyze_with_options(
    document: &ExtractedDocument,
    options: &AnalyzeOptions,
) -> Result<DocumentModel> {
    options.validate()?;

    for page in &document.pages {
        if page.number == 0 || page.number > document.page_count {
            return Err(Error::PageOutOfRange(page.number, document.page_count));
        }
    }

    let page_info = document
        .pages
        .first()
        .map(estimate_page_info)
        .unwrap_or_default();

    let mut analyses: Vec<PageAnalysis> = if options.parallel {
        document
            .pages
            .par_iter()
            .map(|page| analyze_page(page, &page_info, options))
            .collect()
    } else {
        document
            .pages
            .iter()
            .map(|page| analyze_page(page, &page_info, options))
            .collect()
    };
    analyses.sort_by_key(|a| a.page);

    Ok(build_document(
        &analyses,
        &page_info,
        document.page_count,
        document.metadata.clone(),
    ))
}

/// Builder for configuring and running document analysis.
///
/// # Example
///
/// ```no_run
/// use relayout::{ExtractedDocument, ExtractedPage, Relayout};
///
/// let extracted = ExtractedDocument::from_pages(vec![ExtractedPage::new(1, 612.0, 792.0)]);
/// let document = Relayout::new()
///     .with_tables(true)
///     .with_table_confidence(0.7)
///     .sequential()
///     .analyze(&extracted)?;
/// # Ok::<(), relayout::Error>(())
/// ```
pub struct Relayout {
    options: AnalyzeOptions,
}

impl Relayout {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: AnalyzeOptions::default(),
        }
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.options = self.options.with_tables(detect);
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.options = self.options.with_images(extract);
        self
    }

    /// Set the table confidence threshold.
    pub fn with_table_confidence(mut self, threshold: f32) -> Self {
        self.options = self.options.with_table_confidence(threshold);
        self
    }

    /// Set the extraction-stage password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.options = self.options.with_password(password);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Replace the layout thresholds.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.options = self.options.with_layout(layout);
        self
    }

    /// Replace the table-detection thresholds.
    pub fn with_table_options(mut self, table: TableOptions) -> Self {
        self.options = self.options.with_table_options(table);
        self
    }

    /// Run analysis on an extracted document.
    pub fn analyze(&self, document: &ExtractedDocument) -> Result<DocumentModel> {
        analyze_with_options(document, &self.options)
    }
}

impl Default for Relayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(text: &str, x: f32, y: f32) -> PositionedTextItem {
        PositionedTextItem {
            text: text.to_string(),
            x,
            y,
            width: text.chars().count() as f32 * 6.0,
            height: 12.0,
            font_name: "Helvetica".to_string(),
            font_size: 12.0,
            bold: None,
            italic: None,
            color: None,
        }
    }

    #[test]
    fn test_relayout_builder() {
        let relayout = Relayout::new()
            .with_tables(false)
            .with_table_confidence(0.8)
            .sequential();

        assert!(!relayout.options.detect_tables);
        assert_eq!(relayout.options.table_confidence_threshold, 0.8);
        assert!(!relayout.options.parallel);
    }

    #[test]
    fn test_analyze_empty_document() {
        let extracted = ExtractedDocument::from_pages(vec![]);
        let document = analyze(&extracted).unwrap();
        assert!(document.content.text.is_empty());
        assert!(document.pages.is_empty());
    }

    #[test]
    fn test_analyze_rejects_invalid_threshold() {
        let extracted = ExtractedDocument::from_pages(vec![ExtractedPage::new(1, 612.0, 792.0)]);
        let options = AnalyzeOptions::new().with_table_confidence(2.0);
        assert!(matches!(
            analyze_with_options(&extracted, &options),
            Err(Error::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_analyze_rejects_page_out_of_range() {
        let mut extracted =
            ExtractedDocument::from_pages(vec![ExtractedPage::new(5, 612.0, 792.0)]);
        extracted.page_count = 3;
        assert!(matches!(
            analyze(&extracted),
            Err(Error::PageOutOfRange(5, 3))
        ));
    }

    #[test]
    fn test_analyze_single_page() {
        let mut page = ExtractedPage::new(1, 612.0, 792.0);
        page.items.push(make_item("Hello ", 72.0, 100.0));
        page.items.push(make_item("World", 108.0, 100.0));

        let document = analyze(&ExtractedDocument::from_pages(vec![page])).unwrap();
        assert_eq!(document.content.text, "Hello World\n");
        assert!(document.content.runs_cover_text());
        assert_eq!(document.settings.page_size, PageSize::Letter);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let mut pages = Vec::new();
        for number in 1..=3u32 {
            let mut page = ExtractedPage::new(number, 612.0, 792.0);
            page.items
                .push(make_item(&format!("Page {}", number), 72.0, 100.0));
            pages.push(page);
        }
        let extracted = ExtractedDocument::from_pages(pages);

        let parallel = analyze(&extracted).unwrap();
        let sequential =
            analyze_with_options(&extracted, &AnalyzeOptions::new().sequential()).unwrap();
        assert_eq!(parallel, sequential);
    }
}
