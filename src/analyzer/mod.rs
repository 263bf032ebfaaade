//! Per-page layout analysis: lines, paragraphs, tables, and images.
//!
//! Analysis is a pure function of one page plus the shared [`PageInfo`], so
//! pages can be analyzed on parallel workers and reassembled in order.

pub mod formatting;
pub mod layout;
pub mod options;
pub mod page_layout;
pub mod table_detector;

pub use formatting::normalize_font_family;
pub use options::{AnalyzeOptions, LayoutOptions, TableOptions};
pub use page_layout::estimate_page_info;

use crate::model::{AnalyzedImage, AnalyzedParagraph, AnalyzedTable, ExtractedPage, PageInfo};

use layout::{cluster_lines, segment_paragraphs};
use table_detector::detect_tables;

/// Everything analysis produced for one page.
#[derive(Debug, Default)]
pub struct PageAnalysis {
    /// Page number (1-based)
    pub page: u32,

    /// Paragraphs in top-to-bottom order
    pub paragraphs: Vec<AnalyzedParagraph>,

    /// Accepted tables in top-to-bottom order
    pub tables: Vec<AnalyzedTable>,

    /// Images carried through from extraction
    pub images: Vec<AnalyzedImage>,

    /// Table candidates rejected for low confidence
    pub rejected_tables: usize,
}

/// Analyze a single page into paragraphs, tables, and images.
pub fn analyze_page(
    page: &ExtractedPage,
    page_info: &PageInfo,
    options: &AnalyzeOptions,
) -> PageAnalysis {
    let lines = cluster_lines(page.items.clone(), &options.layout);
    log::debug!("page {}: {} lines clustered", page.number, lines.len());

    let detected = if options.detect_tables {
        detect_tables(
            &lines,
            page.number,
            &options.table,
            options.table_confidence_threshold,
        )
    } else {
        Default::default()
    };

    let paragraphs = segment_paragraphs(
        &lines,
        page.number,
        page_info,
        &detected.claimed,
        &options.layout,
    );

    let images = if options.extract_images {
        page.images
            .iter()
            .map(|raw| AnalyzedImage::from_raw(raw, page.number))
            .collect()
    } else {
        Vec::new()
    };

    log::debug!(
        "page {}: {} paragraphs, {} tables ({} rejected), {} images",
        page.number,
        paragraphs.len(),
        detected.tables.len(),
        detected.rejected,
        images.len()
    );

    PageAnalysis {
        page: page.number,
        paragraphs,
        tables: detected.tables,
        images,
        rejected_tables: detected.rejected,
    }
}
