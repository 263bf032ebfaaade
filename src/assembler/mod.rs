//! Document assembly: interleave per-page analyses into one offset-addressed
//! content stream with side tables, and synthesize document settings.

use crate::analyzer::formatting::{slice_chars, RunBuilder};
use crate::analyzer::PageAnalysis;
use crate::model::{
    AnalyzedImage, AnalyzedParagraph, AnalyzedTable, ContentStream, DisplayUnit, DocumentMetadata,
    DocumentModel, DocumentSettings, EmbeddedObject, EmbeddedObjectRef, ImagePlacement,
    ImportedPage, Orientation, PageInfo, PageSize, ParagraphEntry, OBJECT_PLACEHOLDER, PAGE_BREAK,
};

/// Fixed height per table row in the aggregate table extent.
const TABLE_ROW_HEIGHT: f32 = 30.0;

/// Tolerance when matching page dimensions against standard sizes.
const SIZE_MATCH_TOLERANCE: f32 = 10.0;

/// One positioned piece of content awaiting assembly.
enum StreamItem<'a> {
    Paragraph(&'a AnalyzedParagraph),
    Table(&'a AnalyzedTable),
    Image(&'a AnalyzedImage),
}

impl StreamItem<'_> {
    fn page(&self) -> u32 {
        match self {
            StreamItem::Paragraph(p) => p.page,
            StreamItem::Table(t) => t.page,
            StreamItem::Image(i) => i.page,
        }
    }

    fn y(&self) -> f32 {
        match self {
            StreamItem::Paragraph(p) => p.y,
            StreamItem::Table(t) => t.y,
            StreamItem::Image(i) => i.y,
        }
    }
}

/// One logical unit of the content stream.
///
/// The assembler works over tokens and only materializes the reserved
/// sentinel characters when the text buffer is finally built.
enum StreamToken<'a> {
    PageBreak,
    Paragraph(&'a AnalyzedParagraph),
    Table(&'a AnalyzedTable),
    Image(&'a AnalyzedImage),
}

/// Monotonic generator for `imported-<kind>-<n>` identifiers.
///
/// All object kinds share one counter, so every id in a build is unique.
struct IdGenerator {
    next: usize,
}

impl IdGenerator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn generate(&mut self, kind: &str) -> String {
        let id = format!("imported-{}-{}", kind, self.next);
        self.next += 1;
        id
    }
}

/// Assemble analyzed pages into the final document model.
///
/// Content is ordered by (page, Y); page transitions emit page-break markers,
/// including for trailing pages with no content.
pub fn build_document(
    analyses: &[PageAnalysis],
    page_info: &PageInfo,
    page_count: u32,
    metadata: DocumentMetadata,
) -> DocumentModel {
    let mut items: Vec<StreamItem> = Vec::new();
    for analysis in analyses {
        items.extend(analysis.paragraphs.iter().map(StreamItem::Paragraph));
        items.extend(analysis.tables.iter().map(StreamItem::Table));
        items.extend(analysis.images.iter().map(StreamItem::Image));
    }
    items.sort_by(|a, b| {
        a.page()
            .cmp(&b.page())
            .then_with(|| a.y().total_cmp(&b.y()))
    });

    let mut tokens: Vec<StreamToken> = Vec::with_capacity(items.len());
    let mut current_page = 1u32;
    for item in &items {
        while item.page() > current_page {
            tokens.push(StreamToken::PageBreak);
            current_page += 1;
        }
        tokens.push(match item {
            StreamItem::Paragraph(p) => StreamToken::Paragraph(*p),
            StreamItem::Table(t) => StreamToken::Table(*t),
            StreamItem::Image(i) => StreamToken::Image(*i),
        });
    }
    // Trailing pages without content still contribute page breaks
    while current_page < page_count {
        tokens.push(StreamToken::PageBreak);
        current_page += 1;
    }

    let content = materialize(&tokens);

    let rejected: usize = analyses.iter().map(|a| a.rejected_tables).sum();
    let mut warnings = Vec::new();
    if rejected > 0 {
        warnings.push(format!("{} low-confidence tables found", rejected));
    }

    log::debug!(
        "assembled {} chars, {} paragraphs, {} objects across {} pages",
        content.char_len(),
        content.paragraphs.len(),
        content.objects.len(),
        page_count
    );

    DocumentModel {
        content,
        settings: derive_settings(page_info),
        pages: (1..=page_count).map(ImportedPage::new).collect(),
        metadata,
        warnings,
    }
}

/// Materialize tokens into the text buffer and its side tables.
///
/// This is the only place the reserved sentinel characters are written.
fn materialize(tokens: &[StreamToken]) -> ContentStream {
    let mut builder = RunBuilder::new();
    let mut paragraphs: Vec<ParagraphEntry> = Vec::new();
    let mut objects: Vec<EmbeddedObjectRef> = Vec::new();
    let mut ids = IdGenerator::new();

    for token in tokens {
        match token {
            StreamToken::PageBreak => {
                builder.push_plain(&PAGE_BREAK.to_string());
            }
            StreamToken::Paragraph(paragraph) => {
                paragraphs.push(ParagraphEntry {
                    offset: builder.char_len(),
                    alignment: paragraph.alignment,
                });
                for run in &paragraph.runs {
                    builder.push(
                        slice_chars(&paragraph.text, run.start, run.end),
                        run.format.clone(),
                    );
                }
                if paragraph.trailing_break {
                    builder.push_plain("\n");
                }
            }
            StreamToken::Table(table) => {
                objects.push(EmbeddedObjectRef {
                    offset: builder.char_len(),
                    id: ids.generate("table"),
                    object: EmbeddedObject::Table {
                        width: table.total_width(),
                        height: table.row_count() as f32 * TABLE_ROW_HEIGHT,
                        column_widths: table.column_widths.clone(),
                        rows: table.rows.clone(),
                    },
                });
                builder.push_plain(&OBJECT_PLACEHOLDER.to_string());
                builder.push_plain("\n");
            }
            StreamToken::Image(image) => {
                objects.push(EmbeddedObjectRef {
                    offset: builder.char_len(),
                    id: ids.generate("image"),
                    object: EmbeddedObject::Image {
                        placement: image.placement,
                        width: image.width,
                        height: image.height,
                        data: image.data.clone(),
                        mime_type: image.mime_type.clone(),
                    },
                });
                builder.push_plain(&OBJECT_PLACEHOLDER.to_string());
                if image.placement == ImagePlacement::Block {
                    builder.push_plain("\n");
                }
            }
        }
    }

    let (text, runs) = builder.finish();
    ContentStream {
        text,
        runs,
        paragraphs,
        objects,
        ..Default::default()
    }
}

/// Synthesize document settings from page-1 geometry.
///
/// The dimensions are matched (in portrait order) against standard sizes
/// within a fixed tolerance, falling back to A4; margins are converted to the
/// host's display unit.
pub fn derive_settings(page_info: &PageInfo) -> DocumentSettings {
    let orientation = if page_info.width > page_info.height {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };

    let (portrait_w, portrait_h) = match orientation {
        Orientation::Portrait => (page_info.width, page_info.height),
        Orientation::Landscape => (page_info.height, page_info.width),
    };

    let page_size = [PageSize::Letter, PageSize::Legal, PageSize::A3, PageSize::A4]
        .into_iter()
        .find(|size| {
            let (w, h) = size.dimensions();
            (portrait_w - w).abs() <= SIZE_MATCH_TOLERANCE
                && (portrait_h - h).abs() <= SIZE_MATCH_TOLERANCE
        })
        .unwrap_or(PageSize::A4);

    DocumentSettings {
        page_size,
        orientation,
        margins: page_info.margins.scaled(DisplayUnit::Pixels.per_point()),
        unit: DisplayUnit::Pixels,
    }
}
