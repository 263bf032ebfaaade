//! Data model for extracted input and assembled output.

mod document;
mod image;
mod input;
mod paragraph;
mod table;

pub use document::{
    ContentStream, DisplayUnit, DocumentModel, DocumentSettings, EmbeddedObject,
    EmbeddedObjectRef, FieldRef, HyperlinkRef, ImportedPage, Margins, Orientation, PageInfo,
    PageSize, ParagraphEntry, SectionRef, OBJECT_PLACEHOLDER, PAGE_BREAK,
};
pub use image::{AnalyzedImage, ImagePlacement};
pub use input::{
    DocumentMetadata, ExtractedDocument, ExtractedPage, PositionedTextItem, RawImage, RgbColor,
};
pub use paragraph::{Alignment, AnalyzedParagraph, CharFormat, FormattingRun};
pub use table::{AnalyzedCell, AnalyzedTable};
