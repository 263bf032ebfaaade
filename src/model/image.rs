//! Inferred image types.

use serde::{Deserialize, Serialize};

use super::RawImage;

/// Images wider than this flow as standalone blocks; narrower ones are inline.
pub const BLOCK_IMAGE_MIN_WIDTH: f32 = 200.0;

/// How an embedded image participates in text flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePlacement {
    /// Standalone block, followed by a line break
    Block,
    /// Inline with the surrounding text
    Inline,
}

impl ImagePlacement {
    /// Classify by pixel width.
    pub fn from_width(width: f32) -> Self {
        if width > BLOCK_IMAGE_MIN_WIDTH {
            ImagePlacement::Block
        } else {
            ImagePlacement::Inline
        }
    }
}

/// An image placed into the reconstructed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedImage {
    /// Data-encoded image payload carried through from extraction
    pub data: String,

    /// MIME type
    pub mime_type: String,

    /// Width in pixels
    pub width: f32,

    /// Height in pixels
    pub height: f32,

    /// Page number (1-based)
    pub page: u32,

    /// Top Y coordinate on the page
    pub y: f32,

    /// Block or inline placement
    pub placement: ImagePlacement,
}

impl AnalyzedImage {
    /// Build from a raw extracted image.
    pub fn from_raw(raw: &RawImage, page: u32) -> Self {
        Self {
            data: raw.data.clone(),
            mime_type: raw.mime_type.clone(),
            width: raw.width,
            height: raw.height,
            page,
            y: raw.y,
            placement: ImagePlacement::from_width(raw.width),
        }
    }
}
