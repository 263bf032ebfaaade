//! Page-geometry estimation from fragment positions.

use crate::model::{ExtractedPage, Margins, PageInfo};

/// Margin assumed when a page has no text to measure.
const DEFAULT_MARGIN: f32 = 72.0;

/// Estimate page dimensions and margins from the fragment bounding box.
///
/// Margins are the distances from the fragment bounding box to the page
/// edges, clamped at zero so fragments spilling past an edge never produce
/// negative margins. A page without fragments gets one-inch margins.
pub fn estimate_page_info(page: &ExtractedPage) -> PageInfo {
    if page.items.is_empty() {
        return PageInfo {
            width: page.width,
            height: page.height,
            margins: Margins::uniform(DEFAULT_MARGIN),
        };
    }

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;

    for item in &page.items {
        min_x = min_x.min(item.x);
        max_x = max_x.max(item.right());
        min_y = min_y.min(item.y);
        max_y = max_y.max(item.bottom());
    }

    let margins = Margins {
        top: min_y.max(0.0),
        right: (page.width - max_x).max(0.0),
        bottom: (page.height - max_y).max(0.0),
        left: min_x.max(0.0),
    };

    log::debug!(
        "page {}: estimated margins t={:.1} r={:.1} b={:.1} l={:.1}",
        page.number,
        margins.top,
        margins.right,
        margins.bottom,
        margins.left
    );

    PageInfo {
        width: page.width,
        height: page.height,
        margins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PositionedTextItem;

    fn make_item(x: f32, y: f32, width: f32, height: f32) -> PositionedTextItem {
        PositionedTextItem {
            text: "x".to_string(),
            x,
            y,
            width,
            height,
            font_name: "Helvetica".to_string(),
            font_size: 12.0,
            bold: None,
            italic: None,
            color: None,
        }
    }

    #[test]
    fn test_empty_page_gets_default_margins() {
        let page = ExtractedPage::new(1, 612.0, 792.0);
        let info = estimate_page_info(&page);
        assert_eq!(info.width, 612.0);
        assert_eq!(info.height, 792.0);
        assert_eq!(info.margins, Margins::uniform(72.0));
    }

    #[test]
    fn test_margins_from_bounding_box() {
        let mut page = ExtractedPage::new(1, 612.0, 792.0);
        page.items.push(make_item(72.0, 90.0, 100.0, 12.0));
        page.items.push(make_item(100.0, 700.0, 440.0, 12.0));

        let info = estimate_page_info(&page);
        assert_eq!(info.margins.left, 72.0);
        assert_eq!(info.margins.top, 90.0);
        assert_eq!(info.margins.right, 612.0 - 540.0);
        assert_eq!(info.margins.bottom, 792.0 - 712.0);
        assert_eq!(info.content_width(), 612.0 - 72.0 - 72.0);
    }

    #[test]
    fn test_overflowing_fragment_clamps_to_zero() {
        let mut page = ExtractedPage::new(1, 612.0, 792.0);
        page.items.push(make_item(-5.0, 100.0, 700.0, 12.0));

        let info = estimate_page_info(&page);
        assert_eq!(info.margins.left, 0.0);
        assert_eq!(info.margins.right, 0.0);
    }
}
