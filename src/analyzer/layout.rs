//! Line clustering, paragraph segmentation, and alignment classification.
//!
//! Fragments arrive unordered with top-left-origin coordinates. Clustering
//! groups them into visual lines by Y proximity, segmentation folds lines
//! into paragraphs using spacing and indent continuity, and the classifier
//! assigns an alignment from line geometry alone.

use std::cmp::Ordering;

use crate::model::{Alignment, AnalyzedParagraph, PageInfo, PositionedTextItem};

use super::formatting::{char_format, RunBuilder};
use super::options::LayoutOptions;

/// A visual text line: fragments sharing a Y-band, ordered by X.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Fragments in this line, sorted by X
    pub items: Vec<PositionedTextItem>,
    /// Y position (first item's y)
    pub y: f32,
    /// Leftmost fragment edge
    pub min_x: f32,
    /// Rightmost fragment edge
    pub max_x: f32,
    /// Tallest fragment height
    pub height: f32,
}

impl TextLine {
    /// Build a line from fragments, sorting them by X.
    pub fn from_items(mut items: Vec<PositionedTextItem>) -> Self {
        items.sort_by(|a, b| a.x.total_cmp(&b.x));

        let y = items.first().map(|i| i.y).unwrap_or(0.0);
        let min_x = items
            .iter()
            .map(|i| i.x)
            .min_by(f32::total_cmp)
            .unwrap_or(0.0);
        let max_x = items
            .iter()
            .map(|i| i.right())
            .max_by(f32::total_cmp)
            .unwrap_or(0.0);
        let height = items
            .iter()
            .map(|i| i.height)
            .max_by(f32::total_cmp)
            .unwrap_or(0.0);

        Self {
            items,
            y,
            min_x,
            max_x,
            height,
        }
    }

    /// Line width.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Horizontal center of the line.
    pub fn center(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }
}

/// An inclusive range of line indices claimed by a detected table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    /// First claimed line index
    pub start: usize,
    /// Last claimed line index
    pub end: usize,
}

impl LineRange {
    /// Check whether a line index falls inside the range.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// Cluster one page's fragments into lines, top to bottom.
///
/// Fragments are sorted by (y, x); a fragment joins the current line when its
/// Y deviates from the line's reference Y by at most half its font size (the
/// tolerance scales with the fragment, so mixed type sizes on one visual line
/// still cluster together).
pub fn cluster_lines(items: Vec<PositionedTextItem>, options: &LayoutOptions) -> Vec<TextLine> {
    if items.is_empty() {
        return vec![];
    }

    let mut sorted = items;
    sorted.sort_by(|a, b| match a.y.total_cmp(&b.y) {
        Ordering::Equal => a.x.total_cmp(&b.x),
        other => other,
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<PositionedTextItem> = Vec::new();
    let mut reference_y = 0.0f32;

    for item in sorted {
        let tolerance = item.font_size * options.line_tolerance_factor;
        if current.is_empty() || (item.y - reference_y).abs() <= tolerance {
            if current.is_empty() {
                reference_y = item.y;
            }
            current.push(item);
        } else {
            lines.push(TextLine::from_items(std::mem::take(&mut current)));
            reference_y = item.y;
            current.push(item);
        }
    }

    if !current.is_empty() {
        lines.push(TextLine::from_items(current));
    }

    lines
}

/// Average inter-line Y spacing across the page.
pub fn average_line_spacing(lines: &[TextLine], options: &LayoutOptions) -> f32 {
    if lines.len() < 2 {
        return options.default_line_spacing;
    }

    let total: f32 = lines.windows(2).map(|w| (w[1].y - w[0].y).abs()).sum();
    total / (lines.len() - 1) as f32
}

/// Group lines into paragraphs, skipping lines claimed by detected tables.
///
/// A line seals the current paragraph when the Y gap to the previous line
/// exceeds `gap_break_factor` times the average spacing, or when the left
/// edges differ by more than the indent threshold. Claimed lines flush the
/// accumulator without joining any paragraph.
pub fn segment_paragraphs(
    lines: &[TextLine],
    page: u32,
    page_info: &PageInfo,
    claimed: &[LineRange],
    options: &LayoutOptions,
) -> Vec<AnalyzedParagraph> {
    let avg_spacing = average_line_spacing(lines, options);

    let mut paragraphs: Vec<AnalyzedParagraph> = Vec::new();
    let mut current: Vec<&TextLine> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if claimed.iter().any(|range| range.contains(index)) {
            if !current.is_empty() {
                paragraphs.push(build_paragraph(
                    std::mem::take(&mut current),
                    page,
                    page_info,
                    options,
                ));
            }
            continue;
        }

        if let Some(prev) = current.last() {
            let gap = (line.y - prev.y).abs();
            let indent_shift = (line.min_x - prev.min_x).abs();
            if gap > options.gap_break_factor * avg_spacing
                || indent_shift > options.indent_break_threshold
            {
                paragraphs.push(build_paragraph(
                    std::mem::take(&mut current),
                    page,
                    page_info,
                    options,
                ));
            }
        }

        current.push(line);
    }

    if !current.is_empty() {
        paragraphs.push(build_paragraph(current, page, page_info, options));
    }

    paragraphs
}

/// Assemble one paragraph from its lines: concatenated text, merged runs,
/// and a voted alignment.
fn build_paragraph(
    lines: Vec<&TextLine>,
    page: u32,
    page_info: &PageInfo,
    options: &LayoutOptions,
) -> AnalyzedParagraph {
    let mut builder = RunBuilder::new();

    for line in &lines {
        if !builder.is_empty() {
            builder.push_plain(" ");
        }
        for item in &line.items {
            builder.push(&item.text, char_format(item));
        }
    }

    let alignment = classify_alignment(&lines, page_info, options);
    let y = lines.first().map(|l| l.y).unwrap_or(0.0);
    let (text, runs) = builder.finish();

    AnalyzedParagraph {
        text,
        runs,
        alignment,
        page,
        y,
        trailing_break: true,
    }
}

/// Assign an alignment to a paragraph from its lines' geometry.
///
/// Each line votes for one class; the majority wins, ties resolving in the
/// fixed priority justify > center > right > left.
pub fn classify_alignment(
    lines: &[&TextLine],
    page_info: &PageInfo,
    options: &LayoutOptions,
) -> Alignment {
    // Vote slots in tie-break priority order
    const CLASSES: [Alignment; 4] = [
        Alignment::Justify,
        Alignment::Center,
        Alignment::Right,
        Alignment::Left,
    ];
    let mut votes = [0usize; 4];

    for line in lines {
        let class = classify_line(line, page_info, options);
        let slot = CLASSES.iter().position(|c| *c == class).unwrap_or(3);
        votes[slot] += 1;
    }

    let best = (0..4).max_by_key(|&i| (votes[i], 3 - i)).unwrap_or(3);
    CLASSES[best]
}

fn classify_line(line: &TextLine, page_info: &PageInfo, options: &LayoutOptions) -> Alignment {
    let left_margin_x = page_info.margins.left;
    let right_margin_x = page_info.width - page_info.margins.right;
    let content_width = page_info.content_width();

    let left_distance = (line.min_x - left_margin_x).abs();
    let right_distance = (right_margin_x - line.max_x).abs();
    let center_distance = (line.center() - page_info.width / 2.0).abs();
    let width_ratio = if content_width > 0.0 {
        line.width() / content_width
    } else {
        0.0
    };

    if width_ratio > options.justify_width_ratio
        && left_distance <= options.margin_snap_distance
        && right_distance <= options.margin_snap_distance
    {
        Alignment::Justify
    } else if center_distance < options.center_snap_distance {
        Alignment::Center
    } else if right_distance < options.right_snap_distance
        && left_distance > options.right_min_left_distance
    {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(text: &str, x: f32, y: f32) -> PositionedTextItem {
        make_sized_item(text, x, y, 12.0)
    }

    fn make_sized_item(text: &str, x: f32, y: f32, font_size: f32) -> PositionedTextItem {
        PositionedTextItem {
            text: text.to_string(),
            x,
            y,
            width: text.chars().count() as f32 * font_size * 0.5,
            height: font_size,
            font_name: "Helvetica".to_string(),
            font_size,
            bold: None,
            italic: None,
            color: None,
        }
    }

    fn make_line(items: Vec<PositionedTextItem>) -> TextLine {
        TextLine::from_items(items)
    }

    fn letter_info() -> PageInfo {
        PageInfo::default()
    }

    #[test]
    fn test_cluster_empty() {
        assert!(cluster_lines(vec![], &LayoutOptions::default()).is_empty());
    }

    #[test]
    fn test_cluster_two_lines() {
        let items = vec![
            make_item("World", 108.0, 100.0),
            make_item("Hello ", 72.0, 100.0),
            make_item("Below", 72.0, 130.0),
        ];
        let lines = cluster_lines(items, &LayoutOptions::default());
        assert_eq!(lines.len(), 2);
        // Re-sorted by X within the line
        assert_eq!(lines[0].items[0].text, "Hello ");
        assert_eq!(lines[0].items[1].text, "World");
        assert_eq!(lines[1].items[0].text, "Below");
    }

    #[test]
    fn test_cluster_tolerance_scales_with_font_size() {
        // 4 units apart: inside tolerance for 12pt (6.0) but not for 6pt (3.0)
        let joined = cluster_lines(
            vec![
                make_sized_item("a", 10.0, 100.0, 12.0),
                make_sized_item("b", 40.0, 104.0, 12.0),
            ],
            &LayoutOptions::default(),
        );
        assert_eq!(joined.len(), 1);

        let split = cluster_lines(
            vec![
                make_sized_item("a", 10.0, 100.0, 6.0),
                make_sized_item("b", 40.0, 104.0, 6.0),
            ],
            &LayoutOptions::default(),
        );
        assert_eq!(split.len(), 2);
    }

    #[test]
    fn test_line_attributes() {
        let line = make_line(vec![
            make_item("Hello ", 72.0, 100.0),
            make_item("World", 108.0, 100.0),
        ]);
        assert_eq!(line.y, 100.0);
        assert_eq!(line.min_x, 72.0);
        assert!(line.max_x > 108.0);
        assert_eq!(line.height, 12.0);
    }

    #[test]
    fn test_average_spacing_default() {
        let lines = vec![make_line(vec![make_item("only", 72.0, 100.0)])];
        let options = LayoutOptions::default();
        assert_eq!(average_line_spacing(&lines, &options), 20.0);
    }

    #[test]
    fn test_segment_small_relative_gap_stays_together() {
        // Two lines 100 apart: avg spacing 100, threshold 150, no split
        let lines = vec![
            make_line(vec![make_item("first", 72.0, 100.0)]),
            make_line(vec![make_item("second", 72.0, 200.0)]),
        ];
        let paragraphs = segment_paragraphs(
            &lines,
            1,
            &letter_info(),
            &[],
            &LayoutOptions::default(),
        );
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0].text.contains("first"));
        assert!(paragraphs[0].text.contains("second"));
    }

    #[test]
    fn test_segment_splits_on_large_gap() {
        // Spacings 20, 20, 80: avg 40, threshold 60, last gap splits
        let lines = vec![
            make_line(vec![make_item("a", 72.0, 100.0)]),
            make_line(vec![make_item("b", 72.0, 120.0)]),
            make_line(vec![make_item("c", 72.0, 140.0)]),
            make_line(vec![make_item("d", 72.0, 220.0)]),
        ];
        let paragraphs = segment_paragraphs(
            &lines,
            1,
            &letter_info(),
            &[],
            &LayoutOptions::default(),
        );
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1].text, "d");
    }

    #[test]
    fn test_segment_splits_on_indent_shift() {
        let lines = vec![
            make_line(vec![make_item("a", 72.0, 100.0)]),
            make_line(vec![make_item("b", 72.0, 120.0)]),
            make_line(vec![make_item("c", 110.0, 140.0)]),
        ];
        let paragraphs = segment_paragraphs(
            &lines,
            1,
            &letter_info(),
            &[],
            &LayoutOptions::default(),
        );
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1].text, "c");
    }

    #[test]
    fn test_segment_skips_claimed_ranges() {
        let lines = vec![
            make_line(vec![make_item("before", 72.0, 100.0)]),
            make_line(vec![make_item("cell", 72.0, 120.0)]),
            make_line(vec![make_item("cell", 72.0, 140.0)]),
            make_line(vec![make_item("after", 72.0, 160.0)]),
        ];
        let claimed = vec![LineRange { start: 1, end: 2 }];
        let paragraphs = segment_paragraphs(
            &lines,
            1,
            &letter_info(),
            &claimed,
            &LayoutOptions::default(),
        );
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "before");
        assert_eq!(paragraphs[1].text, "after");
    }

    #[test]
    fn test_paragraph_runs_cover_text() {
        let lines = vec![
            make_line(vec![
                make_item("Hello ", 72.0, 100.0),
                make_item("World", 108.0, 100.0),
            ]),
            make_line(vec![make_item("again", 72.0, 115.0)]),
        ];
        let paragraphs = segment_paragraphs(
            &lines,
            1,
            &letter_info(),
            &[],
            &LayoutOptions::default(),
        );
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0].runs_cover_text());
        assert_eq!(paragraphs[0].text, "Hello World again");
    }

    #[test]
    fn test_alignment_left_flush_lines() {
        let info = letter_info();
        let lines: Vec<TextLine> = (0..3)
            .map(|i| make_line(vec![make_item("left text", 72.0, 100.0 + i as f32 * 15.0)]))
            .collect();
        let refs: Vec<&TextLine> = lines.iter().collect();
        assert_eq!(
            classify_alignment(&refs, &info, &LayoutOptions::default()),
            Alignment::Left
        );
    }

    #[test]
    fn test_alignment_centered_lines() {
        let info = letter_info();
        // 100-wide lines centered on the 306 page center, within +-5 units
        let lines: Vec<TextLine> = [254.0f32, 256.0, 258.0]
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let mut item = make_item("centered text txt", x, 100.0 + i as f32 * 15.0);
                item.width = 100.0;
                make_line(vec![item])
            })
            .collect();
        let refs: Vec<&TextLine> = lines.iter().collect();
        assert_eq!(
            classify_alignment(&refs, &info, &LayoutOptions::default()),
            Alignment::Center
        );
    }

    #[test]
    fn test_alignment_right_lines() {
        let info = letter_info();
        // Right edge at 540 (the right margin), left edge far from 72
        let lines: Vec<TextLine> = (0..2)
            .map(|i| {
                let mut item = make_item("right", 440.0, 100.0 + i as f32 * 15.0);
                item.width = 100.0;
                make_line(vec![item])
            })
            .collect();
        let refs: Vec<&TextLine> = lines.iter().collect();
        assert_eq!(
            classify_alignment(&refs, &info, &LayoutOptions::default()),
            Alignment::Right
        );
    }

    #[test]
    fn test_alignment_justified_lines() {
        let info = letter_info();
        // Full content width, both edges flush
        let lines: Vec<TextLine> = (0..2)
            .map(|i| {
                let mut item = make_item("justified", 72.0, 100.0 + i as f32 * 15.0);
                item.width = 468.0;
                make_line(vec![item])
            })
            .collect();
        let refs: Vec<&TextLine> = lines.iter().collect();
        assert_eq!(
            classify_alignment(&refs, &info, &LayoutOptions::default()),
            Alignment::Justify
        );
    }

    #[test]
    fn test_alignment_tie_prefers_priority_order() {
        let info = letter_info();
        // One centered line, one left line: tie resolves to center
        let mut centered = make_item("mid", 256.0, 100.0);
        centered.width = 100.0;
        let lines = vec![
            make_line(vec![centered]),
            make_line(vec![make_item("left", 72.0, 115.0)]),
        ];
        let refs: Vec<&TextLine> = lines.iter().collect();
        assert_eq!(
            classify_alignment(&refs, &info, &LayoutOptions::default()),
            Alignment::Center
        );
    }
}
