//! Table detection from column-alignment patterns.
//!
//! Tables are inferred in three steps: a histogram of fragment X positions
//! yields column-boundary candidates, contiguous runs of lines occupying two
//! or more boundary slots become table candidates, and each candidate is
//! gated on the fraction of non-empty cells. Rejected candidates leave their
//! lines to ordinary paragraph handling.

use std::collections::HashMap;

use crate::model::{AnalyzedCell, AnalyzedTable};

use super::formatting::{char_format, RunBuilder};
use super::layout::{LineRange, TextLine};
use super::options::TableOptions;

/// Result of table detection on one page.
#[derive(Debug, Default)]
pub struct DetectedTables {
    /// Accepted tables, top to bottom
    pub tables: Vec<AnalyzedTable>,
    /// Line-index ranges consumed by accepted tables
    pub claimed: Vec<LineRange>,
    /// Candidates discarded for low confidence
    pub rejected: usize,
}

/// Detect tables among a page's lines.
pub fn detect_tables(
    lines: &[TextLine],
    page: u32,
    options: &TableOptions,
    confidence_threshold: f32,
) -> DetectedTables {
    let boundaries = column_boundaries(lines, options);
    log::debug!(
        "table detection: page {}: {} column boundaries at {:?}",
        page,
        boundaries.len(),
        boundaries
    );

    if boundaries.len() < 2 {
        return DetectedTables::default();
    }

    let mut result = DetectedTables::default();

    // Grow runs of consecutive lines that occupy at least two boundary slots
    let mut run_start: Option<usize> = None;
    for (index, line) in lines.iter().enumerate() {
        let occupied = occupied_slots(line, &boundaries, options);
        if occupied >= options.min_occupied_slots {
            run_start.get_or_insert(index);
        } else {
            if let Some(start) = run_start.take() {
                seal_candidate(
                    lines,
                    start,
                    index - 1,
                    &boundaries,
                    page,
                    options,
                    confidence_threshold,
                    &mut result,
                );
            }
        }
    }
    if let Some(start) = run_start {
        seal_candidate(
            lines,
            start,
            lines.len() - 1,
            &boundaries,
            page,
            options,
            confidence_threshold,
            &mut result,
        );
    }

    result
}

/// Find well-separated column boundaries from the fragment X histogram.
fn column_boundaries(lines: &[TextLine], options: &TableOptions) -> Vec<f32> {
    if lines.is_empty() {
        return vec![];
    }

    let mut counts: HashMap<i32, usize> = HashMap::new();
    for line in lines {
        for item in &line.items {
            let bucket = (item.x / options.bucket_size).round() as i32;
            *counts.entry(bucket).or_insert(0) += 1;
        }
    }

    let required = (options.boundary_line_ratio * lines.len() as f32)
        .max(options.min_boundary_count as f32);

    let mut candidates: Vec<f32> = counts
        .iter()
        .filter(|(_, count)| **count as f32 >= required)
        .map(|(bucket, _)| *bucket as f32 * options.bucket_size)
        .collect();
    candidates.sort_by(f32::total_cmp);

    // Collapse candidates closer than the merge distance to their predecessor
    let mut boundaries: Vec<f32> = Vec::new();
    for candidate in candidates {
        match boundaries.last() {
            Some(last) if candidate - last < options.boundary_merge_distance => {}
            _ => boundaries.push(candidate),
        }
    }

    boundaries
}

/// Count the distinct boundary slots a line has fragments in.
fn occupied_slots(line: &TextLine, boundaries: &[f32], options: &TableOptions) -> usize {
    let mut occupied = vec![false; boundaries.len()];
    for item in &line.items {
        if let Some(slot) = slot_for(item.x, boundaries, options.slot_tolerance) {
            occupied[slot] = true;
        }
    }
    occupied.into_iter().filter(|o| *o).count()
}

/// Slot i spans `[boundary[i] - tolerance, boundary[i+1])`; the last slot is
/// open to the right. Positions left of the first slot have no slot.
fn slot_for(x: f32, boundaries: &[f32], tolerance: f32) -> Option<usize> {
    (0..boundaries.len())
        .rev()
        .find(|&i| x >= boundaries[i] - tolerance)
}

/// Gate a sealed line run on cell confidence and emit it if accepted.
#[allow(clippy::too_many_arguments)]
fn seal_candidate(
    lines: &[TextLine],
    start: usize,
    end: usize,
    boundaries: &[f32],
    page: u32,
    options: &TableOptions,
    confidence_threshold: f32,
    result: &mut DetectedTables,
) {
    let row_count = end - start + 1;
    if row_count < options.min_rows {
        return;
    }

    let table = build_table(&lines[start..=end], boundaries, page, options);
    if table.confidence >= confidence_threshold {
        log::debug!(
            "table detection: accepted {}x{} candidate at lines {}..={} (confidence {:.2})",
            table.row_count(),
            table.column_count(),
            start,
            end,
            table.confidence
        );
        result.tables.push(table);
        result.claimed.push(LineRange { start, end });
    } else {
        log::debug!(
            "table detection: rejected candidate at lines {}..={} (confidence {:.2} < {:.2})",
            start,
            end,
            table.confidence,
            confidence_threshold
        );
        result.rejected += 1;
    }
}

/// Build one row per line, assigning every fragment to its slot.
fn build_table(
    lines: &[TextLine],
    boundaries: &[f32],
    page: u32,
    options: &TableOptions,
) -> AnalyzedTable {
    let columns = boundaries.len();
    let mut rows: Vec<Vec<AnalyzedCell>> = Vec::with_capacity(lines.len());
    let mut filled = 0usize;

    for line in lines {
        let mut slot_items: Vec<Vec<usize>> = vec![Vec::new(); columns];
        for (item_index, item) in line.items.iter().enumerate() {
            // Fragments left of every slot land in the first column
            let slot = slot_for(item.x, boundaries, options.slot_tolerance).unwrap_or(0);
            slot_items[slot].push(item_index);
        }

        let cells: Vec<AnalyzedCell> = slot_items
            .into_iter()
            .map(|item_indices| {
                let mut builder = RunBuilder::new();
                for index in item_indices {
                    let item = &line.items[index];
                    let trimmed = item.text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if !builder.is_empty() {
                        builder.push_plain(" ");
                    }
                    builder.push(trimmed, char_format(item));
                }
                let (text, runs) = builder.finish();
                AnalyzedCell::new(text, runs)
            })
            .collect();

        filled += cells.iter().filter(|c| !c.is_empty()).count();
        rows.push(cells);
    }

    let total_cells = rows.len() * columns;
    let confidence = if total_cells > 0 {
        filled as f32 / total_cells as f32
    } else {
        0.0
    };

    let column_widths: Vec<f32> = (0..columns)
        .map(|i| {
            if i + 1 < columns {
                boundaries[i + 1] - boundaries[i]
            } else {
                options.default_last_column_width
            }
        })
        .collect();

    AnalyzedTable {
        rows,
        column_widths,
        page,
        y: lines.first().map(|l| l.y).unwrap_or(0.0),
        confidence,
    }
}
