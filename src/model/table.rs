//! Inferred table types.

use serde::{Deserialize, Serialize};

use super::FormattingRun;

/// One table cell: trimmed text plus its own formatting runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedCell {
    /// Trimmed cell text (empty cells are retained to preserve row alignment)
    pub text: String,

    /// Formatting runs covering `text` exactly
    pub runs: Vec<FormattingRun>,
}

impl AnalyzedCell {
    /// Create a cell with text and runs.
    pub fn new(text: impl Into<String>, runs: Vec<FormattingRun>) -> Self {
        Self {
            text: text.into(),
            runs,
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            runs: Vec::new(),
        }
    }

    /// Check if the cell has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A table inferred from column-aligned line runs.
///
/// Every row has exactly `column_widths.len()` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedTable {
    /// Rows of cells, top to bottom
    pub rows: Vec<Vec<AnalyzedCell>>,

    /// Column widths in source units
    pub column_widths: Vec<f32>,

    /// Page number (1-based)
    pub page: u32,

    /// Top Y coordinate on the page
    pub y: f32,

    /// Fraction of non-empty cells, in [0, 1]
    pub confidence: f32,
}

impl AnalyzedTable {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Sum of column widths.
    pub fn total_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    /// Check that every row matches the column count.
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|r| r.len() == self.column_widths.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        let table = AnalyzedTable {
            rows: vec![
                vec![AnalyzedCell::new("A", vec![]), AnalyzedCell::empty()],
                vec![AnalyzedCell::new("B", vec![]), AnalyzedCell::new("C", vec![])],
            ],
            column_widths: vec![50.0, 100.0],
            page: 1,
            y: 72.0,
            confidence: 0.75,
        };
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.total_width(), 150.0);
        assert!(table.is_rectangular());
    }
}
