//! Analysis options and heuristic configuration.

use crate::error::{Error, Result};

/// Caller-facing options for document analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Whether to run table detection
    pub detect_tables: bool,

    /// Whether to carry extracted images into the output
    pub extract_images: bool,

    /// Acceptance gate for table candidates, in [0, 1]
    pub table_confidence_threshold: f32,

    /// Password handed through to the extraction stage (unused by this core)
    pub password: Option<String>,

    /// Whether to analyze pages on parallel workers
    pub parallel: bool,

    /// Line clustering and paragraph segmentation thresholds
    pub layout: LayoutOptions,

    /// Table detection thresholds
    pub table: TableOptions,
}

impl AnalyzeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Set the table confidence threshold.
    pub fn with_table_confidence(mut self, threshold: f32) -> Self {
        self.table_confidence_threshold = threshold;
        self
    }

    /// Set the extraction-stage password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Disable parallel per-page analysis.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Replace the layout thresholds.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the table thresholds.
    pub fn with_table_options(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    /// Validate caller-supplied values.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.table_confidence_threshold) {
            return Err(Error::InvalidThreshold(self.table_confidence_threshold));
        }
        Ok(())
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            detect_tables: true,
            extract_images: true,
            table_confidence_threshold: 0.6,
            password: None,
            parallel: true,
            layout: LayoutOptions::default(),
            table: TableOptions::default(),
        }
    }
}

/// Thresholds for line clustering, paragraph segmentation, and alignment.
///
/// Exposed as named fields so property tests can probe behavior exactly at
/// each boundary.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// A fragment joins the current line when its Y deviates from the line's
    /// reference Y by at most `font_size * line_tolerance_factor`
    pub line_tolerance_factor: f32,

    /// A paragraph splits when the inter-line gap exceeds
    /// `gap_break_factor` times the page's average line spacing
    pub gap_break_factor: f32,

    /// A paragraph splits when consecutive left edges differ by more than
    /// this many source units
    pub indent_break_threshold: f32,

    /// Average line spacing assumed for pages with fewer than two lines
    pub default_line_spacing: f32,

    /// A line is justified when wider than this fraction of content width
    /// (with both margin distances within `margin_snap_distance`)
    pub justify_width_ratio: f32,

    /// Margin distance within which a line counts as flush for justify
    pub margin_snap_distance: f32,

    /// Center distance below which a line classifies as centered
    pub center_snap_distance: f32,

    /// Right-margin distance below which a line may classify as right-aligned
    pub right_snap_distance: f32,

    /// Left-margin distance a right-aligned line must exceed
    pub right_min_left_distance: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_tolerance_factor: 0.5,
            gap_break_factor: 1.5,
            indent_break_threshold: 20.0,
            default_line_spacing: 20.0,
            justify_width_ratio: 0.9,
            margin_snap_distance: 10.0,
            center_snap_distance: 20.0,
            right_snap_distance: 10.0,
            right_min_left_distance: 30.0,
        }
    }
}

/// Thresholds for column-boundary and table-region detection.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Fragment X positions are rounded into buckets of this many units
    pub bucket_size: f32,

    /// A bucket becomes a boundary candidate when its count reaches
    /// `max(min_boundary_count, boundary_line_ratio * line_count)`
    pub boundary_line_ratio: f32,

    /// Absolute floor on the bucket count for a boundary candidate
    pub min_boundary_count: usize,

    /// Candidates closer than this to their predecessor are collapsed
    pub boundary_merge_distance: f32,

    /// Slot i accepts fragments from `boundary[i] - slot_tolerance` up to
    /// the next boundary
    pub slot_tolerance: f32,

    /// Minimum occupied slots for a line to join a table-candidate run
    pub min_occupied_slots: usize,

    /// Minimum lines in a candidate run
    pub min_rows: usize,

    /// Width assigned to the last column, which has no closing boundary
    pub default_last_column_width: f32,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            bucket_size: 5.0,
            boundary_line_ratio: 0.3,
            min_boundary_count: 2,
            boundary_merge_distance: 30.0,
            slot_tolerance: 15.0,
            min_occupied_slots: 2,
            min_rows: 2,
            default_last_column_width: 100.0,
        }
    }
}
