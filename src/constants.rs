//! Constants for page dimensions and the reference grid configuration

/// Standard A4 page width in points
pub const A4_WIDTH: f64 = 595.0;

/// Standard A4 page height in points
pub const A4_HEIGHT: f64 = 842.0;

/// US Letter page width in points
pub const LETTER_WIDTH: f64 = 612.0;

/// US Letter page height in points
pub const LETTER_HEIGHT: f64 = 792.0;

/// Default leading (baseline-to-baseline distance) in points
pub const DEFAULT_LINE_HEIGHT_PT: f64 = 14.77;

/// Default x-height in points; 0 disables imageline guides
pub const DEFAULT_X_HEIGHT_PT: f64 = 0.0;

/// Default margin on every side, in baseline-line units
pub const DEFAULT_MARGIN_LINES: f64 = 2.0;

/// Default number of grid rows
pub const DEFAULT_ROW_COUNT: u32 = 8;

/// Default number of grid columns
pub const DEFAULT_COLUMN_COUNT: u32 = 6;

/// Default gutter between cells, in baseline-line units
pub const DEFAULT_GUTTER_LINES: f64 = 1.0;

/// A residual below this many baseline lines counts as an exact fit
pub const FIT_TOLERANCE_LINES: f64 = 0.01;

/// Rounding up past this negative overflow (in lines) forces truncation instead
pub const TRUNCATE_THRESHOLD_LINES: f64 = -0.01;

/// Default stroke width for guide lines, in points
pub const DEFAULT_GUIDE_WIDTH: f64 = 0.25;

/// Default stroke width for the margin box, in points
pub const DEFAULT_MARGIN_BOX_WIDTH: f64 = 0.5;
