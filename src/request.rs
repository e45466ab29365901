//! The grid request value type

use crate::Result;
use crate::constants::*;
use crate::error::GridError;
use tracing::trace;

/// All inputs to a grid fit, fixed at submission time.
///
/// Margins and gutters are expressed in baseline-line units, not points;
/// the page size and leading are in points. A request is immutable once
/// built, so fitting the same request twice yields the same result.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRequest {
    pub page_width_pt: f64,
    pub page_height_pt: f64,
    /// Leading (baseline-to-baseline distance) in points
    pub line_height_pt: f64,
    /// x-height in points; 0 means no imageline guides
    pub x_height_pt: f64,
    /// Lines in the top margin
    pub margin_top: f64,
    /// Lines in the bottom margin
    pub margin_bottom: f64,
    /// Lines in the left margin
    pub margin_left: f64,
    /// Lines in the right margin
    pub margin_right: f64,
    pub row_count: u32,
    pub column_count: u32,
    /// Lines in the row gutter
    pub h_gutter: f64,
    /// Lines in the column gutter
    pub v_gutter: f64,
    /// Replace the host page's existing guides rather than merging with them
    pub remove_existing_guides: bool,
}

impl GridRequest {
    /// Create a request with the reference configuration on an A4 page
    pub fn new() -> Self {
        Self {
            page_width_pt: A4_WIDTH,
            page_height_pt: A4_HEIGHT,
            line_height_pt: DEFAULT_LINE_HEIGHT_PT,
            x_height_pt: DEFAULT_X_HEIGHT_PT,
            margin_top: DEFAULT_MARGIN_LINES,
            margin_bottom: DEFAULT_MARGIN_LINES,
            margin_left: DEFAULT_MARGIN_LINES,
            margin_right: DEFAULT_MARGIN_LINES,
            row_count: DEFAULT_ROW_COUNT,
            column_count: DEFAULT_COLUMN_COUNT,
            h_gutter: DEFAULT_GUTTER_LINES,
            v_gutter: DEFAULT_GUTTER_LINES,
            remove_existing_guides: true,
        }
    }

    /// Set the page size in points
    pub fn with_page_size(mut self, width_pt: f64, height_pt: f64) -> Self {
        trace!("Page size set to {}x{} pt", width_pt, height_pt);
        self.page_width_pt = width_pt;
        self.page_height_pt = height_pt;
        self
    }

    /// Set the leading in points
    pub fn with_leading(mut self, line_height_pt: f64) -> Self {
        self.line_height_pt = line_height_pt;
        self
    }

    /// Set the x-height in points, enabling imageline guides
    pub fn with_x_height(mut self, x_height_pt: f64) -> Self {
        self.x_height_pt = x_height_pt;
        self
    }

    /// Set all four margins in baseline-line units (top, bottom, left, right)
    pub fn with_margins(mut self, top: f64, bottom: f64, left: f64, right: f64) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Set the number of rows
    pub fn with_rows(mut self, row_count: u32) -> Self {
        self.row_count = row_count;
        self
    }

    /// Set the number of columns
    pub fn with_columns(mut self, column_count: u32) -> Self {
        self.column_count = column_count;
        self
    }

    /// Set the row and column gutters in baseline-line units
    pub fn with_gutters(mut self, h_gutter: f64, v_gutter: f64) -> Self {
        self.h_gutter = h_gutter;
        self.v_gutter = v_gutter;
        self
    }

    /// Merge drawn guides with whatever the page already carries
    pub fn keep_existing_guides(mut self) -> Self {
        self.remove_existing_guides = false;
        self
    }

    /// Validate the request before any fit arithmetic
    pub fn validate(&self) -> Result<()> {
        if self.column_count == 0 {
            return Err(GridError::ZeroDimension("number of columns"));
        }
        if self.row_count == 0 {
            return Err(GridError::ZeroDimension("number of rows"));
        }
        if self.line_height_pt == 0.0 {
            return Err(GridError::ZeroDimension("leading"));
        }

        for (name, value) in [
            ("page width", self.page_width_pt),
            ("page height", self.page_height_pt),
            ("leading", self.line_height_pt),
            ("x-height", self.x_height_pt),
            ("top margin", self.margin_top),
            ("bottom margin", self.margin_bottom),
            ("left margin", self.margin_left),
            ("right margin", self.margin_right),
            ("row gutter", self.h_gutter),
            ("column gutter", self.v_gutter),
        ] {
            if value < 0.0 {
                return Err(GridError::NegativeValue(name));
            }
        }

        Ok(())
    }
}

impl Default for GridRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_configuration() {
        let request = GridRequest::new();
        assert_eq!(request.line_height_pt, 14.77);
        assert_eq!(request.row_count, 8);
        assert_eq!(request.column_count, 6);
        assert_eq!(request.margin_top, 2.0);
        assert!(request.remove_existing_guides);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_zero_rows_rejected() {
        let err = GridRequest::new().with_rows(0).validate().unwrap_err();
        assert!(matches!(err, GridError::ZeroDimension("number of rows")));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let err = GridRequest::new().with_columns(0).validate().unwrap_err();
        assert!(matches!(err, GridError::ZeroDimension("number of columns")));
    }

    #[test]
    fn test_zero_leading_rejected() {
        let err = GridRequest::new().with_leading(0.0).validate().unwrap_err();
        assert!(matches!(err, GridError::ZeroDimension("leading")));
    }

    #[test]
    fn test_negative_margin_rejected() {
        let err = GridRequest::new()
            .with_margins(2.0, -1.0, 2.0, 2.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GridError::NegativeValue("bottom margin")));
    }

    #[test]
    fn test_negative_gutter_rejected() {
        let err = GridRequest::new()
            .with_gutters(1.0, -0.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GridError::NegativeValue("column gutter")));
    }

    #[test]
    fn test_zero_check_precedes_negative_check() {
        // Leading of 0 with a negative margin still reports the zero first
        let err = GridRequest::new()
            .with_leading(0.0)
            .with_margins(-1.0, 2.0, 2.0, 2.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GridError::ZeroDimension("leading")));
    }
}
