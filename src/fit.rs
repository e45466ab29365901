//! Grid fitting arithmetic
//!
//! Finds integer row-line counts that tile the page's baseline grid exactly,
//! detects residual overflow, and derives the guide coordinates for a fit.

use crate::Result;
use crate::constants::{FIT_TOLERANCE_LINES, TRUNCATE_THRESHOLD_LINES};
use crate::request::GridRequest;
use tracing::{debug, trace};

/// Vertical-axis fit: integer baseline lines per row cell and the leftover
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalFit {
    /// Baseline lines per row cell after rounding to an integer count
    pub row_lines: f64,
    /// Leftover baseline lines after allocating integer row cells
    pub residual: f64,
    /// The leading that would make this row-line count fit exactly
    pub suggested_line_height_pt: f64,
}

/// Horizontal-axis fit: column units per column cell, possibly fractional
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalFit {
    pub column_lines: f64,
}

/// Outcome of a fit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FitResult {
    /// No exact tiling exists; the caller picks one of the corrections
    /// (change the leading, adjust the top/bottom margins by the given
    /// number of lines, or change the row count) and resubmits.
    Overflow {
        suggested_line_height_pt: f64,
        suggested_margin_delta_lines: f64,
    },
    /// An exact tiling with its derived metrics and guide coordinates
    Fit(GridLayout),
}

/// A fitted grid, carrying everything a host needs to apply it
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub line_height_pt: f64,
    pub cell_height_pt: f64,
    pub cell_width_pt: f64,
    /// Height over width
    pub cell_aspect_ratio: f64,
    /// Baseline grid offset from the page top (fractional part of the top margin)
    pub baseline_offset_pt: f64,
    pub page_width_pt: f64,
    pub page_height_pt: f64,
    pub margin_top_pt: f64,
    pub margin_bottom_pt: f64,
    pub margin_left_pt: f64,
    pub margin_right_pt: f64,
    /// Guide distances from the page top, top-to-bottom
    pub horizontal_guides: Vec<f64>,
    /// Guide distances from the page left edge, left-to-right
    pub vertical_guides: Vec<f64>,
}

/// Compute the vertical fit for a request.
///
/// The rounding rule is asymmetric on purpose: rounding to the nearest
/// integer is preferred because it keeps the residual smallest, but when
/// rounding up would overflow past the combined top and bottom margin
/// lines the raw value is truncated toward zero instead.
pub fn vertical_fit(request: &GridRequest) -> VerticalFit {
    let page_line_count = request.page_height_pt / request.line_height_pt;
    let row_count = f64::from(request.row_count);
    let gutter_lines = request.h_gutter * (row_count - 1.0);

    let raw_row_lines =
        (page_line_count - request.margin_top - request.margin_bottom - gutter_lines) / row_count;

    let round_up_overflow = (raw_row_lines - raw_row_lines.round()) * row_count
        + request.margin_top
        + request.margin_bottom;
    let row_lines = if round_up_overflow < TRUNCATE_THRESHOLD_LINES {
        raw_row_lines.trunc()
    } else {
        raw_row_lines.round()
    };

    let residual = page_line_count
        - request.margin_top
        - request.margin_bottom
        - row_lines * row_count
        - gutter_lines;

    let allocated_lines =
        request.margin_top + request.margin_bottom + row_lines * row_count + gutter_lines;
    let suggested_line_height_pt = request.line_height_pt * page_line_count / allocated_lines;

    trace!(
        "Vertical fit: {} lines/page, {} lines/row, residual {}",
        page_line_count, row_lines, residual
    );

    VerticalFit {
        row_lines,
        residual,
        suggested_line_height_pt,
    }
}

/// Compute the horizontal fit for a request.
///
/// The grid module is square: one line height defines the horizontal unit
/// too. The column width is used as-is, possibly fractional; only the
/// vertical axis drives the fit/overflow decision.
pub fn horizontal_fit(request: &GridRequest) -> HorizontalFit {
    let column_unit_pt = request.line_height_pt;
    let column_units_count = request.page_width_pt / column_unit_pt;
    let column_count = f64::from(request.column_count);

    let column_lines = (column_units_count
        - request.margin_left
        - request.margin_right
        - request.v_gutter * (column_count - 1.0))
        / column_count;

    trace!(
        "Horizontal fit: {} units/page, {} units/column",
        column_units_count, column_lines
    );

    HorizontalFit { column_lines }
}

/// Fit a grid to the page described by the request.
///
/// Validates the request, then decides between an exact fit and an
/// overflow. Only an exact vertical fit (residual below the tolerance)
/// produces guide coordinates.
pub fn fit(request: &GridRequest) -> Result<FitResult> {
    request.validate()?;

    debug!(
        "Fitting {}x{} grid to {}x{} pt page at {} pt leading",
        request.row_count,
        request.column_count,
        request.page_width_pt,
        request.page_height_pt,
        request.line_height_pt
    );

    let vertical = vertical_fit(request);

    if vertical.residual.abs() >= FIT_TOLERANCE_LINES {
        debug!(
            "No exact tiling: residual {} lines, suggested leading {} pt",
            vertical.residual, vertical.suggested_line_height_pt
        );
        return Ok(FitResult::Overflow {
            suggested_line_height_pt: vertical.suggested_line_height_pt,
            suggested_margin_delta_lines: vertical.residual,
        });
    }

    let horizontal = horizontal_fit(request);
    let line_height_pt = request.line_height_pt;
    let column_unit_pt = line_height_pt;
    let cell_height_pt = line_height_pt * vertical.row_lines;
    let cell_width_pt = column_unit_pt * horizontal.column_lines;

    let layout = GridLayout {
        line_height_pt,
        cell_height_pt,
        cell_width_pt,
        cell_aspect_ratio: cell_height_pt / cell_width_pt,
        baseline_offset_pt: line_height_pt * request.margin_top.fract(),
        page_width_pt: request.page_width_pt,
        page_height_pt: request.page_height_pt,
        margin_top_pt: request.margin_top * line_height_pt,
        margin_bottom_pt: request.margin_bottom * line_height_pt,
        margin_left_pt: request.margin_left * column_unit_pt,
        margin_right_pt: request.margin_right * column_unit_pt,
        horizontal_guides: horizontal_guides(request, cell_height_pt),
        vertical_guides: vertical_guides(request, cell_width_pt),
    };

    trace!("Fitted layout: {:?}", layout);
    Ok(FitResult::Fit(layout))
}

/// Build the horizontal guide sequence, top-to-bottom.
///
/// A non-zero x-height adds an imageline guide below the top of each row
/// cell, marking where x-height-aligned artwork sits.
fn horizontal_guides(request: &GridRequest, cell_height_pt: f64) -> Vec<f64> {
    let line_height_pt = request.line_height_pt;
    let gutter_pt = request.h_gutter * line_height_pt;
    let imageline = request.x_height_pt != 0.0;

    let mut guides = Vec::new();
    let mut cursor = request.margin_top * line_height_pt;
    if imageline {
        guides.push(cursor + (line_height_pt - request.x_height_pt));
    }
    for _ in 1..request.row_count {
        guides.push(cursor + cell_height_pt);
        guides.push(cursor + cell_height_pt + gutter_pt);
        if imageline {
            guides.push(cursor + cell_height_pt + gutter_pt + (line_height_pt - request.x_height_pt));
        }
        cursor += cell_height_pt + gutter_pt;
    }
    guides
}

/// Build the vertical guide sequence, left-to-right. No x-height analog.
fn vertical_guides(request: &GridRequest, cell_width_pt: f64) -> Vec<f64> {
    let column_unit_pt = request.line_height_pt;
    let gutter_pt = request.v_gutter * column_unit_pt;

    let mut guides = Vec::new();
    let mut cursor = request.margin_left * column_unit_pt;
    for _ in 1..request.column_count {
        guides.push(cursor + cell_width_pt);
        guides.push(cursor + cell_width_pt + gutter_pt);
        cursor += cell_width_pt + gutter_pt;
    }
    guides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    fn assert_strictly_increasing(guides: &[f64]) {
        for pair in guides.windows(2) {
            assert!(
                pair[0] < pair[1],
                "guides not strictly increasing: {} then {}",
                pair[0],
                pair[1]
            );
        }
    }

    /// 51 baseline lines at 14pt leading tile a 714pt page exactly:
    /// 2 + 2 margin lines, 8 rows of 5 lines, 7 single-line gutters.
    fn exact_fit_request() -> GridRequest {
        GridRequest::new()
            .with_page_size(560.0, 714.0)
            .with_leading(14.0)
    }

    #[test]
    fn test_exact_fit_produces_layout() {
        let result = fit(&exact_fit_request()).unwrap();
        let FitResult::Fit(layout) = result else {
            panic!("expected exact fit, got {result:?}");
        };

        assert_eq!(layout.cell_height_pt, 70.0);
        // 560pt page = 40 column units; (40 - 4 - 5) / 6 units per column
        assert!((layout.cell_width_pt - 14.0 * 31.0 / 6.0).abs() < 1e-9);
        assert!((layout.cell_aspect_ratio - layout.cell_height_pt / layout.cell_width_pt).abs() < 1e-12);
        assert_eq!(layout.margin_top_pt, 28.0);
        assert_eq!(layout.margin_left_pt, 28.0);
        assert_eq!(layout.baseline_offset_pt, 0.0);
    }

    #[test]
    fn test_guide_counts_without_x_height() {
        let FitResult::Fit(layout) = fit(&exact_fit_request()).unwrap() else {
            panic!("expected exact fit");
        };
        assert_eq!(layout.horizontal_guides.len(), 2 * (8 - 1));
        assert_eq!(layout.vertical_guides.len(), 2 * (6 - 1));
    }

    #[test]
    fn test_guide_counts_with_x_height() {
        let request = exact_fit_request().with_x_height(10.0);
        let FitResult::Fit(layout) = fit(&request).unwrap() else {
            panic!("expected exact fit");
        };
        assert_eq!(layout.horizontal_guides.len(), 3 * (8 - 1) + 1);
        // Vertical guides are unaffected by the x-height
        assert_eq!(layout.vertical_guides.len(), 2 * (6 - 1));
        // The first guide is the imageline of the first cell
        assert_eq!(layout.horizontal_guides[0], 28.0 + (14.0 - 10.0));
    }

    #[test]
    fn test_guides_strictly_increasing() {
        let request = exact_fit_request().with_x_height(9.0);
        let FitResult::Fit(layout) = fit(&request).unwrap() else {
            panic!("expected exact fit");
        };
        assert_strictly_increasing(&layout.horizontal_guides);
        assert_strictly_increasing(&layout.vertical_guides);

        // First row boundary sits one cell below the top margin
        assert_eq!(layout.horizontal_guides[1], 28.0 + 70.0);
        assert_eq!(layout.horizontal_guides[2], 28.0 + 70.0 + 14.0);
    }

    #[test]
    fn test_reference_configuration_overflows_800pt_page() {
        // 800 / 14.77 is about 54.16 lines; 2+2 margin lines, 8 rows of 5,
        // and 7 gutter lines allocate 51, leaving roughly 3.16 lines over.
        let request = GridRequest::new().with_page_size(595.0, 800.0);
        let result = fit(&request).unwrap();
        let FitResult::Overflow {
            suggested_line_height_pt,
            suggested_margin_delta_lines,
        } = result
        else {
            panic!("expected overflow, got {result:?}");
        };

        // leading * page_line_count collapses to the page height
        assert!((suggested_line_height_pt - 800.0 / 51.0).abs() < 1e-9);
        let expected_residual = 800.0 / 14.77 - 2.0 - 2.0 - 5.0 * 8.0 - 7.0;
        assert!((suggested_margin_delta_lines - expected_residual).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_truncates_when_margins_cannot_absorb() {
        // raw row lines = 47.2 / 8 = 5.9; rounding up to 6 would overflow
        // by -0.8 lines with no margin to absorb it, so truncate to 5.
        let request = GridRequest::new()
            .with_page_size(595.0, 472.0)
            .with_leading(10.0)
            .with_margins(0.0, 0.0, 0.0, 0.0)
            .with_gutters(0.0, 0.0);
        let vertical = vertical_fit(&request);

        assert_eq!(vertical.row_lines, 5.0);
        assert!((vertical.residual - 7.2).abs() < 1e-9);
        assert!((vertical.suggested_line_height_pt - 472.0 / 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_rounds_up_when_margins_absorb() {
        // Same 5.9 raw row lines, but 2+2 margin lines absorb the -0.8
        // overflow, so nearest-integer rounding wins.
        let request = GridRequest::new()
            .with_page_size(595.0, 512.0)
            .with_leading(10.0)
            .with_gutters(0.0, 0.0);
        let vertical = vertical_fit(&request);

        assert_eq!(vertical.row_lines, 6.0);
        assert!((vertical.residual - -0.8).abs() < 1e-9);
        assert!((vertical.suggested_line_height_pt - 512.0 / 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_overflow_suggestion_consistency() {
        let request = GridRequest::new().with_page_size(595.0, 800.0);
        let vertical = vertical_fit(&request);
        let allocated = request.margin_top
            + request.margin_bottom
            + vertical.row_lines * f64::from(request.row_count)
            + request.h_gutter * f64::from(request.row_count - 1);
        let page_line_count = request.page_height_pt / request.line_height_pt;

        assert!(
            (vertical.suggested_line_height_pt * allocated
                - request.line_height_pt * page_line_count)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_square_unit_couples_both_axes() {
        // The horizontal unit is the leading, so changing the leading
        // rescales the column arithmetic too.
        let narrow = horizontal_fit(&exact_fit_request());
        let wide = horizontal_fit(&exact_fit_request().with_leading(28.0));

        assert!((narrow.column_lines - 31.0 / 6.0).abs() < 1e-9);
        assert!((wide.column_lines - (560.0 / 28.0 - 4.0 - 5.0) / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let request = exact_fit_request().with_x_height(8.5);
        let first = fit(&request).unwrap();
        let second = fit(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validation_runs_before_overflow_logic() {
        // Negative margin on a page that would also overflow reports the
        // validation error, never an overflow suggestion.
        let request = GridRequest::new()
            .with_page_size(595.0, 800.0)
            .with_margins(-2.0, 2.0, 2.0, 2.0);
        let err = fit(&request).unwrap_err();
        assert!(matches!(err, GridError::NegativeValue("top margin")));
    }

    #[test]
    fn test_fractional_top_margin_sets_baseline_offset() {
        // 2.5 margin lines keep the tiling exact if the page grows by a
        // line: 51.5 lines at 14pt on a 721pt page, margins 2.5 + 2.0.
        let request = GridRequest::new()
            .with_page_size(560.0, 721.0)
            .with_leading(14.0)
            .with_margins(2.5, 2.0, 2.0, 2.0);
        let FitResult::Fit(layout) = fit(&request).unwrap() else {
            panic!("expected exact fit");
        };
        assert!((layout.baseline_offset_pt - 7.0).abs() < 1e-9);
        assert_eq!(layout.margin_top_pt, 35.0);
    }

    #[test]
    fn test_single_row_and_column_emit_no_guides() {
        // One row of 47 lines: 51 lines total with the 2+2 margins.
        let request = GridRequest::new()
            .with_page_size(560.0, 714.0)
            .with_leading(14.0)
            .with_rows(1)
            .with_columns(1);
        let FitResult::Fit(layout) = fit(&request).unwrap() else {
            panic!("expected exact fit");
        };
        assert!(layout.horizontal_guides.is_empty());
        assert!(layout.vertical_guides.is_empty());
        assert_eq!(layout.cell_height_pt, 14.0 * 47.0);
    }
}
