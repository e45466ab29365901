//! A baseline-aligned typographic grid calculator with guide drawing built on lopdf
//!
//! This library fits a grid of rows and columns to a page's baseline grid:
//! margins and gutters are given in baseline-line units, and the fitter finds
//! an integer number of baseline lines per row cell that tiles the page
//! exactly. When no exact tiling exists it reports the leftover lines along
//! with a corrected leading, so the caller can adjust and resubmit. A
//! successful fit can be rendered as guide lines into a PDF page.

use lopdf::{Document, ObjectId, content::Operation};
use tracing::{debug, instrument};

pub mod constants;
mod drawing;
pub mod error;
pub mod fit;
pub mod request;
pub mod style;

pub use error::{GridError, Result};
pub use fit::{FitResult, GridLayout, HorizontalFit, VerticalFit, fit, horizontal_fit, vertical_fit};
pub use request::GridRequest;
pub use style::{Color, GuideStyle};

/// Extension trait for lopdf::Document to add grid drawing capabilities
pub trait GuideDrawing {
    /// Fit a grid to a page and draw its guides on an exact fit
    ///
    /// The page size is read from the page's MediaBox, overriding whatever
    /// the request carries. On an exact fit the guides are drawn and the
    /// layout is returned; on overflow the document is left untouched and
    /// the corrective suggestions are returned for the caller to act on.
    fn draw_grid(
        &mut self,
        page_id: ObjectId,
        request: &GridRequest,
        style: &GuideStyle,
    ) -> Result<FitResult>;

    /// Draw an already-fitted layout onto a page
    ///
    /// With `remove_existing` the page's previous content is replaced;
    /// otherwise the guides are drawn over it.
    fn apply_grid(
        &mut self,
        page_id: ObjectId,
        layout: &GridLayout,
        style: &GuideStyle,
        remove_existing: bool,
    ) -> Result<()>;

    /// Create guide content operations without adding to document
    ///
    /// Useful for combining the guides with other content
    fn create_grid_content(&self, layout: &GridLayout, style: &GuideStyle)
    -> Result<Vec<Operation>>;
}

impl GuideDrawing for Document {
    #[instrument(skip(self, request, style), fields(rows = request.row_count, columns = request.column_count))]
    fn draw_grid(
        &mut self,
        page_id: ObjectId,
        request: &GridRequest,
        style: &GuideStyle,
    ) -> Result<FitResult> {
        let (page_width, page_height) = drawing::page_size(self, page_id)?;
        let request = request.clone().with_page_size(page_width, page_height);

        let result = fit::fit(&request)?;
        match &result {
            FitResult::Fit(layout) => {
                self.apply_grid(page_id, layout, style, request.remove_existing_guides)?;
            }
            FitResult::Overflow {
                suggested_line_height_pt,
                suggested_margin_delta_lines,
            } => {
                debug!(
                    "Grid does not fit page {:?}: change leading to {} pt or margins by {} lines",
                    page_id, suggested_line_height_pt, suggested_margin_delta_lines
                );
            }
        }
        Ok(result)
    }

    #[instrument(skip(self, layout, style))]
    fn apply_grid(
        &mut self,
        page_id: ObjectId,
        layout: &GridLayout,
        style: &GuideStyle,
        remove_existing: bool,
    ) -> Result<()> {
        let operations = drawing::generate_guide_operations(layout, style);
        drawing::apply_guide_operations(self, page_id, operations, remove_existing)
    }

    fn create_grid_content(
        &self,
        layout: &GridLayout,
        style: &GuideStyle,
    ) -> Result<Vec<Operation>> {
        Ok(drawing::generate_guide_operations(layout, style))
    }
}
