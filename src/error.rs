//! Error types for the baseline-grid library

use lopdf::ObjectId;
use thiserror::Error;

/// Result type alias using GridError
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur when fitting or drawing a grid
#[derive(Debug, Error)]
pub enum GridError {
    /// A count or the leading is zero, so no grid can be derived
    #[error("{0} cannot be 0")]
    ZeroDimension(&'static str),

    /// A numeric input is negative
    #[error("negative {0} is not allowed")]
    NegativeValue(&'static str),

    /// Error from the underlying lopdf library
    #[error("PDF operation failed: {0}")]
    PdfError(#[from] lopdf::Error),

    /// Page not found
    #[error("Page with ID {0:?} not found")]
    PageNotFound(ObjectId),

    /// Neither the page nor its ancestors carry a MediaBox to read the page size from
    #[error("Page with ID {0:?} has no MediaBox")]
    MissingMediaBox(ObjectId),
}
