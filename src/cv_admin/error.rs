//! Error types for the CV screen.

use thiserror::Error;

/// Reasons a CV file is rejected before upload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CvError {
    #[error("the file is empty")]
    Empty,

    #[error("only PDF files can be uploaded")]
    NotPdf,

    #[error("the file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}
