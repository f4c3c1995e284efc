use crate::model::ModelError;

/// Errors that abort report rendering; no partial document is returned
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The sample cannot be reported
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ModelError),

    /// Error from the PDF object model
    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    /// The drawing surface rejected an operation
    #[error("Drawing surface error: {0}")]
    Surface(String),
}
