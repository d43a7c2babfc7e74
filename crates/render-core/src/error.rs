use letterpress_layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    /// A segment uses a face the document did not declare.
    #[error("Font '{0}' is not registered with the document")]
    UnregisteredFont(String),
    #[error("Renderer used before begin_document")]
    NotStarted,
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
