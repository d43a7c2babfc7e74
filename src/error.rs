use letterpress_catalog::CatalogError;
use letterpress_layout::LayoutError;
use letterpress_render_core::RenderError;
use letterpress_types::StyleError;
use thiserror::Error;

/// A comprehensive error type for letter generation and export.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Please fill in all required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("The letter has no content to export")]
    EmptyContent,

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid style: {0}")]
    Style(#[from] StyleError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LayoutError> for PipelineError {
    fn from(e: LayoutError) -> Self {
        PipelineError::Render(RenderError::Layout(e))
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Config(e.to_string())
    }
}
