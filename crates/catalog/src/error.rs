use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template '{id}' has no body for region {region}")]
    MissingRegion { id: String, region: String },

    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err.to_string())
    }
}
