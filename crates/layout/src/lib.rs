use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Line has a height of {0:.2} which exceeds the total page content height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
    #[error("Text measurement failed: {0}")]
    Measurement(String),
}

pub mod config;
pub mod metrics;
pub mod output;
pub mod paginator;
pub mod wrapper;

pub use self::config::{LayoutConfig, line_height};
pub use self::metrics::{StandardFontMetrics, TextMeasurer};
pub use self::output::{Page, PaginatedOutput, PositionedLine, Segment};
pub use self::paginator::Paginator;
pub use self::wrapper::{WrappedLine, WrappedPiece, wrap_line};
