//! Core rendering abstractions for letterpress PDF output.
//!
//! - `DocumentRenderer` trait for abstracting PDF writing operations
//! - `render_paginated`, which drives a renderer over a `PaginatedOutput`
//! - Error types for rendering operations
//! - Shared helpers for text encoding and coordinate conversion

mod error;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use traits::{DocumentRenderer, render_paginated};
