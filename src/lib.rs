//! Letter generation: pick a template from a catalog, fill in its fields and
//! export a paginated PDF.
//!
//! The work is split across the workspace crates:
//!
//! - `letterpress-catalog`: letter templates, regions and the browse queries
//! - `letterpress-template`: `{{key}}` and `{{#if key}}` substitution
//! - `letterpress-markup`: markup normalization and the rich-text model
//! - `letterpress-layout`: line wrapping and pagination
//! - `letterpress-render-lopdf`: PDF output with the standard fonts
//!
//! This crate ties them together through [`LetterSession`] (the state of one
//! letter being filled in) and [`LetterPipeline`] (rendering and saving).
//!
//! ```no_run
//! use letterpress::{InMemoryCatalog, LetterSession, PipelineBuilder, Region, TemplateCatalog};
//!
//! let catalog = InMemoryCatalog::builtin()?;
//! let template = catalog.require("cheque-book-request")?.clone();
//! let mut session = LetterSession::start(template, Region::Uk);
//! session.set_field("name", "Ada Lovelace");
//! session.set_field("accountNumber", "12345678");
//! session.set_field("branchName", "Marylebone");
//!
//! let pipeline = PipelineBuilder::new().build()?;
//! let path = pipeline.export(&session, std::path::Path::new("."))?;
//! println!("Saved {}", path.display());
//! # Ok::<(), letterpress::PipelineError>(())
//! ```

pub mod error;
pub mod export;
pub mod pipeline;
pub mod session;

pub use error::PipelineError;
pub use export::{document_filename, persist_atomically};
pub use pipeline::{LetterPipeline, PipelineBuilder, PipelineConfig, RenderMode};
pub use session::LetterSession;

pub use letterpress_catalog::{
    CatalogError, CatalogQuery, FieldDefinition, FieldKind, InMemoryCatalog, LetterTemplate, Region,
    TemplateCatalog, categories, select,
};
pub use letterpress_layout::{LayoutError, PaginatedOutput};
pub use letterpress_markup::{EditCommand, RichDocument};
pub use letterpress_render_core::RenderError;
pub use letterpress_template::{FieldMap, format_date, render};
pub use letterpress_types::{DocumentStyle, Emphasis, FontFamily, Margins, PageSize, StyleError};
