//! Letter rendering pipeline.
//!
//! - [`PipelineBuilder`]: fluent builder over a [`PipelineConfig`]
//! - [`LetterPipeline`]: lays out letter text and writes PDF files
//! - [`RenderMode`]: whole-document styling or per-span emphasis
//!
//! # Example
//!
//! ```no_run
//! use letterpress::{DocumentStyle, PipelineBuilder};
//!
//! let pipeline = PipelineBuilder::new().with_title("Notice").build()?;
//! let output = pipeline.render_document("Dear Sir,\n\nRegards", &DocumentStyle::default())?;
//! pipeline.save(&output, "Notice", std::path::Path::new("."), "notice.pdf")?;
//! # Ok::<(), letterpress::PipelineError>(())
//! ```

mod builder;
pub mod config;
mod orchestrator;

pub use builder::PipelineBuilder;
pub use config::{PipelineConfig, RenderMode};
pub use orchestrator::LetterPipeline;
