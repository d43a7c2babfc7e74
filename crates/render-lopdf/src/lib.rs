//! PDF renderer for letterpress documents using lopdf.
//!
//! Pages are written through a streaming writer that emits each content
//! stream as soon as it is produced. Fonts are the standard Type1 faces, so
//! nothing is embedded.

mod helpers;
mod renderer;
mod writer;

pub use helpers::{pdf_text_string, render_page_to_content};
pub use renderer::LopdfRenderer;
pub use writer::StreamingPdfWriter;
