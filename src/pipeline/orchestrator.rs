use super::config::{PipelineConfig, RenderMode};
use crate::error::PipelineError;
use crate::export::persist_atomically;
use crate::session::LetterSession;
use letterpress_layout::{PaginatedOutput, Paginator};
use letterpress_markup::{RichDocument, has_markup, to_plain_text};
use letterpress_render_lopdf::LopdfRenderer;
use letterpress_types::DocumentStyle;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Turns letter text into paginated output and PDF files.
///
/// The pipeline holds only its configuration and the paginator, so one
/// instance can serve any number of documents, from any thread.
#[derive(Debug)]
pub struct LetterPipeline {
    config: PipelineConfig,
    paginator: Paginator,
}

impl LetterPipeline {
    pub(super) fn new(config: PipelineConfig, paginator: Paginator) -> Self {
        Self { config, paginator }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Lays out `content` (plain text or markup) with `style`.
    pub fn render_document(&self, content: &str, style: &DocumentStyle) -> Result<PaginatedOutput, PipelineError> {
        let output = match self.config.render_mode {
            RenderMode::Plain => {
                let text = to_plain_text(content);
                if text.trim().is_empty() {
                    return Err(PipelineError::EmptyContent);
                }
                style.validate()?;
                self.paginator.paginate_text(&text, style)?
            }
            RenderMode::Rich => {
                let document = if has_markup(content) {
                    RichDocument::from_markup(content)
                } else {
                    RichDocument::from_plain(content)
                };
                return self.render_rich(&document, style);
            }
        };
        debug!("Laid out {} page(s)", output.page_count());
        Ok(output)
    }

    /// Lays out an edited document, keeping each run's emphasis.
    pub fn render_rich(&self, document: &RichDocument, style: &DocumentStyle) -> Result<PaginatedOutput, PipelineError> {
        if document.to_plain_text().trim().is_empty() {
            return Err(PipelineError::EmptyContent);
        }
        style.validate()?;
        let output = self.paginator.paginate(&document.lines(), style)?;
        debug!("Laid out {} page(s) from {} run(s)", output.page_count(), document.len());
        Ok(output)
    }

    /// Lays out `content` with the configured default style.
    pub fn render_default(&self, content: &str) -> Result<PaginatedOutput, PipelineError> {
        self.render_document(content, &self.config.style)
    }

    /// Produces the PDF bytes. A configured title takes precedence over `title`.
    pub fn write_pdf(&self, output: &PaginatedOutput, title: &str) -> Result<Vec<u8>, PipelineError> {
        let title = self.config.title.as_deref().unwrap_or(title);
        Ok(LopdfRenderer::render_to_vec(output, title)?)
    }

    /// Generates the PDF in memory, then persists it as `dir/filename`.
    pub fn save(
        &self,
        output: &PaginatedOutput,
        title: &str,
        dir: &Path,
        filename: &str,
    ) -> Result<PathBuf, PipelineError> {
        let bytes = self.write_pdf(output, title)?;
        Ok(persist_atomically(dir, filename, &bytes)?)
    }

    /// Validates the session, renders its letter and saves it under `dir`
    /// using the session's filename.
    pub fn export(&self, session: &LetterSession, dir: &Path) -> Result<PathBuf, PipelineError> {
        let start = Instant::now();
        session.validate()?;
        let text = session.preview()?;
        debug!("Resolved '{}' to {} chars", session.template().id, text.len());

        let output = self.render_document(&text, session.style())?;
        let path = self.save(&output, &session.template().title, dir, &session.filename())?;
        info!(
            "Exported '{}' ({} page(s)) to {} in {:.2?}",
            session.template().id,
            output.page_count(),
            path.display(),
            start.elapsed()
        );
        Ok(path)
    }
}
