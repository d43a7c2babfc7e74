use super::config::{PipelineConfig, RenderMode};
use super::orchestrator::LetterPipeline;
use crate::error::PipelineError;
use letterpress_layout::{Paginator, StandardFontMetrics, TextMeasurer};
use letterpress_types::{DocumentStyle, Margins, PageSize};
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a `LetterPipeline`.
pub struct PipelineBuilder {
    config: PipelineConfig,
    measurer: Option<Arc<dyn TextMeasurer>>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self { config: PipelineConfig::default(), measurer: None }
    }
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder`: A4, 20mm margins, plain rendering.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = PipelineConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.config.render_mode = mode;
        self
    }

    /// Sets the title written to the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Sets the style used by [`LetterPipeline::render_default`].
    pub fn with_style(mut self, style: DocumentStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Replaces the standard font metrics used for wrapping.
    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self
    }

    /// Consumes the builder and creates the `LetterPipeline`, rejecting page
    /// geometry that leaves no room for text and an out-of-range default style.
    pub fn build(self) -> Result<LetterPipeline, PipelineError> {
        let layout_config = self.config.layout_config();
        layout_config.validate()?;
        self.config.style.validate()?;

        let measurer = self.measurer.unwrap_or_else(|| Arc::new(StandardFontMetrics::new()));
        log::debug!(
            "Building pipeline: {:?} page, {:?} mode",
            self.config.page_size,
            self.config.render_mode
        );
        Ok(LetterPipeline::new(self.config, Paginator::new(layout_config, measurer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterpress_layout::LayoutError;
    use letterpress_render_core::RenderError;
    use letterpress_types::StyleError;

    #[test]
    fn builder_overrides_apply() {
        let pipeline = PipelineBuilder::new()
            .with_page_size(PageSize::Letter)
            .with_render_mode(RenderMode::Rich)
            .with_title("Custom")
            .build()
            .unwrap();
        assert_eq!(pipeline.config().page_size, PageSize::Letter);
        assert_eq!(pipeline.config().render_mode, RenderMode::Rich);
        assert_eq!(pipeline.config().title.as_deref(), Some("Custom"));
    }

    #[test]
    fn impossible_margins_fail_at_build_time() {
        let result = PipelineBuilder::new().with_margins(Margins::all(400.0)).build();
        assert!(matches!(
            result,
            Err(PipelineError::Render(RenderError::Layout(LayoutError::InvalidGeometry(_))))
        ));
    }

    #[test]
    fn out_of_range_default_style_fails_at_build_time() {
        let result = PipelineBuilder::new().with_style(DocumentStyle::default().with_size(40)).build();
        assert!(matches!(result, Err(PipelineError::Style(StyleError::FontSizeOutOfRange(40)))));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let result = PipelineBuilder::new().with_config_file("/definitely/not/here.json");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
