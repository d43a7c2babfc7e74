use crate::error::PipelineError;
use letterpress_layout::LayoutConfig;
use letterpress_types::{DocumentStyle, Margins, PageSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How styling reaches the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Markup is stripped and the document style applies to every line. (Default)
    #[default]
    Plain,
    /// Bold, italic and underline spans in the markup are kept and combined
    /// with the document style.
    Rich,
}

/// Settings shared by every document a pipeline renders.
///
/// ```json
/// { "page_size": "Letter", "margins": "20mm", "render_mode": "rich",
///   "style": { "family": "times", "size": 12 } }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    pub render_mode: RenderMode,
    /// Overrides the template title in the PDF metadata.
    pub title: Option<String>,
    /// Style used when the caller does not supply one.
    pub style: DocumentStyle,
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new(self.page_size, self.margins)
    }
}
