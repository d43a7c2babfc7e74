use crate::font::Emphasis;
use serde::{Deserialize, Serialize};

/// A stretch of text sharing one emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub emphasis: Emphasis,
}

impl TextRun {
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self { text: text.into(), emphasis }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::NONE)
    }
}
