use crate::font::{Emphasis, FontFace, FontFamily};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_FONT_SIZE: u16 = 8;
pub const MAX_FONT_SIZE: u16 = 32;
pub const DEFAULT_FONT_SIZE: u16 = 11;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("Font size {0} is outside the supported range 8..=32")]
    FontSizeOutOfRange(u16),
}

/// Whole-document style chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyle {
    pub family: FontFamily,
    pub size: u16,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            family: FontFamily::default(),
            size: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl DocumentStyle {
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    pub fn with_size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        if (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.size) {
            Ok(())
        } else {
            Err(StyleError::FontSizeOutOfRange(self.size))
        }
    }

    pub fn emphasis(&self) -> Emphasis {
        Emphasis { bold: self.bold, italic: self.italic, underline: self.underline }
    }

    pub fn face(&self) -> FontFace {
        FontFace::new(self.family, self.emphasis())
    }

    pub fn font_size(&self) -> f32 {
        f32::from(self.size)
    }
}
