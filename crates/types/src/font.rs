use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of font families a letter can be set in.
///
/// All three map onto the PDF standard Type1 fonts, so no font program is
/// embedded and every viewer can display the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "helvetica",
            FontFamily::Times => "times",
            FontFamily::Courier => "courier",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "helvetica" | "sans" | "sans-serif" => Ok(FontFamily::Helvetica),
            "times" | "times-roman" | "serif" => Ok(FontFamily::Times),
            "courier" | "mono" | "monospace" => Ok(FontFamily::Courier),
            other => Err(format!("Unknown font family: {}", other)),
        }
    }
}

/// Character-level emphasis flags. Bold and italic combine into a font face;
/// underline is drawn separately as a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Emphasis {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl Emphasis {
    pub const NONE: Emphasis = Emphasis { bold: false, italic: false, underline: false };

    /// Flags set in either operand.
    pub fn union(self, other: Emphasis) -> Emphasis {
        Emphasis {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
        }
    }
}

/// A concrete face: family plus weight/slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontFace {
    pub family: FontFamily,
    pub bold: bool,
    pub italic: bool,
}

impl FontFace {
    pub fn new(family: FontFamily, emphasis: Emphasis) -> Self {
        Self { family, bold: emphasis.bold, italic: emphasis.italic }
    }

    /// The PostScript name of the matching standard font.
    pub fn postscript_name(&self) -> &'static str {
        match (self.family, self.bold, self.italic) {
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Times, false, false) => "Times-Roman",
            (FontFamily::Times, true, false) => "Times-Bold",
            (FontFamily::Times, false, true) => "Times-Italic",
            (FontFamily::Times, true, true) => "Times-BoldItalic",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }
}
