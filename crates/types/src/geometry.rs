//! Page geometry in PDF points (1/72 inch).
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};
use std::str::FromStr;

/// Converts millimetres to points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Points per unit for the length suffixes accepted in configuration.
const UNITS: [(&str, f32); 4] = [("pt", 1.0), ("mm", 72.0 / 25.4), ("cm", 72.0 / 2.54), ("in", 72.0)];

/// Parses `"12"`, `"12pt"`, `"20mm"`, `"2cm"` or `"1in"` into points.
fn parse_length(input: &str) -> Result<f32, String> {
    let input = input.trim();
    let (number, scale) = UNITS
        .iter()
        .find_map(|(suffix, scale)| input.strip_suffix(*suffix).map(|n| (n.trim(), *scale)))
        .unwrap_or((input, 1.0));
    number
        .parse::<f32>()
        .map(|n| n * scale)
        .map_err(|e| format!("Invalid length '{}': {}", input, e))
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Page margins in points.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::all(mm_to_pt(20.0))
    }
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// CSS-style shorthand: `"20mm"`, `"10pt 20pt"` (vertical, horizontal) or
    /// four values clockwise from the top.
    pub fn parse_shorthand(input: &str) -> Result<Self, String> {
        let values = input.split_whitespace().map(parse_length).collect::<Result<Vec<_>, _>>()?;
        match values[..] {
            [all] => Ok(Margins::all(all)),
            [vertical, horizontal] => {
                Ok(Margins { top: vertical, right: horizontal, bottom: vertical, left: horizontal })
            }
            [top, right, bottom, left] => Ok(Margins { top, right, bottom, left }),
            _ => Err(format!("Margins take 1, 2 or 4 lengths, got {}", values.len())),
        }
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MarginsDef {
            Uniform(f32),
            Shorthand(String),
            Sides { top: Option<f32>, right: Option<f32>, bottom: Option<f32>, left: Option<f32> },
        }

        let default = Margins::default();
        match MarginsDef::deserialize(deserializer)? {
            MarginsDef::Uniform(value) => Ok(Margins::all(value)),
            MarginsDef::Shorthand(s) => Margins::parse_shorthand(&s).map_err(de::Error::custom),
            MarginsDef::Sides { top, right, bottom, left } => Ok(Margins {
                top: top.unwrap_or(default.top),
                right: right.unwrap_or(default.right),
                bottom: bottom.unwrap_or(default.bottom),
                left: left.unwrap_or(default.left),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
            PageSize::Custom { width, height } => Size::new(*width, *height),
        }
    }

    /// The paper name, or `None` for custom dimensions.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            PageSize::A4 => Some("A4"),
            PageSize::Letter => Some("Letter"),
            PageSize::Legal => Some("Legal"),
            PageSize::Custom { .. } => None,
        }
    }

    /// Case-insensitive paper name: `A4`, `Letter` or `Legal`.
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse()
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [PageSize::A4, PageSize::Letter, PageSize::Legal]
            .into_iter()
            .find(|size| size.name().is_some_and(|name| name.eq_ignore_ascii_case(s.trim())))
            .ok_or_else(|| format!("Unknown page size '{}', expected A4, Letter or Legal", s))
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match (self.name(), self.dimensions_pt()) {
            (Some(name), _) => serializer.serialize_str(name),
            (None, size) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", &size.width)?;
                map.serialize_entry("height", &size.height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Named(String),
            Custom { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Named(name) => name.parse().map_err(de::Error::custom),
            PageSizeDef::Custom { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}
