//! The laid-out document, ready for a renderer. Coordinates are in points
//! with the origin at the top-left corner of the page and `y` growing down.

use letterpress_types::{FontFace, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedOutput {
    pub page_size: Size,
    pub pages: Vec<Page>,
}

impl PaginatedOutput {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every face used by at least one non-blank segment, in order of first use.
    pub fn faces(&self) -> Vec<FontFace> {
        let mut faces = Vec::new();
        for segment in self.segments() {
            if !segment.text.is_empty() && !faces.contains(&segment.face) {
                faces.push(segment.face);
            }
        }
        faces
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.pages.iter().flat_map(|p| p.lines.iter()).flat_map(|l| l.segments.iter())
    }

    /// The visible text, one entry per placed line.
    pub fn line_texts(&self) -> Vec<String> {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .map(PositionedLine::text)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub lines: Vec<PositionedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub x: f32,
    /// Top of the line box.
    pub y: f32,
    pub baseline: f32,
    pub height: f32,
    pub segments: Vec<Segment>,
}

impl PositionedLine {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| s.text.trim().is_empty())
    }
}

/// A stretch of a line set in a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub face: FontFace,
    pub font_size: f32,
    /// Absolute horizontal position.
    pub x: f32,
    pub width: f32,
    pub underline: bool,
}
