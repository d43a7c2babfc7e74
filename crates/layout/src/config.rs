use crate::LayoutError;
use letterpress_types::{Margins, PageSize, Size};

/// Smallest line advance, whatever the font size.
pub const MIN_LINE_HEIGHT: f32 = 6.0;
/// Distance from the top of a line to its baseline, as a fraction of the font size.
pub const BASELINE_RATIO: f32 = 0.8;
/// Distance of the underline rule below the baseline, as a fraction of the font size.
pub const UNDERLINE_OFFSET_RATIO: f32 = 0.15;
/// Extra advance after a blank line, as a fraction of the line height.
pub const BLANK_LINE_EXTRA: f32 = 0.5;

/// Line advance for `font_size`: `max(6, round(size * 1.3))`.
pub fn line_height(font_size: f32) -> f32 {
    (font_size * 1.3).round().max(MIN_LINE_HEIGHT)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub margins: Margins,
}

impl LayoutConfig {
    pub fn new(page_size: PageSize, margins: Margins) -> Self {
        Self { page_size, margins }
    }

    pub fn page_dimensions(&self) -> Size {
        self.page_size.dimensions_pt()
    }

    pub fn printable_width(&self) -> f32 {
        self.page_dimensions().width - self.margins.horizontal()
    }

    pub fn printable_height(&self) -> f32 {
        self.page_dimensions().height - self.margins.vertical()
    }

    /// Rejects pages that leave no room for text.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let width = self.printable_width();
        if !(width > 0.0) {
            return Err(LayoutError::InvalidGeometry(format!(
                "printable width is {:.2}pt after margins",
                width
            )));
        }
        let height = self.printable_height();
        if !(height > 0.0) {
            return Err(LayoutError::InvalidGeometry(format!(
                "printable height is {:.2}pt after margins",
                height
            )));
        }
        Ok(())
    }
}
