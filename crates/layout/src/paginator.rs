use crate::LayoutError;
use crate::config::{BASELINE_RATIO, BLANK_LINE_EXTRA, LayoutConfig, line_height};
use crate::metrics::TextMeasurer;
use crate::output::{Page, PaginatedOutput, PositionedLine, Segment};
use crate::wrapper::wrap_line;
use letterpress_types::{DocumentStyle, FontFace, TextRun};
use log::debug;
use std::sync::Arc;

/// Tolerance for the page-fit check.
const EPSILON: f32 = 0.01;

/// Flows logical lines onto pages top to bottom.
#[derive(Clone)]
pub struct Paginator {
    config: LayoutConfig,
    measurer: Arc<dyn TextMeasurer>,
}

impl Paginator {
    pub fn new(config: LayoutConfig, measurer: Arc<dyn TextMeasurer>) -> Self {
        Self { config, measurer }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out plain text, one logical line per `\n`.
    pub fn paginate_text(&self, text: &str, style: &DocumentStyle) -> Result<PaginatedOutput, LayoutError> {
        let lines: Vec<Vec<TextRun>> = text
            .split('\n')
            .map(|line| {
                let line = line.trim_end_matches('\r');
                if line.is_empty() { Vec::new() } else { vec![TextRun::plain(line)] }
            })
            .collect();
        self.paginate(&lines, style)
    }

    /// Lays out logical lines of styled runs. Each run's emphasis is combined
    /// with the emphasis of `style`.
    ///
    /// A line that would end below the bottom margin moves to a new page,
    /// unless the page is still empty. A blank logical line adds half a line
    /// of extra space after itself.
    pub fn paginate(&self, lines: &[Vec<TextRun>], style: &DocumentStyle) -> Result<PaginatedOutput, LayoutError> {
        self.config.validate()?;

        let page_size = self.config.page_dimensions();
        let margins = self.config.margins;
        let font_size = style.font_size();
        let advance = line_height(font_size);
        let printable_height = self.config.printable_height();
        if advance > printable_height + EPSILON {
            return Err(LayoutError::ElementTooLarge(advance, printable_height));
        }
        let bottom = page_size.height - margins.bottom;
        let max_width = self.config.printable_width();
        let base = style.emphasis();

        let mut pages = Vec::new();
        let mut current = Page::default();
        let mut cursor = margins.top;

        for logical in lines {
            let runs: Vec<TextRun> = logical
                .iter()
                .map(|run| TextRun::new(run.text.clone(), run.emphasis.union(base)))
                .collect();
            let blank = logical.iter().all(|run| run.text.trim().is_empty());

            for wrapped in wrap_line(&runs, style.family, font_size, max_width, self.measurer.as_ref())? {
                if cursor + advance > bottom + EPSILON && !current.lines.is_empty() {
                    debug!(
                        "Page {} is full after {} lines, starting a new page",
                        pages.len() + 1,
                        current.lines.len()
                    );
                    pages.push(std::mem::take(&mut current));
                    cursor = margins.top;
                }

                let segments = wrapped
                    .pieces
                    .into_iter()
                    .map(|piece| Segment {
                        face: FontFace::new(style.family, piece.emphasis),
                        font_size,
                        x: margins.left + piece.x,
                        width: piece.width,
                        underline: piece.emphasis.underline,
                        text: piece.text,
                    })
                    .collect();
                current.lines.push(PositionedLine {
                    x: margins.left,
                    y: cursor,
                    baseline: cursor + font_size * BASELINE_RATIO,
                    height: advance,
                    segments,
                });
                cursor += advance;
            }

            if blank {
                cursor += advance * BLANK_LINE_EXTRA;
            }
        }

        if !current.lines.is_empty() || pages.is_empty() {
            pages.push(current);
        }
        debug!("Paginated {} logical lines into {} pages", lines.len(), pages.len());

        Ok(PaginatedOutput { page_size, pages })
    }
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator").field("config", &self.config).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::StandardFontMetrics;
    use letterpress_types::{Emphasis, FontFamily, Margins, PageSize};

    fn paginator(width: f32, height: f32, margin: f32) -> Paginator {
        Paginator::new(
            LayoutConfig::new(PageSize::Custom { width, height }, Margins::all(margin)),
            Arc::new(StandardFontMetrics::new()),
        )
    }

    fn lines_of(n: usize) -> String {
        vec!["x"; n].join("\n")
    }

    #[test]
    fn page_holds_floor_of_printable_height_over_line_height() {
        // 160pt printable, 14pt lines at 11pt: 11 lines fit.
        let p = paginator(200.0, 200.0, 20.0);
        let style = DocumentStyle::default();
        assert_eq!(line_height(style.font_size()), 14.0);

        let fits = p.paginate_text(&lines_of(11), &style).unwrap();
        assert_eq!(fits.page_count(), 1);
        assert_eq!(fits.pages[0].lines.len(), 11);

        let spills = p.paginate_text(&lines_of(12), &style).unwrap();
        assert_eq!(spills.page_count(), 2);
        assert_eq!(spills.pages[1].lines.len(), 1);
        assert_eq!(spills.pages[1].lines[0].y, 20.0);
    }

    #[test]
    fn lines_are_placed_with_baseline_and_blank_line_spacing() {
        let p = paginator(400.0, 400.0, 20.0);
        let out = p.paginate_text("a\n\nb", &DocumentStyle::default()).unwrap();
        let lines = &out.pages[0].lines;
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].y, 20.0);
        assert_eq!(lines[1].y, 34.0);
        assert_eq!(lines[2].y, 55.0);
        assert!((lines[0].baseline - (20.0 + 11.0 * 0.8)).abs() < 1e-4);
        assert!(lines[1].is_blank());
        assert_eq!(lines[0].segments[0].x, 20.0);
    }

    #[test]
    fn style_emphasis_applies_to_every_segment() {
        let p = paginator(400.0, 400.0, 20.0);
        let style = DocumentStyle::default()
            .with_family(FontFamily::Times)
            .with_bold(true)
            .with_underline(true);
        let out = p.paginate_text("Dear Sir", &style).unwrap();
        let segment = &out.pages[0].lines[0].segments[0];
        assert_eq!(segment.face.postscript_name(), "Times-Bold");
        assert!(segment.underline);
        assert_eq!(out.faces().len(), 1);
    }

    #[test]
    fn run_emphasis_is_combined_with_the_document_style() {
        let p = paginator(400.0, 400.0, 20.0);
        let style = DocumentStyle::default().with_italic(true);
        let bold = Emphasis { bold: true, ..Emphasis::NONE };
        let out = p
            .paginate(&[vec![TextRun::plain("plain "), TextRun::new("bold", bold)]], &style)
            .unwrap();
        let names: Vec<_> = out.segments().map(|s| s.face.postscript_name()).collect();
        assert_eq!(names, vec!["Helvetica-Oblique", "Helvetica-BoldOblique"]);
    }

    #[test]
    fn long_lines_wrap_within_the_printable_width() {
        let p = paginator(200.0, 400.0, 20.0);
        let style = DocumentStyle::default().with_family(FontFamily::Courier).with_size(10);
        // 160pt at 6pt per char: 26 chars per line.
        let text = "aaaaaaaaaa bbbbbbbbbb cccccccccc dddddddddd";
        let out = p.paginate_text(text, &style).unwrap();
        assert_eq!(
            out.line_texts(),
            vec!["aaaaaaaaaa bbbbbbbbbb", "cccccccccc dddddddddd"]
        );
        for segment in out.segments() {
            assert!(segment.x + segment.width <= 180.0 + 1e-3);
        }
    }

    #[test]
    fn typographic_punctuation_wraps_at_its_drawn_width() {
        let p = paginator(200.0, 400.0, 20.0);
        let style = DocumentStyle::default();
        // An em dash is a full em: 11pt each, 14 to a 160pt line.
        let out = p.paginate_text(&"\u{2014}".repeat(40), &style).unwrap();
        let counts: Vec<usize> = out.line_texts().iter().map(|l| l.chars().count()).collect();
        assert_eq!(counts, vec![14, 14, 12]);

        let text = "Regards\u{2026}\tyours \u{2014} faithfully \u{2013} the branch \u{2014} team\u{2026}".repeat(3);
        let out = p.paginate_text(&text, &style).unwrap();
        for segment in out.segments() {
            assert!(segment.x + segment.width <= 180.0 + 1e-3, "{:?} overflows", segment.text);
        }
    }

    #[test]
    fn a_line_taller_than_the_page_is_an_error() {
        let p = paginator(200.0, 50.0, 20.0);
        let result = p.paginate_text("x", &DocumentStyle::default());
        assert!(matches!(result, Err(LayoutError::ElementTooLarge(h, avail)) if h == 14.0 && avail == 10.0));
    }

    #[test]
    fn output_is_deterministic() {
        let p = paginator(300.0, 300.0, 20.0);
        let text = "Dear Sir,\n\nPlease close my account.\n\nSincerely,";
        let style = DocumentStyle::default();
        assert_eq!(p.paginate_text(text, &style).unwrap(), p.paginate_text(text, &style).unwrap());
    }
}
