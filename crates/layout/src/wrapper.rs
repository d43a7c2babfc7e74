use crate::LayoutError;
use crate::metrics::TextMeasurer;
use itertools::Itertools;
use letterpress_types::{Emphasis, FontFace, FontFamily, TextRun};

/// Tolerance for width comparisons.
const EPSILON: f32 = 0.01;

/// A stretch of a wrapped line sharing one emphasis. `x` is relative to the
/// start of the line.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedPiece {
    pub text: String,
    pub emphasis: Emphasis,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrappedLine {
    pub pieces: Vec<WrappedPiece>,
    pub width: f32,
}

impl WrappedLine {
    pub fn text(&self) -> String {
        self.pieces.iter().map(|p| p.text.as_str()).collect()
    }
}

type Glyph = (char, Emphasis, f32);

enum Token<'a> {
    Space(Glyph),
    Word(&'a [Glyph]),
}

/// Greedily wraps one logical line (no `\n`) to `max_width`.
///
/// Words are separated by single spaces. A word wider than `max_width` is
/// broken between characters, and the space at a wrap point is dropped. An
/// empty line yields one empty wrapped line.
pub fn wrap_line(
    runs: &[TextRun],
    family: FontFamily,
    font_size: f32,
    max_width: f32,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<WrappedLine>, LayoutError> {
    if !(max_width > 0.0) {
        return Err(LayoutError::InvalidGeometry(format!(
            "cannot wrap text to a width of {:.2}pt",
            max_width
        )));
    }
    let glyphs = measure_glyphs(runs, family, font_size, measurer)?;

    let mut lines: Vec<Vec<Glyph>> = Vec::new();
    let mut current: Vec<Glyph> = Vec::new();
    let mut current_width = 0.0f32;
    let mut pending: Vec<Glyph> = Vec::new();

    for token in tokens(&glyphs) {
        let word = match token {
            Token::Space(glyph) => {
                pending.push(glyph);
                continue;
            }
            Token::Word(word) => word,
        };
        let pending_width = total_width(&pending);
        let word_width = total_width(word);

        if current_width + pending_width + word_width <= max_width + EPSILON {
            current.append(&mut pending);
            current.extend_from_slice(word);
            current_width += pending_width + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        pending.clear();

        if word_width <= max_width + EPSILON {
            current.extend_from_slice(word);
            current_width = word_width;
            continue;
        }

        for &glyph in word {
            if current_width + glyph.2 > max_width + EPSILON && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(glyph);
            current_width += glyph.2;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    Ok(lines.into_iter().map(assemble).collect())
}

fn measure_glyphs(
    runs: &[TextRun],
    family: FontFamily,
    font_size: f32,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<Glyph>, LayoutError> {
    let mut glyphs = Vec::new();
    let mut buf = [0u8; 4];
    for run in runs {
        let face = FontFace::new(family, run.emphasis);
        for ch in run.text.chars().filter(|&c| c != '\r' && c != '\n') {
            let width = measurer.text_width(ch.encode_utf8(&mut buf), face, font_size)?;
            glyphs.push((ch, run.emphasis, width));
        }
    }
    Ok(glyphs)
}

fn tokens(glyphs: &[Glyph]) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < glyphs.len() {
        if glyphs[i].0 == ' ' {
            out.push(Token::Space(glyphs[i]));
            i += 1;
            continue;
        }
        let start = i;
        while i < glyphs.len() && glyphs[i].0 != ' ' {
            i += 1;
        }
        out.push(Token::Word(&glyphs[start..i]));
    }
    out
}

fn total_width(glyphs: &[Glyph]) -> f32 {
    glyphs.iter().map(|g| g.2).sum()
}

fn assemble(glyphs: Vec<Glyph>) -> WrappedLine {
    let mut x = 0.0f32;
    let pieces: Vec<WrappedPiece> = glyphs
        .into_iter()
        .map(|(ch, emphasis, width)| {
            let piece = WrappedPiece { text: ch.to_string(), emphasis, x, width };
            x += width;
            piece
        })
        .coalesce(|mut a, b| {
            if a.emphasis == b.emphasis {
                a.text.push_str(&b.text);
                a.width += b.width;
                Ok(a)
            } else {
                Err((a, b))
            }
        })
        .collect();
    WrappedLine { pieces, width: x }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::StandardFontMetrics;

    const BOLD: Emphasis = Emphasis { bold: true, italic: false, underline: false };

    // Courier at 10pt: every char is 6pt wide.
    fn wrap(runs: &[TextRun], max_width: f32) -> Vec<String> {
        wrap_line(runs, FontFamily::Courier, 10.0, max_width, &StandardFontMetrics::new())
            .unwrap()
            .iter()
            .map(WrappedLine::text)
            .collect()
    }

    #[test]
    fn wraps_at_word_boundaries_and_drops_the_break_space() {
        assert_eq!(wrap(&[TextRun::plain("aaaa bbbb cccc")], 60.0), vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        assert_eq!(wrap(&[TextRun::plain("aaaa bbbbb")], 60.0), vec!["aaaa bbbbb"]);
    }

    #[test]
    fn overlong_words_break_between_characters() {
        assert_eq!(
            wrap(&[TextRun::plain("abcdefghijklmnopqrstuvwxy")], 60.0),
            vec!["abcdefghij", "klmnopqrst", "uvwxy"]
        );
        assert_eq!(wrap(&[TextRun::plain("ab abcdefghijkl")], 60.0), vec!["ab", "abcdefghij", "kl"]);
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(wrap(&[], 60.0), vec![""]);
        assert_eq!(wrap(&[TextRun::plain("   ")], 60.0), vec![""]);
    }

    #[test]
    fn leading_indentation_is_kept() {
        assert_eq!(wrap(&[TextRun::plain("  ab")], 60.0), vec!["  ab"]);
    }

    #[test]
    fn pieces_follow_emphasis_changes() {
        let runs = [TextRun::plain("Hello "), TextRun::new("world", BOLD)];
        let lines = wrap_line(&runs, FontFamily::Courier, 10.0, 100.0, &StandardFontMetrics::new()).unwrap();
        assert_eq!(lines.len(), 1);
        let pieces = &lines[0].pieces;
        assert_eq!(pieces.len(), 2);
        assert_eq!((pieces[0].text.as_str(), pieces[0].x, pieces[0].width), ("Hello ", 0.0, 36.0));
        assert_eq!((pieces[1].text.as_str(), pieces[1].x, pieces[1].width), ("world", 36.0, 30.0));
        assert_eq!(pieces[1].emphasis, BOLD);
        assert_eq!(lines[0].width, 66.0);
    }

    #[test]
    fn zero_width_is_rejected() {
        let result = wrap_line(&[TextRun::plain("x")], FontFamily::Courier, 10.0, 0.0, &StandardFontMetrics::new());
        assert!(matches!(result, Err(LayoutError::InvalidGeometry(_))));
    }
}
