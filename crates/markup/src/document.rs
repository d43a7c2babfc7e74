use crate::scan::{Inline, Token, decode_entities, tokenize};
use itertools::Itertools;
use letterpress_types::{Emphasis, TextRun};
use std::ops::Range;

/// An edit applied to a [`RichDocument`]. Offsets and ranges count chars and
/// are clamped to the document length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Inserts text carrying the emphasis of the char just before `at`.
    Insert { at: usize, text: String },
    Delete { range: Range<usize> },
    ToggleBold { range: Range<usize> },
    ToggleItalic { range: Range<usize> },
    ToggleUnderline { range: Range<usize> },
}

/// A letter body as an ordered list of styled runs. Runs may contain `\n`;
/// adjacent runs never share the same emphasis and no run is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichDocument {
    runs: Vec<TextRun>,
}

impl RichDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_runs(runs: impl IntoIterator<Item = TextRun>) -> Self {
        Self { runs: normalize(runs) }
    }

    pub fn from_plain(text: &str) -> Self {
        Self::from_runs([TextRun::plain(text)])
    }

    /// Parses markup: `<b>`/`<strong>`, `<i>`/`<em>` and `<u>` set emphasis
    /// (nesting is counted), block tags and entities behave as in
    /// [`crate::to_plain_text`], and surrounding whitespace is trimmed.
    pub fn from_markup(markup: &str) -> Self {
        let mut bold = 0usize;
        let mut italic = 0usize;
        let mut underline = 0usize;
        let mut runs: Vec<TextRun> = Vec::new();

        for token in tokenize(markup) {
            let emphasis = Emphasis { bold: bold > 0, italic: italic > 0, underline: underline > 0 };
            match token {
                Token::Text(raw) => runs.push(TextRun::new(decode_entities(raw), emphasis)),
                Token::Break(brk) => runs.push(TextRun::new(brk, emphasis)),
                Token::Open(inline) => *counter(inline, &mut bold, &mut italic, &mut underline) += 1,
                Token::Close(inline) => {
                    let count = counter(inline, &mut bold, &mut italic, &mut underline);
                    *count = count.saturating_sub(1);
                }
            }
        }

        let mut chars = explode(&runs);
        let start = chars.iter().position(|(c, _)| !c.is_whitespace()).unwrap_or(chars.len());
        let end = chars.iter().rposition(|(c, _)| !c.is_whitespace()).map_or(start, |i| i + 1);
        chars.truncate(end);
        chars.drain(..start);
        Self::from_chars(chars)
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|r| r.text.chars().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn to_plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Serializes back to markup using `<b>`, `<i>`, `<u>` and `<br>`.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            let e = run.emphasis;
            if e.bold {
                out.push_str("<b>");
            }
            if e.italic {
                out.push_str("<i>");
            }
            if e.underline {
                out.push_str("<u>");
            }
            for c in run.text.chars() {
                match c {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '\n' => out.push_str("<br>"),
                    _ => out.push(c),
                }
            }
            if e.underline {
                out.push_str("</u>");
            }
            if e.italic {
                out.push_str("</i>");
            }
            if e.bold {
                out.push_str("</b>");
            }
        }
        out
    }

    /// The document split at `\n` into logical lines. A blank line is an
    /// empty run list.
    pub fn lines(&self) -> Vec<Vec<TextRun>> {
        let mut lines = vec![Vec::new()];
        for run in &self.runs {
            let mut parts = run.text.split('\n');
            if let Some(first) = parts.next() {
                push_part(&mut lines, first, run.emphasis);
            }
            for part in parts {
                lines.push(Vec::new());
                push_part(&mut lines, part, run.emphasis);
            }
        }
        lines
    }

    pub fn apply(&mut self, command: EditCommand) {
        let mut chars = explode(&self.runs);
        let len = chars.len();
        let clamp = |r: &Range<usize>| r.start.min(len)..r.end.min(len).max(r.start.min(len));

        match command {
            EditCommand::Insert { at, text } => {
                let at = at.min(len);
                let emphasis = if at > 0 {
                    chars[at - 1].1
                } else {
                    chars.first().map_or(Emphasis::NONE, |(_, e)| *e)
                };
                chars.splice(at..at, text.chars().map(|c| (c, emphasis)));
            }
            EditCommand::Delete { range } => {
                chars.drain(clamp(&range));
            }
            EditCommand::ToggleBold { range } => {
                toggle(&mut chars[clamp(&range)], |e| &mut e.bold);
            }
            EditCommand::ToggleItalic { range } => {
                toggle(&mut chars[clamp(&range)], |e| &mut e.italic);
            }
            EditCommand::ToggleUnderline { range } => {
                toggle(&mut chars[clamp(&range)], |e| &mut e.underline);
            }
        }
        *self = Self::from_chars(chars);
        log::trace!("Applied edit, document now has {} runs", self.runs.len());
    }

    fn from_chars(chars: Vec<(char, Emphasis)>) -> Self {
        Self::from_runs(chars.into_iter().map(|(c, e)| TextRun::new(c.to_string(), e)))
    }
}

fn counter<'a>(
    inline: Inline,
    bold: &'a mut usize,
    italic: &'a mut usize,
    underline: &'a mut usize,
) -> &'a mut usize {
    match inline {
        Inline::Bold => bold,
        Inline::Italic => italic,
        Inline::Underline => underline,
    }
}

/// Sets the flag on every char unless all of them already carry it, in which
/// case it is cleared.
fn toggle(chars: &mut [(char, Emphasis)], flag: impl Fn(&mut Emphasis) -> &mut bool) {
    if chars.is_empty() {
        return;
    }
    let all_set = chars.iter_mut().all(|(_, e)| *flag(e));
    for (_, e) in chars.iter_mut() {
        *flag(e) = !all_set;
    }
}

fn explode(runs: &[TextRun]) -> Vec<(char, Emphasis)> {
    runs.iter()
        .flat_map(|r| r.text.chars().map(move |c| (c, r.emphasis)))
        .collect()
}

fn normalize(runs: impl IntoIterator<Item = TextRun>) -> Vec<TextRun> {
    runs.into_iter()
        .filter(|r| !r.text.is_empty())
        .coalesce(|mut a, b| {
            if a.emphasis == b.emphasis {
                a.text.push_str(&b.text);
                Ok(a)
            } else {
                Err((a, b))
            }
        })
        .collect()
}

fn push_part(lines: &mut [Vec<TextRun>], text: &str, emphasis: Emphasis) {
    if text.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.push(TextRun::new(text, emphasis));
    }
}
