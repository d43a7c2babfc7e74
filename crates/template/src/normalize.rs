use regex::Regex;
use std::sync::LazyLock;

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\s*\n\s*\n").expect("BUG: invalid BLANK_RUN_RE regex literal")
});

/// Collapses any run of three or more line breaks (with only whitespace
/// between them) into a single blank line. The ends of the text are left
/// untouched.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}
