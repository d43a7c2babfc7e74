use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)(?:\s[^<>]*)?/?>")
        .expect("BUG: invalid TAG_RE regex literal")
});

/// Named entities understood by the normalizer. `&amp;` is decoded last so
/// that `&amp;lt;` becomes the literal text `&lt;`.
const ENTITIES: [(&str, &str); 4] = [("&nbsp;", " "), ("&lt;", "<"), ("&gt;", ">"), ("&quot;", "\"")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inline {
    Bold,
    Italic,
    Underline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Raw text between tags, entities still encoded.
    Text(&'a str),
    Break(&'static str),
    Open(Inline),
    Close(Inline),
}

/// Whether `content` contains at least one tag.
pub fn has_markup(content: &str) -> bool {
    TAG_RE.is_match(content)
}

pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = text.to_string();
    for (entity, literal) in ENTITIES {
        out = out.replace(entity, literal);
    }
    out.replace("&amp;", "&")
}

/// Reduces markup to plain text: `<br>` becomes a line break, a closing
/// `</p>` a blank line, closing list items and other blocks a single line
/// break; every other tag disappears. The result is trimmed. Content without
/// any tag is returned verbatim.
pub fn to_plain_text(content: &str) -> String {
    if !has_markup(content) {
        return content.to_string();
    }
    let mut out = String::with_capacity(content.len());
    for token in tokenize(content) {
        match token {
            Token::Text(text) => out.push_str(&decode_entities(text)),
            Token::Break(brk) => out.push_str(brk),
            Token::Open(_) | Token::Close(_) => {}
        }
    }
    out.trim().to_string()
}

pub(crate) fn tokenize(markup: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in TAG_RE.captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            tokens.push(Token::Text(&markup[last..whole.start()]));
        }
        last = whole.end();

        let Some(name) = caps.get(2) else {
            // Comment.
            continue;
        };
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = whole.as_str().ends_with("/>");
        if let Some(token) = classify(&name.as_str().to_ascii_lowercase(), closing, self_closing) {
            tokens.push(token);
        }
    }
    if last < markup.len() {
        tokens.push(Token::Text(&markup[last..]));
    }
    tokens
}

fn classify(name: &str, closing: bool, self_closing: bool) -> Option<Token<'static>> {
    if name == "br" {
        return Some(Token::Break("\n"));
    }
    if self_closing {
        return None;
    }
    let inline = match name {
        "b" | "strong" => Some(Inline::Bold),
        "i" | "em" => Some(Inline::Italic),
        "u" | "ins" => Some(Inline::Underline),
        _ => None,
    };
    if let Some(inline) = inline {
        return Some(if closing { Token::Close(inline) } else { Token::Open(inline) });
    }
    if !closing {
        return None;
    }
    match name {
        "p" => Some(Token::Break("\n\n")),
        "li" | "div" | "tr" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(Token::Break("\n")),
        _ => None,
    }
}
