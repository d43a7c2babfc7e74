use crate::values::Values;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(\w+)\}\}").expect("BUG: invalid PLACEHOLDER_RE regex literal")
});

static GUARD_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{#if\s+(\w+)\}\}").expect("BUG: invalid GUARD_OPEN_RE regex literal")
});

const GUARD_CLOSE: &str = "{{/if}}";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Text(String),
    Key(String),
    /// Content kept only when `key` is truthy. The body never contains
    /// another `Conditional`.
    Conditional { key: String, body: Vec<Item> },
}

/// A parsed template, reusable across renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template {
    pub items: Vec<Item>,
}

impl Template {
    /// Parses `source`. Never fails: an opening guard without a matching
    /// `{{/if}}`, a stray `{{/if}}`, or braces around anything other than a
    /// word key all stay in the output as literal text.
    ///
    /// A block closes at the first `{{/if}}` after its guard, so a second
    /// guard inside the body is literal text and the outer `{{/if}}` is left
    /// over as literal text after the block.
    pub fn parse(source: &str) -> Self {
        let mut items = Vec::new();
        let mut pos = 0;

        while let Some(open) = GUARD_OPEN_RE.captures_at(source, pos) {
            let (Some(whole), Some(key)) = (open.get(0), open.get(1)) else {
                break;
            };
            let Some(close_offset) = source[whole.end()..].find(GUARD_CLOSE) else {
                // Unclosed: no later guard can close either.
                break;
            };
            let close = whole.end() + close_offset;

            push_scanned(&mut items, source, pos..whole.start());
            let mut body = Vec::new();
            push_scanned(&mut body, source, whole.end()..close);
            items.push(Item::Conditional { key: key.as_str().to_string(), body });

            pos = close + GUARD_CLOSE.len();
        }
        push_scanned(&mut items, source, pos..source.len());

        Template { items }
    }

    pub fn render<V: Values + ?Sized>(&self, values: &V) -> String {
        let mut out = String::with_capacity(self.literal_len());
        render_items(&self.items, values, &mut out);
        out
    }

    /// Every key the template refers to, as placeholder or guard, in order of
    /// first appearance.
    pub fn keys(&self) -> Vec<&str> {
        let mut referenced: Vec<&str> = Vec::new();
        for item in &self.items {
            match item {
                Item::Text(_) => {}
                Item::Key(k) => referenced.push(k),
                Item::Conditional { key, body } => {
                    referenced.push(key);
                    referenced.extend(body.iter().filter_map(|inner| match inner {
                        Item::Key(k) => Some(k.as_str()),
                        _ => None,
                    }));
                }
            }
        }
        let mut keys: Vec<&str> = Vec::with_capacity(referenced.len());
        for key in referenced {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    fn literal_len(&self) -> usize {
        fn len(items: &[Item]) -> usize {
            items
                .iter()
                .map(|item| match item {
                    Item::Text(t) => t.len(),
                    Item::Key(_) => 0,
                    Item::Conditional { body, .. } => len(body),
                })
                .sum()
        }
        len(&self.items)
    }
}

fn render_items<V: Values + ?Sized>(items: &[Item], values: &V, out: &mut String) {
    for item in items {
        match item {
            Item::Text(text) => out.push_str(text),
            Item::Key(key) => {
                if let Some(value) = values.get_value(key) {
                    out.push_str(value);
                }
            }
            Item::Conditional { key, body } => {
                if values.is_truthy(key) {
                    render_items(body, values, out);
                }
            }
        }
    }
}

/// Splits `source[range]` into text and placeholder items.
fn push_scanned(items: &mut Vec<Item>, source: &str, range: Range<usize>) {
    let segment = &source[range];
    let mut last = 0;
    for caps in PLACEHOLDER_RE.captures_iter(segment) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            push_text(items, &segment[last..whole.start()]);
        }
        items.push(Item::Key(key.as_str().to_string()));
        last = whole.end();
    }
    if last < segment.len() {
        push_text(items, &segment[last..]);
    }
}

fn push_text(items: &mut Vec<Item>, text: &str) {
    if let Some(Item::Text(prev)) = items.last_mut() {
        prev.push_str(text);
    } else {
        items.push(Item::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::FieldMap;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn parses_text_keys_and_blocks() {
        let t = Template::parse("Hi {{name}}!{{#if  ps}}\nPS: {{ps}}{{/if}}");
        assert_eq!(
            t.items,
            vec![
                Item::Text("Hi ".into()),
                Item::Key("name".into()),
                Item::Text("!".into()),
                Item::Conditional {
                    key: "ps".into(),
                    body: vec![Item::Text("\nPS: ".into()), Item::Key("ps".into())],
                },
            ]
        );
        assert_eq!(t.keys(), vec!["name", "ps"]);
    }

    #[test]
    fn every_occurrence_is_substituted() {
        let t = Template::parse("{{a}}-{{a}}-{{a}}");
        assert_eq!(t.render(&fields(&[("a", "x")])), "x-x-x");
    }

    #[test]
    fn missing_and_empty_keys_render_as_nothing() {
        let t = Template::parse("[{{missing}}][{{empty}}]");
        assert_eq!(t.render(&fields(&[("empty", "")])), "[][]");
    }

    #[test]
    fn values_are_never_rescanned() {
        let t = Template::parse("{{a}}|{{b}}");
        let f = fields(&[("a", "{{b}}"), ("b", "{{#if b}}x{{/if}}")]);
        assert_eq!(t.render(&f), "{{b}}|{{#if b}}x{{/if}}");
    }

    #[test]
    fn block_content_spans_lines() {
        let t = Template::parse("start{{#if k}}line one\nline two\n{{/if}}end");
        assert_eq!(t.render(&fields(&[("k", "1")])), "startline one\nline two\nend");
        assert_eq!(t.render(&fields(&[])), "startend");
    }

    #[test]
    fn blocks_close_at_the_nearest_end_marker() {
        let source = "{{#if a}}1{{/if}}-{{#if b}}2{{/if}}";
        let t = Template::parse(source);
        assert_eq!(t.render(&fields(&[("a", "y")])), "1-");
        assert_eq!(t.render(&fields(&[("b", "y")])), "-2");
    }

    #[test]
    fn nested_guard_is_literal_inside_the_first_block() {
        let t = Template::parse("{{#if a}}A{{#if b}}B{{/if}}C{{/if}}");
        assert_eq!(t.render(&fields(&[("a", "y")])), "A{{#if b}}BC{{/if}}");
        assert_eq!(t.render(&fields(&[])), "C{{/if}}");
    }

    #[test]
    fn malformed_guards_stay_literal() {
        let t = Template::parse("x {{#if open}} {{name}} y");
        assert_eq!(t.render(&fields(&[("name", "N")])), "x {{#if open}} N y");

        let t = Template::parse("stray {{/if}} close");
        assert_eq!(t.render(&fields(&[])), "stray {{/if}} close");

        let t = Template::parse("{{ spaced }} {{#if}}{{/if}}");
        assert_eq!(t.render(&fields(&[("spaced", "no")])), "{{ spaced }} {{#if}}{{/if}}");
    }

    #[test]
    fn zero_counts_as_present() {
        let t = Template::parse("{{#if n}}n={{n}}{{/if}}");
        assert_eq!(t.render(&fields(&[("n", "0")])), "n=0");
        assert_eq!(t.render(&fields(&[("n", " ")])), "n= ");
    }
}
