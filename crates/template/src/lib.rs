//! Substitution engine for letter templates.
//!
//! A template is plain text (or markup) containing two kinds of tokens:
//!
//! - **Placeholders** `{{key}}`, replaced by the value of `key`, or by nothing
//!   when the key is missing or empty.
//! - **Conditional blocks** `{{#if key}}...{{/if}}`, whose content is kept only
//!   when `key` has a non-empty value.
//!
//! Templates are trusted, human-authored content, so the engine never fails:
//! malformed guards are left in the output as literal text. Substituted values
//! are inserted verbatim and never re-scanned for tokens.
//!
//! ```
//! use letterpress_template::{FieldMap, render};
//!
//! let mut fields = FieldMap::new();
//! fields.insert("name".into(), "Ada".into());
//! assert_eq!(render("Dear {{name}},{{#if ref}} Ref: {{ref}}{{/if}}", &fields), "Dear Ada,");
//! ```

mod dates;
mod normalize;
mod template;
mod values;

pub use dates::format_date;
pub use normalize::collapse_blank_lines;
pub use template::{Item, Template};
pub use values::{FieldMap, Values};

/// Resolves `source` against `fields` and normalizes the gaps left behind by
/// removed conditional blocks.
pub fn render<V: Values + ?Sized>(source: &str, fields: &V) -> String {
    let template = Template::parse(source);
    collapse_blank_lines(&template.render(fields))
}
