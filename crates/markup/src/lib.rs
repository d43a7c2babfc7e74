//! Turns user-edited letter markup into something the layout engine can set.
//!
//! Two paths share one tokenizer:
//!
//! - [`to_plain_text`] is the best-effort fallback: tags are stripped, line
//!   structure is rebuilt from `<br>`, `</p>` and block closes, and a handful
//!   of named entities are decoded.
//! - [`RichDocument`] keeps bold/italic/underline spans as an ordered list of
//!   [`TextRun`]s and is edited through discrete [`EditCommand`]s.

mod document;
mod scan;

pub use document::{EditCommand, RichDocument};
pub use letterpress_types::TextRun;
pub use scan::{decode_entities, has_markup, to_plain_text};
