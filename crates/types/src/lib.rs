pub mod encoding;
pub mod font;
pub mod geometry;
pub mod run;
pub mod style;

pub use encoding::win_ansi_byte;
pub use font::{Emphasis, FontFace, FontFamily};
pub use geometry::{Margins, PageSize, Size, mm_to_pt};
pub use run::TextRun;
pub use style::{DEFAULT_FONT_SIZE, DocumentStyle, MAX_FONT_SIZE, MIN_FONT_SIZE, StyleError};
