//! The `WinAnsiEncoding` code page used with the standard Type1 fonts.

/// The WinAnsi byte that draws `c`, if the code page has a glyph for it.
///
/// Latin-1 maps to itself and the typographic punctuation of Windows-1252 to
/// its slot in `0x80..=0x9F`. A tab is drawn as a space.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        '\t' => b' ',
        c if (c as u32) < 0x20 || c == '\u{7F}' => return None,
        c if (0x80..=0x9F).contains(&(c as u32)) => return None,
        c if (c as u32) <= 0xFF => c as u8,
        _ => return None,
    };
    Some(byte)
}
