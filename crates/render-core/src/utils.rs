use letterpress_types::win_ansi_byte;
use log::warn;

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Encodes text for a standard Type1 font with `WinAnsiEncoding`.
///
/// Characters without a WinAnsi glyph become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    let mut unmapped = 0usize;
    let bytes = s
        .chars()
        .map(|c| {
            win_ansi_byte(c).unwrap_or_else(|| {
                unmapped += 1;
                b'?'
            })
        })
        .collect();
    if unmapped > 0 {
        warn!("{} characters have no WinAnsi encoding and were replaced with '?'", unmapped);
    }
    bytes
}
