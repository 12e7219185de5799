//! Metrics for the built-in PDF Helvetica.
//!
//! The vector renderer sets text in the standard Helvetica, which is not a
//! font cosmic-text can load, so lines are wrapped and centred with the
//! Adobe advance widths instead. Only printable ASCII and Latin-1 can be
//! written with it.

/// Advance widths of `' '..='~'`, in thousandths of the font size.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..='/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..='?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..='O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..='_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..='o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..='~'
];

/// Width used for Latin-1 symbols without an ASCII base letter.
const DEFAULT_WIDTH: u16 = 556;

/// Whether `c` can be written with built-in Helvetica.
pub fn encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{a0}'..='\u{ff}')
}

/// Returns the first character of `text` Helvetica cannot write.
pub fn first_unencodable(text: &str) -> Option<char> {
    text.chars().find(|&c| c != '\n' && !encodable(c))
}

fn char_width(c: char) -> u16 {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        '\u{a0}' => ' ',
        other => other,
    };
    match base {
        ' '..='~' => ASCII_WIDTHS[base as usize - ' ' as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Width of `text` set on one line at `font_size`, in the same unit.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    units as f32 / 1000.0 * font_size
}
