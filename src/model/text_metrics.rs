//! Label measurement from a fixed advance table.
//!
//! Hit testing a text element needs its size; it is computed here from the
//! characters alone, independent of the renderer.

use crate::constants::TEXT_FONT_SIZE;

/// Horizontal advance of one character, in pixels, at `font_size`.
///
/// Three classes approximate a proportional serif face: narrow punctuation and
/// thin letters, wide capitals, everything else.
fn advance(c: char, font_size: i32) -> i32 {
    match c {
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' | ' ' => font_size / 4,
        'm' | 'w' | 'M' | 'W' | '@' => font_size * 3 / 4,
        _ => font_size / 2,
    }
}

/// Width and height of `label` at `font_size`
pub fn measure(label: &str, font_size: i32) -> (i32, i32) {
    let width = label.chars().map(|c| advance(c, font_size)).sum();
    (width, font_size)
}

/// Width and height of `label` at the canvas text size
pub fn label_size(label: &str) -> (i32, i32) {
    measure(label, TEXT_FONT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_has_no_width() {
        assert_eq!(label_size(""), (0, TEXT_FONT_SIZE));
    }

    #[test]
    fn test_regular_characters() {
        assert_eq!(measure("abc", 24), (36, 24));
    }

    #[test]
    fn test_narrow_and_wide_characters() {
        assert_eq!(measure("il", 24).0, 12);
        assert_eq!(measure("MW", 24).0, 36);
    }

    #[test]
    fn test_measure_is_stable() {
        assert_eq!(label_size("Hello"), label_size("Hello"));
    }
}
