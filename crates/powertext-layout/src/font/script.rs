//! Ready-made rule predicates.
//!
//! Ranges follow the Unicode block charts; they are intentionally broad
//! (whole blocks) since they pick fonts, not validate text.

use crate::unicode::emoji;

pub fn is_ascii_alnum(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

/// Hiragana, katakana and their extensions.
pub fn is_kana(ch: char) -> bool {
    matches!(ch as u32,
        0x3040..=0x309F   // Hiragana
        | 0x30A0..=0x30FF // Katakana
        | 0x31F0..=0x31FF // Katakana Phonetic Extensions
        | 0xFF66..=0xFF9F // Halfwidth Katakana
        | 0x1B000..=0x1B16F
    )
}

/// CJK ideographs plus CJK punctuation and fullwidth forms.
pub fn is_cjk(ch: char) -> bool {
    matches!(ch as u32,
        0x3000..=0x303F   // CJK Symbols and Punctuation
        | 0x3400..=0x4DBF // Extension A
        | 0x4E00..=0x9FFF // Unified Ideographs
        | 0xF900..=0xFAFF // Compatibility Ideographs
        | 0xFF00..=0xFF65 // Fullwidth forms
        | 0x20000..=0x2FA1F
    )
}

pub fn is_hangul(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x11FF   // Jamo
        | 0x3130..=0x318F // Compatibility Jamo
        | 0xA960..=0xA97F
        | 0xAC00..=0xD7AF // Syllables
        | 0xD7B0..=0xD7FF
    )
}

/// Any pictographic or emoji-presentation code point.
pub fn is_emoji(ch: char) -> bool {
    emoji::is_emoji_presentation(ch) || emoji::is_extended_pictographic(ch)
}

/// Catch-all.
pub fn any(_: char) -> bool {
    true
}
