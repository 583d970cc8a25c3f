use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

use crate::unicode::emoji::is_emoji_cluster;

/// What a grapheme unit stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// A single displayable grapheme cluster.
    Char,
    /// An emoji sequence to be drawn as an image.
    Emoji,
    /// `\n`, `\r\n` or `\r`.
    Newline,
}

/// One grapheme unit borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: UnitKind,
    /// Byte offset of `text` within the source.
    pub offset: usize,
}

/// Splits text into grapheme units.
///
/// Cheap to construct; [`Segmenter::iter`] may be called any number of
/// times and always yields the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'a> {
    text: &'a str,
    has_emoji: bool,
}

impl<'a> Segmenter<'a> {
    pub fn new(text: &'a str, has_emoji: bool) -> Self {
        Self { text, has_emoji }
    }

    pub fn iter(&self) -> Segments<'a> {
        Segments {
            inner: self.text.grapheme_indices(true),
            has_emoji: self.has_emoji,
        }
    }
}

impl<'a> IntoIterator for Segmenter<'a> {
    type Item = Segment<'a>;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over [`Segment`]s.
#[derive(Clone)]
pub struct Segments<'a> {
    inner: GraphemeIndices<'a>,
    has_emoji: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, text) = self.inner.next()?;
        let kind = if matches!(text, "\n" | "\r\n" | "\r") {
            UnitKind::Newline
        } else if self.has_emoji && is_emoji_cluster(text) {
            UnitKind::Emoji
        } else {
            UnitKind::Char
        };
        Some(Segment { text, kind, offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, has_emoji: bool) -> Vec<(&str, UnitKind)> {
        Segmenter::new(text, has_emoji)
            .iter()
            .map(|s| (s.text, s.kind))
            .collect()
    }

    #[test]
    fn splits_chars_emoji_and_newlines() {
        use UnitKind::*;
        assert_eq!(
            kinds("a😀\nb", true),
            vec![("a", Char), ("😀", Emoji), ("\n", Newline), ("b", Char)]
        );
    }

    #[test]
    fn crlf_is_one_newline() {
        let units = kinds("a\r\nb\rc", false);
        assert_eq!(units.len(), 5);
        assert_eq!(units[1], ("\r\n", UnitKind::Newline));
        assert_eq!(units[3], ("\r", UnitKind::Newline));
    }

    #[test]
    fn zwj_sequence_stays_whole() {
        let family = "👨\u{200D}👩\u{200D}👧";
        let units = kinds(family, true);
        assert_eq!(units, vec![(family, UnitKind::Emoji)]);
    }

    #[test]
    fn emoji_is_char_without_has_emoji() {
        assert_eq!(kinds("😀", false), vec![("😀", UnitKind::Char)]);
    }

    #[test]
    fn combining_marks_stay_attached() {
        assert_eq!(kinds("e\u{0301}x", false).len(), 2);
    }

    #[test]
    fn offsets_are_byte_positions_and_restartable() {
        let seg = Segmenter::new("中a", true);
        let first: Vec<usize> = seg.iter().map(|s| s.offset).collect();
        let second: Vec<usize> = seg.iter().map(|s| s.offset).collect();
        assert_eq!(first, vec![0, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert_eq!(Segmenter::new("", true).iter().count(), 0);
    }
}
