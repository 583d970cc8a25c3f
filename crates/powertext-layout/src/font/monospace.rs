use unicode_segmentation::UnicodeSegmentation;

use crate::font::{FontMetrics, GlyphMask};
use crate::geometry::TextSize;

/// Fixed-advance font without glyph data.
///
/// Every grapheme advances by the same width. Useful for headless layout
/// and for tests where exact pixel widths matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceFont {
    advance: f32,
    line_height: f32,
}

impl MonospaceFont {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }

    pub fn advance(&self) -> f32 {
        self.advance
    }
}

impl FontMetrics for MonospaceFont {
    fn measure(&self, text: &str) -> TextSize {
        let count = text.graphemes(true).count();
        TextSize::new(self.advance * count as f32, self.line_height)
    }

    fn font_size(&self) -> f32 {
        self.line_height
    }

    fn ascent(&self) -> f32 {
        self.line_height * 0.8
    }

    /// A solid box covering the advance, so rendering stays visible.
    fn rasterize(&self, ch: char) -> Option<GlyphMask> {
        if ch.is_whitespace() {
            return None;
        }
        let width = self.advance.max(1.0) as u32;
        let height = self.ascent().max(1.0) as u32;
        Some(GlyphMask {
            width,
            height,
            left: 0,
            bottom: 0,
            advance: self.advance,
            coverage: vec![255; (width * height) as usize],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_graphemes_not_code_points() {
        let font = MonospaceFont::new(10.0, 20.0);
        assert_eq!(font.measure("ab"), TextSize::new(20.0, 20.0));
        assert_eq!(font.measure("e\u{0301}"), TextSize::new(10.0, 20.0));
        assert_eq!(font.measure(""), TextSize::new(0.0, 20.0));
    }

    #[test]
    fn whitespace_has_no_mask() {
        let font = MonospaceFont::new(8.0, 10.0);
        assert!(font.rasterize(' ').is_none());
        let mask = font.rasterize('x').unwrap();
        assert_eq!(mask.coverage.len(), (mask.width * mask.height) as usize);
    }
}
