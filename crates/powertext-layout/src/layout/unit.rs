use std::sync::Arc;

use image::RgbaImage;
use powertext_emoji::EmojiKey;

use crate::color::Rgb;
use crate::font::FontHandle;
use crate::unicode::{Segment, UnitKind};

/// How a unit is painted.
#[derive(Debug, Clone)]
pub enum UnitContent {
    /// Glyphs from a classified font.
    Text { font: FontHandle, color: Rgb },
    /// An emoji bitmap already scaled to the unit box.
    Image {
        key: EmojiKey,
        bitmap: Arc<RgbaImage>,
    },
    /// Explicit line break; never part of a [`Line`](super::Line).
    Break,
}

impl PartialEq for UnitContent {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                UnitContent::Text { font, color },
                UnitContent::Text {
                    font: other_font,
                    color: other_color,
                },
            ) => font == other_font && color == other_color,
            (
                UnitContent::Image { key, bitmap },
                UnitContent::Image {
                    key: other_key,
                    bitmap: other_bitmap,
                },
            ) => key == other_key && bitmap.dimensions() == other_bitmap.dimensions(),
            (UnitContent::Break, UnitContent::Break) => true,
            _ => false,
        }
    }
}

/// A classified, measured grapheme unit.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutUnit {
    pub text: String,
    pub kind: UnitKind,
    /// Byte offset in the text it was segmented from.
    pub offset: usize,
    pub content: UnitContent,
    pub width: f32,
    pub height: f32,
}

impl LayoutUnit {
    pub fn text(segment: Segment<'_>, font: FontHandle, color: Rgb, width: f32, height: f32) -> Self {
        Self {
            text: segment.text.to_string(),
            kind: segment.kind,
            offset: segment.offset,
            content: UnitContent::Text { font, color },
            width,
            height,
        }
    }

    pub fn image(segment: Segment<'_>, key: EmojiKey, bitmap: Arc<RgbaImage>) -> Self {
        let (width, height) = bitmap.dimensions();
        Self {
            text: segment.text.to_string(),
            kind: segment.kind,
            offset: segment.offset,
            content: UnitContent::Image { key, bitmap },
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn line_break(segment: Segment<'_>) -> Self {
        Self {
            text: segment.text.to_string(),
            kind: UnitKind::Newline,
            offset: segment.offset,
            content: UnitContent::Break,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self.content, UnitContent::Break)
    }

    pub fn is_image(&self) -> bool {
        matches!(self.content, UnitContent::Image { .. })
    }

    /// Font of a text unit.
    pub fn font(&self) -> Option<&FontHandle> {
        match &self.content {
            UnitContent::Text { font, .. } => Some(font),
            _ => None,
        }
    }
}
