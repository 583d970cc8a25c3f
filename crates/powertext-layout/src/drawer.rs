use powertext_emoji::{EmojiImageSource, EmojiResolver};

use crate::error::Result;
use crate::font::{FontRules, MetricsCache};
use crate::geometry::Point;
use crate::layout::{DrawOptions, LayoutResult, TextLayouter};
use crate::render::{Canvas, Renderer};

/// Owns the measurement and emoji caches across calls.
///
/// `Send + Sync`; calls may run concurrently from several threads.
#[derive(Default)]
pub struct TextDrawer {
    metrics: MetricsCache,
    emoji: Option<EmojiResolver>,
}

impl TextDrawer {
    /// Drawer without an emoji source; emoji fall back to the font rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emoji_source(source: impl EmojiImageSource + 'static) -> Self {
        Self::with_resolver(EmojiResolver::new(source))
    }

    pub fn with_resolver(resolver: EmojiResolver) -> Self {
        Self {
            metrics: MetricsCache::new(),
            emoji: Some(resolver),
        }
    }

    pub fn layout(&self, text: &str, rules: &FontRules, options: &DrawOptions) -> Result<LayoutResult> {
        TextLayouter::new(&self.metrics, self.emoji.as_ref(), rules, options).layout(text)
    }

    /// Lays out `text` and draws it at `origin`.
    ///
    /// The canvas is untouched when layout fails.
    pub fn draw_text(
        &self,
        canvas: &mut dyn Canvas,
        origin: Point,
        text: &str,
        rules: &FontRules,
        options: &DrawOptions,
    ) -> Result<LayoutResult> {
        let layout = self.layout(text, rules, options)?;
        Renderer::render(&layout, origin, canvas);
        Ok(layout)
    }
}

/// One-shot layout and draw with fresh caches.
///
/// Prefer a long-lived [`TextDrawer`] when drawing repeatedly, so widths and
/// emoji bitmaps are reused.
pub fn draw_text(
    canvas: &mut dyn Canvas,
    origin: Point,
    text: &str,
    rules: &FontRules,
    options: &DrawOptions,
    emoji_source: Option<Box<dyn EmojiImageSource>>,
) -> Result<LayoutResult> {
    let drawer = match emoji_source {
        Some(source) => TextDrawer::with_resolver(EmojiResolver::from_boxed(source)),
        None => TextDrawer::new(),
    };
    drawer.draw_text(canvas, origin, text, rules, options)
}
