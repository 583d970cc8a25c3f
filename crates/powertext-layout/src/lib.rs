//! powertext-layout: mixed-script text layout with rule-based fonts.
//!
//! The pipeline runs in fixed stages:
//! - segmentation into grapheme units (plain characters, emoji clusters, breaks)
//! - classification of each unit against ordered [`FontRule`]s
//! - measurement through a cached [`FontMetrics`] adapter, emoji via [`EmojiResolver`]
//! - greedy line breaking bounded by `max_x`
//! - truncation bounded by `max_y`/`max_lines` with an end marker
//! - rendering onto a [`Canvas`]
//!
//! [`TextDrawer`] owns the caches and runs the whole pipeline; [`draw_text`]
//! is a one-shot convenience around it.

pub mod color;
pub mod drawer;
pub mod error;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod unicode;

pub use color::Rgb;
pub use drawer::{TextDrawer, draw_text};
pub use error::{LayoutError, Result};
pub use font::{
    FontHandle, FontId, FontMetrics, FontRule, FontRules, GlyphMask, MetricsCache, MonospaceFont,
};
pub use geometry::{Point, TextSize};
pub use layout::{
    DrawOptions, LayoutResult, LayoutUnit, Line, LineBreaker, LineHeight, TextLayouter, Truncator,
    UnitContent, WrapMode,
};
pub use render::{Canvas, DrawCommand, RecordingCanvas, Renderer};
pub use unicode::{Segment, Segmenter, UnitKind};

pub use powertext_emoji::{EmojiError, EmojiImageSource, EmojiResolver};
