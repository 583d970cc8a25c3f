pub mod metrics;
pub mod monospace;
pub mod rule;
pub mod script;

pub use metrics::MetricsCache;
pub use monospace::MonospaceFont;
pub use rule::{FontRule, FontRules, Predicate};

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::TextSize;

/// Font-level measurement and rasterisation, supplied by the caller.
///
/// Implementations must be deterministic: the same text always measures
/// the same, since results are cached per font.
pub trait FontMetrics: Send + Sync {
    /// Advance width and line height of `text` in canvas pixels.
    fn measure(&self, text: &str) -> TextSize;

    /// Nominal size in pixels per em.
    fn font_size(&self) -> f32;

    /// Distance from the top of a line box to the baseline.
    fn ascent(&self) -> f32;

    /// Coverage mask for a single character, if the font can rasterise it.
    fn rasterize(&self, ch: char) -> Option<GlyphMask> {
        let _ = ch;
        None
    }
}

/// 8-bit coverage mask for one glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    /// Horizontal offset from the pen position to the left edge.
    pub left: i32,
    /// Offset from the baseline up to the bottom edge (positive is up).
    pub bottom: i32,
    /// Pen advance after this glyph.
    pub advance: f32,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// Process-unique font identity, used as the metrics cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(u64);

impl FontId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        FontId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Cheap, cloneable handle to a shared font.
///
/// Clones share the same [`FontId`]; two handles created separately from
/// the same face are distinct fonts as far as caching is concerned.
#[derive(Clone)]
pub struct FontHandle {
    id: FontId,
    name: Arc<str>,
    face: Arc<dyn FontMetrics>,
}

impl FontHandle {
    pub fn new(name: impl AsRef<str>, face: impl FontMetrics + 'static) -> Self {
        Self::from_arc(name, Arc::new(face))
    }

    pub fn from_arc(name: impl AsRef<str>, face: Arc<dyn FontMetrics>) -> Self {
        Self {
            id: FontId::next(),
            name: Arc::from(name.as_ref()),
            face,
        }
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn face(&self) -> &dyn FontMetrics {
        self.face.as_ref()
    }

    /// Uncached measurement; layout goes through [`MetricsCache`].
    pub fn measure(&self, text: &str) -> TextSize {
        self.face.measure(text)
    }

    pub fn font_size(&self) -> f32 {
        self.face.font_size()
    }

    pub fn ascent(&self) -> f32 {
        self.face.ascent()
    }

    pub fn rasterize(&self, ch: char) -> Option<GlyphMask> {
        self.face.rasterize(ch)
    }
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FontHandle {}

impl core::hash::Hash for FontHandle {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("id", &self.id.0)
            .field("name", &self.name)
            .field("size", &self.face.font_size())
            .finish()
    }
}
