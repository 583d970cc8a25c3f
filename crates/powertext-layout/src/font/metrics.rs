use std::sync::{Mutex, MutexGuard};

use hashbrown::HashMap;

use crate::font::{FontHandle, FontId};
use crate::geometry::TextSize;

/// Per-font measurement cache.
///
/// Keyed by `(FontId, text)`, unbounded, append-only. Measurement happens
/// outside the lock; when two callers race on the same key the first insert
/// is kept.
#[derive(Debug, Default)]
pub struct MetricsCache {
    entries: Mutex<HashMap<(FontId, String), TextSize>>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measure(&self, font: &FontHandle, text: &str) -> TextSize {
        let key = (font.id(), text.to_string());
        if let Some(size) = self.lock().get(&key) {
            return *size;
        }

        tracing::trace!(font = font.name(), text, "metrics cache miss");
        let measured = font.measure(text);
        *self.lock().entry(key).or_insert(measured)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(FontId, String), TextSize>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
