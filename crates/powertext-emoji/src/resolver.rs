use std::sync::{Arc, Mutex, MutexGuard};

use hashbrown::HashMap;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::{EmojiError, EmojiImageSource, EmojiKey};

/// A decoded emoji bitmap at its natural size.
#[derive(Debug, Clone)]
pub struct EmojiAsset {
    pub key: EmojiKey,
    pub bitmap: RgbaImage,
}

impl EmojiAsset {
    pub fn natural_size(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    /// Width matching `height` while keeping the natural aspect ratio.
    pub fn width_for_height(&self, height: u32) -> u32 {
        let (w, h) = self.natural_size();
        if h == 0 {
            return height.max(1);
        }
        ((w as f32 * height as f32 / h as f32).round() as u32).max(1)
    }
}

enum CacheEntry {
    Ready(Arc<EmojiAsset>),
    Failed,
}

/// Caching front for an [`EmojiImageSource`].
///
/// Entries are append-only and live as long as the resolver. The lock is
/// released while the source fetches, so two threads missing on the same
/// key may both fetch; the first insert wins.
pub struct EmojiResolver {
    source: Box<dyn EmojiImageSource>,
    assets: Mutex<HashMap<EmojiKey, CacheEntry>>,
    scaled: Mutex<HashMap<(EmojiKey, u32), Arc<RgbaImage>>>,
    remember_failures: bool,
}

impl EmojiResolver {
    pub fn new(source: impl EmojiImageSource + 'static) -> Self {
        Self::from_boxed(Box::new(source))
    }

    pub fn from_boxed(source: Box<dyn EmojiImageSource>) -> Self {
        Self {
            source,
            assets: Mutex::new(HashMap::new()),
            scaled: Mutex::new(HashMap::new()),
            remember_failures: false,
        }
    }

    /// Cache failed lookups so they are not retried for this resolver.
    pub fn remember_failures(mut self, remember: bool) -> Self {
        self.remember_failures = remember;
        self
    }

    /// Resolve a raw emoji cluster to its decoded asset.
    pub fn resolve(&self, cluster: &str) -> Result<Arc<EmojiAsset>, EmojiError> {
        let key = self.source.canonicalize(cluster);
        if key.is_empty() {
            return Err(EmojiError::Empty);
        }

        match lock(&self.assets).get(&key) {
            Some(CacheEntry::Ready(asset)) => return Ok(asset.clone()),
            Some(CacheEntry::Failed) => {
                return Err(EmojiError::PreviouslyFailed { key: key.clone() });
            }
            None => {}
        }

        tracing::debug!(source = self.source.name(), %key, "emoji cache miss");
        match self.source.resolve(&key) {
            Ok(bitmap) => {
                let asset = Arc::new(EmojiAsset {
                    key: key.clone(),
                    bitmap,
                });
                let mut assets = lock(&self.assets);
                let entry = assets
                    .entry(key)
                    .or_insert_with(|| CacheEntry::Ready(asset.clone()));
                match entry {
                    CacheEntry::Ready(existing) => Ok(existing.clone()),
                    CacheEntry::Failed => Ok(asset),
                }
            }
            Err(err) => {
                if self.remember_failures {
                    lock(&self.assets).entry(key).or_insert(CacheEntry::Failed);
                }
                Err(err)
            }
        }
    }

    /// The asset's bitmap scaled to `height` pixels, cached per size.
    pub fn scaled(&self, asset: &EmojiAsset, height: u32) -> Arc<RgbaImage> {
        let height = height.max(1);
        let cache_key = (asset.key.clone(), height);
        if let Some(img) = lock(&self.scaled).get(&cache_key) {
            return img.clone();
        }

        let width = asset.width_for_height(height);
        let img = if asset.natural_size() == (width, height) {
            asset.bitmap.clone()
        } else {
            imageops::resize(&asset.bitmap, width, height, FilterType::Triangle)
        };
        let img = Arc::new(img);
        lock(&self.scaled)
            .entry(cache_key)
            .or_insert_with(|| img.clone())
            .clone()
    }

    /// Number of successfully cached assets.
    pub fn cached_assets(&self) -> usize {
        lock(&self.assets)
            .values()
            .filter(|e| matches!(e, CacheEntry::Ready(_)))
            .count()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use image::Rgba;

    use super::*;
    use crate::EmojiNaming;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl EmojiImageSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn naming(&self) -> EmojiNaming {
            EmojiNaming::Noto
        }

        fn fetch(&self, _key: &EmojiKey) -> Result<Vec<u8>, EmojiError> {
            unreachable!("resolve is overridden")
        }

        fn resolve(&self, key: &EmojiKey) -> Result<RgbaImage, EmojiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(EmojiError::NotFound {
                    path: format!("{key}.png").into(),
                })
            } else {
                Ok(RgbaImage::from_pixel(64, 32, Rgba([0, 0, 255, 255])))
            }
        }
    }

    fn counting(fail: bool) -> (EmojiResolver, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = EmojiResolver::new(CountingSource {
            calls: calls.clone(),
            fail,
        });
        (resolver, calls)
    }

    #[test]
    fn fetches_each_emoji_once() {
        let (resolver, calls) = counting(false);
        let a = resolver.resolve("\u{1F600}").unwrap();
        let b = resolver.resolve("\u{1F600}").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.cached_assets(), 1);
    }

    #[test]
    fn variation_selector_shares_cache_entry() {
        let (resolver, calls) = counting(false);
        resolver.resolve("\u{2764}").unwrap();
        resolver.resolve("\u{2764}\u{FE0F}").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failures_are_retried_by_default() {
        let (resolver, calls) = counting(true);
        assert!(resolver.resolve("\u{1F600}").is_err());
        assert!(resolver.resolve("\u{1F600}").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.cached_assets(), 0);
    }

    #[test]
    fn remembered_failures_are_not_refetched() {
        let (resolver, calls) = counting(true);
        let resolver = resolver.remember_failures(true);
        assert!(matches!(
            resolver.resolve("\u{1F600}"),
            Err(EmojiError::NotFound { .. })
        ));
        assert!(matches!(
            resolver.resolve("\u{1F600}"),
            Err(EmojiError::PreviouslyFailed { .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn scaling_keeps_aspect_ratio() {
        let (resolver, _) = counting(false);
        let asset = resolver.resolve("\u{1F680}").unwrap();
        let scaled = resolver.scaled(&asset, 16);
        assert_eq!(scaled.dimensions(), (32, 16));
        let again = resolver.scaled(&asset, 16);
        assert!(Arc::ptr_eq(&scaled, &again));
    }

    #[test]
    fn concurrent_lookups_share_one_asset() {
        let (resolver, _) = counting(false);
        let resolver = Arc::new(resolver);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let r = resolver.clone();
                std::thread::spawn(move || r.resolve("\u{1F389}").unwrap())
            })
            .collect();
        let assets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let cached = resolver.resolve("\u{1F389}").unwrap();
        assert!(assets.iter().all(|a| Arc::ptr_eq(a, &cached)));
        assert_eq!(resolver.cached_assets(), 1);
    }
}
