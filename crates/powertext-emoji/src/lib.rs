//! powertext-emoji: emoji image sources and the resolver cache.
//!
//! An [`EmojiImageSource`] turns a canonical code-point sequence into a
//! decoded bitmap. Two implementations ship with the crate:
//! - [`RemoteEmojiSource`] fetches PNGs from a CDN over HTTP(S)
//! - [`LocalEmojiSource`] reads PNGs from a directory on disk
//!
//! [`EmojiResolver`] sits in front of a source and caches every decoded
//! asset for its own lifetime.

pub mod key;
pub mod local;
pub mod remote;
pub mod resolver;

use std::path::PathBuf;

pub use image::RgbaImage;
pub use key::{EmojiKey, EmojiNaming};
pub use local::LocalEmojiSource;
pub use remote::{CdnStyle, RemoteEmojiSource};
pub use resolver::{EmojiAsset, EmojiResolver};

/// Failure to resolve an emoji to a bitmap.
///
/// These are never fatal on their own; the layout engine falls back to
/// font-based rendering unless the caller opted into strict mode.
#[derive(Debug, thiserror::Error)]
pub enum EmojiError {
    #[error("emoji image not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read emoji image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("emoji request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("emoji request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("blocked emoji url {url}: {reason}")]
    Blocked { url: String, reason: String },

    #[error("failed to decode emoji image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("empty emoji sequence")]
    Empty,

    #[error("emoji {key} failed earlier and is not retried")]
    PreviouslyFailed { key: EmojiKey },
}

/// Provider of emoji bitmaps keyed by canonical code points.
///
/// Implementations may block (network or disk). They are called at most
/// once per distinct key through an [`EmojiResolver`].
pub trait EmojiImageSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Naming convention used to canonicalise clusters and build file names.
    fn naming(&self) -> EmojiNaming;

    /// Canonicalise a raw emoji cluster into the key this source understands.
    fn canonicalize(&self, cluster: &str) -> EmojiKey {
        self.naming().canonicalize(cluster)
    }

    /// Fetch the encoded image bytes for `key`.
    fn fetch(&self, key: &EmojiKey) -> Result<Vec<u8>, EmojiError>;

    /// Fetch and decode the bitmap for `key`.
    fn resolve(&self, key: &EmojiKey) -> Result<RgbaImage, EmojiError> {
        let bytes = self.fetch(key)?;
        decode(&bytes)
    }
}

impl<S: EmojiImageSource + ?Sized> EmojiImageSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn naming(&self) -> EmojiNaming {
        (**self).naming()
    }

    fn canonicalize(&self, cluster: &str) -> EmojiKey {
        (**self).canonicalize(cluster)
    }

    fn fetch(&self, key: &EmojiKey) -> Result<Vec<u8>, EmojiError> {
        (**self).fetch(key)
    }

    fn resolve(&self, key: &EmojiKey) -> Result<RgbaImage, EmojiError> {
        (**self).resolve(key)
    }
}

/// Decode PNG/JPEG/GIF/WebP bytes into an RGBA bitmap.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, EmojiError> {
    if bytes.is_empty() {
        return Err(EmojiError::Empty);
    }
    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}
