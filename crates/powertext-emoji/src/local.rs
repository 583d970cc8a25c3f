use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::{EmojiError, EmojiImageSource, EmojiKey, EmojiNaming, decode};

/// Emoji source reading images from a local directory.
///
/// File names follow the configured [`EmojiNaming`], e.g. the Noto Emoji
/// `png/128` directory works with [`EmojiNaming::Noto`].
#[derive(Debug, Clone)]
pub struct LocalEmojiSource {
    root: PathBuf,
    naming: EmojiNaming,
}

impl LocalEmojiSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_naming(root, EmojiNaming::default())
    }

    pub fn with_naming(root: impl AsRef<Path>, naming: EmojiNaming) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            naming,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the image for `key` is expected at.
    pub fn path_for(&self, key: &EmojiKey) -> PathBuf {
        self.root.join(self.naming.file_name(key))
    }

    /// Custom Discord emoji stored as `discord_{id}.png` next to the others.
    pub fn discord_emoji(&self, id: u64) -> Result<RgbaImage, EmojiError> {
        let bytes = read_file(self.root.join(format!("discord_{id}.png")))?;
        decode(&bytes)
    }
}

fn read_file(path: PathBuf) -> Result<Vec<u8>, EmojiError> {
    if !path.is_file() {
        return Err(EmojiError::NotFound { path });
    }
    std::fs::read(&path).map_err(|source| EmojiError::Io { path, source })
}

impl EmojiImageSource for LocalEmojiSource {
    fn name(&self) -> &str {
        "local"
    }

    fn naming(&self) -> EmojiNaming {
        self.naming
    }

    fn fetch(&self, key: &EmojiKey) -> Result<Vec<u8>, EmojiError> {
        if key.is_empty() {
            return Err(EmojiError::Empty);
        }
        read_file(self.path_for(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn reads_png_using_naming_convention() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(8, 6, Rgba([255, 0, 0, 255]));
        img.save(dir.path().join("emoji_u1f600.png")).unwrap();

        let source = LocalEmojiSource::new(dir.path());
        let key = source.canonicalize("\u{1F600}");
        let bitmap = source.resolve(&key).unwrap();
        assert_eq!(bitmap.dimensions(), (8, 6));
        assert_eq!(bitmap.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalEmojiSource::with_naming(dir.path(), EmojiNaming::Twemoji);
        let key = source.canonicalize("\u{1F680}");
        match source.fetch(&key) {
            Err(EmojiError::NotFound { path }) => {
                assert_eq!(path, dir.path().join("1f680.png"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("emoji_u1f389.png"), b"not a png").unwrap();
        let source = LocalEmojiSource::new(dir.path());
        let key = source.canonicalize("\u{1F389}");
        assert!(matches!(source.resolve(&key), Err(EmojiError::Decode(_))));
    }

    #[test]
    fn discord_emoji_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        img.save(dir.path().join("discord_123456.png")).unwrap();

        let source = LocalEmojiSource::new(dir.path());
        assert_eq!(source.discord_emoji(123456).unwrap().dimensions(), (4, 4));
        match source.discord_emoji(42) {
            Err(EmojiError::NotFound { path }) => {
                assert_eq!(path, dir.path().join("discord_42.png"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
