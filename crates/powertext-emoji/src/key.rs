//! Canonical emoji keys and the file naming conventions of common emoji sets.

use core::fmt;

const ZWJ: u32 = 0x200D;
const VS15: u32 = 0xFE0E;
const VS16: u32 = 0xFE0F;

/// Canonical code-point sequence identifying one emoji glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmojiKey {
    code_points: Vec<u32>,
}

impl EmojiKey {
    pub fn new(code_points: Vec<u32>) -> Self {
        Self { code_points }
    }

    /// Key holding every code point of `cluster` unchanged.
    pub fn from_cluster(cluster: &str) -> Self {
        Self::new(cluster.chars().map(u32::from).collect())
    }

    pub fn code_points(&self) -> &[u32] {
        &self.code_points
    }

    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty()
    }

    pub fn contains_zwj(&self) -> bool {
        self.code_points.contains(&ZWJ)
    }

    /// Rebuild the emoji text from the key.
    pub fn to_text(&self) -> String {
        self.code_points
            .iter()
            .filter_map(|&cp| char::from_u32(cp))
            .collect()
    }

    /// Lowercase hex code points joined by `sep`, zero-padded to `width`.
    pub fn hex_joined(&self, sep: &str, width: usize) -> String {
        self.code_points
            .iter()
            .map(|cp| format!("{cp:0width$x}"))
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl fmt::Display for EmojiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_joined("-", 4))
    }
}

/// File naming convention of an emoji image set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmojiNaming {
    /// Noto Emoji PNG set: `emoji_u1f468_200d_1f469.png`, presentation
    /// selectors dropped.
    #[default]
    Noto,
    /// Twemoji assets: `1f468-200d-1f469.png`, VS16 dropped unless the
    /// sequence contains a ZWJ.
    Twemoji,
    /// One `u`-prefixed code point per segment, nothing dropped:
    /// `emoji_u1f468_u200d_u1f469.png`.
    PerCodepoint,
}

impl EmojiNaming {
    /// Canonicalise a raw cluster according to this convention.
    pub fn canonicalize(self, cluster: &str) -> EmojiKey {
        let raw = EmojiKey::from_cluster(cluster);
        match self {
            EmojiNaming::Noto => EmojiKey::new(
                raw.code_points
                    .into_iter()
                    .filter(|&cp| cp != VS15 && cp != VS16)
                    .collect(),
            ),
            EmojiNaming::Twemoji => {
                let keep_vs16 = raw.contains_zwj();
                EmojiKey::new(
                    raw.code_points
                        .into_iter()
                        .filter(|&cp| cp != VS15 && (keep_vs16 || cp != VS16))
                        .collect(),
                )
            }
            EmojiNaming::PerCodepoint => raw,
        }
    }

    /// File stem without the image extension.
    pub fn file_stem(self, key: &EmojiKey) -> String {
        match self {
            EmojiNaming::Noto => format!("emoji_u{}", key.hex_joined("_", 4)),
            EmojiNaming::Twemoji => key.hex_joined("-", 0),
            EmojiNaming::PerCodepoint => {
                let parts: Vec<String> = key
                    .code_points()
                    .iter()
                    .map(|cp| format!("u{cp:04x}"))
                    .collect();
                format!("emoji_{}", parts.join("_"))
            }
        }
    }

    pub fn file_name(self, key: &EmojiKey) -> String {
        format!("{}.png", self.file_stem(key))
    }
}

impl std::str::FromStr for EmojiNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "noto" => Ok(EmojiNaming::Noto),
            "twemoji" | "twitter" => Ok(EmojiNaming::Twemoji),
            "per-codepoint" | "per_codepoint" | "codepoint" => Ok(EmojiNaming::PerCodepoint),
            other => Err(format!("unknown emoji naming '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noto_drops_presentation_selectors() {
        let key = EmojiNaming::Noto.canonicalize("\u{270C}\u{FE0F}");
        assert_eq!(key.code_points(), &[0x270C]);
        assert_eq!(EmojiNaming::Noto.file_name(&key), "emoji_u270c.png");
    }

    #[test]
    fn twemoji_keeps_vs16_in_zwj_sequences() {
        // rainbow flag: white flag, VS16, ZWJ, rainbow
        let key = EmojiNaming::Twemoji.canonicalize("\u{1F3F3}\u{FE0F}\u{200D}\u{1F308}");
        assert_eq!(EmojiNaming::Twemoji.file_stem(&key), "1f3f3-fe0f-200d-1f308");

        let plain = EmojiNaming::Twemoji.canonicalize("\u{2764}\u{FE0F}");
        assert_eq!(EmojiNaming::Twemoji.file_stem(&plain), "2764");
    }

    #[test]
    fn twemoji_stems_are_not_padded() {
        let key = EmojiNaming::Twemoji.canonicalize("#\u{FE0F}\u{20E3}");
        assert_eq!(EmojiNaming::Twemoji.file_stem(&key), "23-20e3");
    }

    #[test]
    fn noto_pads_and_joins_with_underscores() {
        let key = EmojiNaming::Noto.canonicalize("#\u{FE0F}\u{20E3}");
        assert_eq!(EmojiNaming::Noto.file_stem(&key), "emoji_u0023_20e3");
    }

    #[test]
    fn per_codepoint_keeps_everything() {
        let key = EmojiNaming::PerCodepoint.canonicalize("\u{1F468}\u{200D}\u{1F469}");
        assert_eq!(
            EmojiNaming::PerCodepoint.file_name(&key),
            "emoji_u1f468_u200d_u1f469.png"
        );
    }

    #[test]
    fn key_round_trips_to_text() {
        let key = EmojiKey::from_cluster("\u{1F600}");
        assert_eq!(key.to_text(), "\u{1F600}");
        assert_eq!(key.to_string(), "1f600");
    }

    #[test]
    fn parses_naming_names() {
        assert_eq!("Noto".parse::<EmojiNaming>(), Ok(EmojiNaming::Noto));
        assert_eq!("twemoji".parse::<EmojiNaming>(), Ok(EmojiNaming::Twemoji));
        assert!("apple".parse::<EmojiNaming>().is_err());
    }
}
