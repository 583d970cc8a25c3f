//! PowerText configuration system
//!
//! Loads font rules, layout limits and emoji source settings from
//! `powertext.toml`, with `POWERTEXT_*` environment variables taking
//! precedence.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "powertext.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PowerTextConfig {
    /// Fonts and colors
    pub text: TextConfig,
    /// Wrapping and truncation limits
    pub layout: LayoutConfig,
    /// Where emoji images come from
    pub emoji: EmojiConfig,
    /// Demo binary settings
    pub demo: DemoConfig,
}

/// Character class a font entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NamedMatcher {
    AsciiAlnum,
    Kana,
    Cjk,
    Hangul,
    Emoji,
    #[default]
    Any,
}

/// `matcher = "cjk"` or `matcher = { chars = "…" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Matcher {
    Named(NamedMatcher),
    Chars { chars: String },
}

impl Default for Matcher {
    fn default() -> Self {
        Matcher::Named(NamedMatcher::Any)
    }
}

/// One font rule: the first entry whose matcher accepts a character wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontEntry {
    /// Path to a .ttf/.otf file
    pub path: PathBuf,
    /// Pixel size
    pub size: f32,
    pub matcher: Matcher,
    /// Overrides `text.color` for this rule
    pub color: Option<[u8; 3]>,
}

impl Default for FontEntry {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            size: 32.0,
            matcher: Matcher::default(),
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Ordered font rules
    pub fonts: Vec<FontEntry>,
    /// Default text color
    pub color: [u8; 3],
    /// Marker appended to truncated text
    pub end_text: String,
    /// Font for the marker; falls back to the regular rules
    pub end_font: Option<FontEntry>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            fonts: Vec::new(),
            color: [0, 0, 0],
            end_text: String::new(),
            end_font: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WrapSetting {
    NoWrap,
    BreakWord,
    #[default]
    BreakAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width budget in pixels; unset means unbounded
    pub max_x: Option<f32>,
    /// Height budget in pixels; unset means unbounded
    pub max_y: Option<f32>,
    pub max_lines: Option<usize>,
    /// Fixed line height; unset sizes lines by content
    pub line_height: Option<f32>,
    pub wrap: WrapSetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EmojiSourceKind {
    /// Emoji are drawn with the font rules
    None,
    /// PNG files from `emoji.directory`
    Local,
    /// PNG files from the CDN in `emoji.cdn`
    #[default]
    Remote,
}

impl std::str::FromStr for EmojiSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(EmojiSourceKind::None),
            "local" => Ok(EmojiSourceKind::Local),
            "remote" | "cdn" => Ok(EmojiSourceKind::Remote),
            other => Err(format!("unknown emoji source '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiConfig {
    /// Render emoji clusters as images
    pub enabled: bool,
    pub source: EmojiSourceKind,
    /// Directory for the local source
    pub directory: Option<PathBuf>,
    /// File naming for the local source: noto, twemoji or per-codepoint
    pub naming: String,
    /// CDN style (twemoji, noto, emojicdn:<style>) or an http(s) URL template
    pub cdn: String,
    /// Per-request timeout for the remote source
    pub timeout_ms: u64,
    /// Do not retry emoji that failed once
    pub remember_failures: bool,
    /// Fail instead of falling back to fonts
    pub strict: bool,
}

impl Default for EmojiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source: EmojiSourceKind::Remote,
            directory: None,
            naming: "per-codepoint".to_string(),
            cdn: "twemoji".to_string(),
            timeout_ms: 15_000,
            remember_failures: false,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Text to render; the built-in sample when unset
    pub text: Option<String>,
    /// Output PNG path
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    /// Draw origin in pixels
    pub origin: [f32; 2],
    /// Draw guide lines at the layout limits
    pub guides: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            text: None,
            output: PathBuf::from("powertext-demo.png"),
            width: 1000,
            height: 600,
            background: [255, 255, 255],
            origin: [40.0, 40.0],
            guides: true,
        }
    }
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl PowerTextConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `powertext.toml` from the current directory, or defaults.
    ///
    /// A missing file is silent; an unreadable or malformed one is logged.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        // Layout settings
        if let Ok(val) = std::env::var("POWERTEXT_MAX_X") {
            if let Ok(max_x) = val.parse::<f32>() {
                self.layout.max_x = Some(max_x);
            }
        }
        if let Ok(val) = std::env::var("POWERTEXT_MAX_Y") {
            if let Ok(max_y) = val.parse::<f32>() {
                self.layout.max_y = Some(max_y);
            }
        }
        if let Ok(val) = std::env::var("POWERTEXT_MAX_LINES") {
            if let Ok(lines) = val.parse::<usize>() {
                self.layout.max_lines = Some(lines);
            }
        }

        // Text settings
        if let Ok(end_text) = std::env::var("POWERTEXT_END_TEXT") {
            self.text.end_text = end_text;
        }

        // Emoji settings
        if let Ok(val) = std::env::var("POWERTEXT_HAS_EMOJI") {
            self.emoji.enabled = parse_bool(&val);
        }
        if let Ok(val) = std::env::var("POWERTEXT_EMOJI_SOURCE") {
            if let Ok(kind) = val.parse::<EmojiSourceKind>() {
                self.emoji.source = kind;
            }
        }
        if let Ok(dir) = std::env::var("POWERTEXT_EMOJI_DIR") {
            self.emoji.directory = Some(PathBuf::from(dir));
        }
        if let Ok(cdn) = std::env::var("POWERTEXT_EMOJI_CDN") {
            self.emoji.cdn = cdn;
        }
        if let Ok(val) = std::env::var("POWERTEXT_EMOJI_TIMEOUT_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.emoji.timeout_ms = ms;
            }
        }

        // Demo settings
        if let Ok(output) = std::env::var("POWERTEXT_OUTPUT") {
            self.demo.output = PathBuf::from(output);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from powertext.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PowerTextConfig::default();
        assert!(config.text.fonts.is_empty());
        assert!(config.emoji.enabled);
        assert_eq!(config.emoji.source, EmojiSourceKind::Remote);
        assert_eq!(config.layout.wrap, WrapSetting::BreakAll);
        assert!(config.layout.max_x.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = PowerTextConfig::default();
        config.text.fonts.push(FontEntry {
            path: PathBuf::from("fonts/latin.ttf"),
            matcher: Matcher::Chars {
                chars: "…".to_string(),
            },
            ..FontEntry::default()
        });
        config.layout.max_lines = Some(3);
        let toml_str = config.to_toml_string().unwrap();
        let parsed: PowerTextConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_font_rules() {
        let toml_str = r#"
            [text]
            color = [20, 20, 20]
            end_text = "..."

            [[text.fonts]]
            path = "a.ttf"
            size = 40
            matcher = "ascii-alnum"
            color = [255, 0, 0]

            [[text.fonts]]
            path = "b.ttf"
            matcher = { chars = "，。" }

            [[text.fonts]]
            path = "c.ttf"

            [layout]
            max_x = 300
            wrap = "break-word"
        "#;
        let config: PowerTextConfig = toml::from_str(toml_str).unwrap();
        let fonts = &config.text.fonts;
        assert_eq!(fonts.len(), 3);
        assert_eq!(fonts[0].matcher, Matcher::Named(NamedMatcher::AsciiAlnum));
        assert_eq!(fonts[0].size, 40.0);
        assert_eq!(fonts[0].color, Some([255, 0, 0]));
        assert_eq!(
            fonts[1].matcher,
            Matcher::Chars {
                chars: "，。".to_string()
            }
        );
        assert_eq!(fonts[2].matcher, Matcher::Named(NamedMatcher::Any));
        assert_eq!(fonts[2].size, 32.0);
        assert_eq!(config.layout.max_x, Some(300.0));
        assert_eq!(config.layout.wrap, WrapSetting::BreakWord);
        assert_eq!(config.text.end_text, "...");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[emoji]\nsource = \"local\"\ndirectory = \"emoji\"\n").unwrap();

        let config = PowerTextConfig::load_from_file(&path).unwrap();
        assert_eq!(config.emoji.source, EmojiSourceKind::Local);
        assert_eq!(config.emoji.directory, Some(PathBuf::from("emoji")));

        std::fs::write(&path, "[layout\nmax_x = ").unwrap();
        assert!(matches!(
            PowerTextConfig::load_from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            PowerTextConfig::load_from_file(dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if powertext.toml doesn't exist
        let config = PowerTextConfig::load_or_default();
        assert_eq!(config.emoji.timeout_ms, 15_000);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("POWERTEXT_MAX_X", "480");
            std::env::set_var("POWERTEXT_MAX_LINES", "not-a-number");
            std::env::set_var("POWERTEXT_HAS_EMOJI", "false");
            std::env::set_var("POWERTEXT_EMOJI_SOURCE", "local");
            std::env::set_var("POWERTEXT_EMOJI_DIR", "/tmp/emoji");
            std::env::set_var("POWERTEXT_OUTPUT", "out.png");
        }

        let mut config = PowerTextConfig::default();
        config.merge_with_env();

        assert_eq!(config.layout.max_x, Some(480.0));
        assert_eq!(config.layout.max_lines, None);
        assert!(!config.emoji.enabled);
        assert_eq!(config.emoji.source, EmojiSourceKind::Local);
        assert_eq!(config.emoji.directory, Some(PathBuf::from("/tmp/emoji")));
        assert_eq!(config.demo.output, PathBuf::from("out.png"));

        unsafe {
            std::env::remove_var("POWERTEXT_MAX_X");
            std::env::remove_var("POWERTEXT_MAX_LINES");
            std::env::remove_var("POWERTEXT_HAS_EMOJI");
            std::env::remove_var("POWERTEXT_EMOJI_SOURCE");
            std::env::remove_var("POWERTEXT_EMOJI_DIR");
            std::env::remove_var("POWERTEXT_OUTPUT");
        }
    }
}
