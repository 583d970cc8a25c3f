//! PowerText: mixed-script text rendering with per-character font rules.
//!
//! This crate wires the workspace together: it turns a [`PowerTextConfig`]
//! into font rules, draw options and an emoji source, and re-exports the
//! pieces needed to render without touching the member crates directly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};

pub use powertext_config::{
    EmojiConfig, EmojiSourceKind, FontEntry, Matcher, NamedMatcher, PowerTextConfig, TextConfig,
    WrapSetting,
};
pub use powertext_emoji::{
    CdnStyle, EmojiImageSource, EmojiNaming, EmojiResolver, LocalEmojiSource, RemoteEmojiSource,
};
pub use powertext_layout::font::{Predicate, script};
pub use powertext_layout::{
    Canvas, DrawOptions, FontHandle, FontRule, FontRules, LayoutError, LayoutResult,
    MonospaceFont, Point, RecordingCanvas, Rgb, TextDrawer, WrapMode,
};
pub use powertext_surface::{FontdueFont, RasterCanvas, load_font};

/// Character predicate for a configured matcher.
pub fn predicate_for(matcher: &Matcher) -> Predicate {
    match matcher {
        Matcher::Named(named) => match named {
            NamedMatcher::AsciiAlnum => Arc::new(script::is_ascii_alnum),
            NamedMatcher::Kana => Arc::new(script::is_kana),
            NamedMatcher::Cjk => Arc::new(script::is_cjk),
            NamedMatcher::Hangul => Arc::new(script::is_hangul),
            NamedMatcher::Emoji => Arc::new(script::is_emoji),
            NamedMatcher::Any => Arc::new(script::any),
        },
        Matcher::Chars { chars } => {
            let chars = chars.clone();
            Arc::new(move |c: char| chars.contains(c))
        }
    }
}

fn rule_from_entry(entry: &FontEntry) -> Result<FontRule> {
    let font = load_font(&entry.path, entry.size)
        .with_context(|| format!("loading font {}", entry.path.display()))?;
    let rule = FontRule::from_predicate(font, predicate_for(&entry.matcher));
    Ok(match entry.color {
        Some(color) => rule.with_color(color),
        None => rule,
    })
}

/// Builds the ordered rule list from `text.fonts`.
///
/// Entries whose font cannot be loaded are skipped with a warning; it is an
/// error only when no rule survives.
pub fn rules_from_config(text: &TextConfig) -> Result<FontRules> {
    let mut rules = FontRules::new();
    for entry in &text.fonts {
        match rule_from_entry(entry) {
            Ok(rule) => {
                rules.push(rule);
            }
            Err(err) => tracing::warn!(error = %format!("{err:#}"), "skipping font rule"),
        }
    }
    if rules.is_empty() {
        bail!("no usable font rules; add [[text.fonts]] entries to powertext.toml");
    }
    Ok(rules)
}

/// Rule for the end marker from `text.end_font`, matching every character.
pub fn end_rule_from_config(text: &TextConfig) -> Result<Option<FontRule>> {
    let Some(entry) = &text.end_font else {
        return Ok(None);
    };
    let font = load_font(&entry.path, entry.size)
        .with_context(|| format!("loading end text font {}", entry.path.display()))?;
    let rule = FontRule::new(font, script::any);
    Ok(Some(match entry.color {
        Some(color) => rule.with_color(color),
        None => rule,
    }))
}

pub fn draw_options_from_config(config: &PowerTextConfig) -> DrawOptions {
    let layout = &config.layout;
    DrawOptions {
        default_color: Rgb::from(config.text.color),
        max_x: layout.max_x,
        max_y: layout.max_y,
        max_lines: layout.max_lines,
        line_height: layout.line_height,
        wrap_mode: match layout.wrap {
            WrapSetting::NoWrap => WrapMode::NoWrap,
            WrapSetting::BreakWord => WrapMode::BreakWord,
            WrapSetting::BreakAll => WrapMode::BreakAll,
        },
        has_emoji: config.emoji.enabled,
        end_text: config.text.end_text.clone(),
        end_text_rule: None,
        strict_emoji: config.emoji.strict,
    }
}

/// The configured emoji source, or `None` when emoji are drawn with fonts.
pub fn emoji_source_from_config(emoji: &EmojiConfig) -> Result<Option<Box<dyn EmojiImageSource>>> {
    if !emoji.enabled {
        return Ok(None);
    }
    match emoji.source {
        EmojiSourceKind::None => Ok(None),
        EmojiSourceKind::Local => {
            let Some(dir) = &emoji.directory else {
                bail!("emoji.source is \"local\" but emoji.directory is not set");
            };
            let naming: EmojiNaming = emoji.naming.parse().map_err(anyhow::Error::msg)?;
            Ok(Some(Box::new(LocalEmojiSource::with_naming(dir, naming))))
        }
        EmojiSourceKind::Remote => {
            let style: CdnStyle = emoji.cdn.parse().map_err(anyhow::Error::msg)?;
            let source = RemoteEmojiSource::builder(style)
                .timeout(Duration::from_millis(emoji.timeout_ms))
                .build()
                .context("building emoji http client")?;
            Ok(Some(Box::new(source)))
        }
    }
}

/// A ready-to-use renderer: caches, rules and options in one place.
pub struct PowerText {
    drawer: TextDrawer,
    rules: FontRules,
    options: DrawOptions,
}

impl PowerText {
    pub fn new(drawer: TextDrawer, rules: FontRules, options: DrawOptions) -> Self {
        Self {
            drawer,
            rules,
            options,
        }
    }

    pub fn from_config(config: &PowerTextConfig) -> Result<Self> {
        let rules = rules_from_config(&config.text)?;
        let mut options = draw_options_from_config(config);
        options.end_text_rule = end_rule_from_config(&config.text)?;

        let drawer = match emoji_source_from_config(&config.emoji)? {
            Some(source) => TextDrawer::with_resolver(
                EmojiResolver::from_boxed(source).remember_failures(config.emoji.remember_failures),
            ),
            None => TextDrawer::new(),
        };
        Ok(Self::new(drawer, rules, options))
    }

    pub fn rules(&self) -> &FontRules {
        &self.rules
    }

    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    pub fn layout(&self, text: &str) -> Result<LayoutResult, LayoutError> {
        self.drawer.layout(text, &self.rules, &self.options)
    }

    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        origin: Point,
        text: &str,
    ) -> Result<LayoutResult, LayoutError> {
        self.drawer
            .draw_text(canvas, origin, text, &self.rules, &self.options)
    }
}
