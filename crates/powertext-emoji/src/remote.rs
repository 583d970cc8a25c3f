use std::time::Duration;

use crate::{EmojiError, EmojiImageSource, EmojiKey, EmojiNaming};

const DEFAULT_USER_AGENT: &str = "powertext/0.1";

/// URL convention of a remote emoji CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdnStyle {
    /// jsDelivr mirror of the Twemoji 72x72 PNG assets.
    Twemoji,
    /// Noto Emoji 128px PNGs from the googlefonts repository.
    Noto,
    /// emojicdn.elk.sh with a vendor style (`apple`, `google`, `facebook`, ...).
    EmojiCdn { style: String },
    /// Custom URL; `{code}` expands to the file stem and `{emoji}` to the
    /// URL-encoded emoji text.
    Template(String),
}

impl CdnStyle {
    fn template(&self) -> String {
        match self {
            CdnStyle::Twemoji => {
                "https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/72x72/{code}.png".into()
            }
            CdnStyle::Noto => {
                "https://raw.githubusercontent.com/googlefonts/noto-emoji/main/png/128/{code}.png"
                    .into()
            }
            CdnStyle::EmojiCdn { style } => {
                format!("https://emojicdn.elk.sh/{{emoji}}?style={style}")
            }
            CdnStyle::Template(t) => t.clone(),
        }
    }

    /// Naming convention the CDN's file names follow.
    pub fn naming(&self) -> EmojiNaming {
        match self {
            CdnStyle::Noto => EmojiNaming::Noto,
            CdnStyle::Twemoji | CdnStyle::EmojiCdn { .. } | CdnStyle::Template(_) => {
                EmojiNaming::Twemoji
            }
        }
    }
}

impl std::str::FromStr for CdnStyle {
    type Err = String;

    /// Accepts `twemoji`, `noto`, `emojicdn:<style>` or a URL template.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(CdnStyle::Template(s.to_string()));
        }
        match lower.as_str() {
            "twemoji" | "twitter" => Ok(CdnStyle::Twemoji),
            "noto" | "google-noto" => Ok(CdnStyle::Noto),
            other => match other.strip_prefix("emojicdn:") {
                Some(style) if !style.is_empty() => Ok(CdnStyle::EmojiCdn {
                    style: style.to_string(),
                }),
                _ => Err(format!("unknown emoji cdn '{s}'")),
            },
        }
    }
}

/// Emoji source fetching images from a CDN with a blocking HTTP client.
///
/// Every fetch is a single attempt bounded by the configured timeout.
pub struct RemoteEmojiSource {
    style: CdnStyle,
    naming: EmojiNaming,
    client: reqwest::blocking::Client,
}

impl RemoteEmojiSource {
    pub fn new(style: CdnStyle) -> Result<Self, EmojiError> {
        Self::with_timeout(style, Duration::from_secs(15))
    }

    pub fn with_timeout(style: CdnStyle, timeout: Duration) -> Result<Self, EmojiError> {
        Self::builder(style).timeout(timeout).build()
    }

    pub fn builder(style: CdnStyle) -> RemoteEmojiSourceBuilder {
        RemoteEmojiSourceBuilder {
            naming: style.naming(),
            style,
            timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn style(&self) -> &CdnStyle {
        &self.style
    }

    /// URL the image for `key` is fetched from.
    pub fn url_for(&self, key: &EmojiKey) -> String {
        let stem = self.naming.file_stem(key);
        let emoji = key.to_text();
        self.style
            .template()
            .replace("{code}", &stem)
            .replace("{emoji}", &urlencoding::encode(&emoji))
    }
}

impl EmojiImageSource for RemoteEmojiSource {
    fn name(&self) -> &str {
        "remote"
    }

    fn naming(&self) -> EmojiNaming {
        self.naming
    }

    fn fetch(&self, key: &EmojiKey) -> Result<Vec<u8>, EmojiError> {
        if key.is_empty() {
            return Err(EmojiError::Empty);
        }
        let url_str = self.url_for(key);
        let url = reqwest::Url::parse(&url_str).map_err(|e| EmojiError::Blocked {
            url: url_str.clone(),
            reason: e.to_string(),
        })?;
        let scheme = url.scheme().to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(EmojiError::Blocked {
                url: url_str,
                reason: "unsupported scheme".into(),
            });
        }

        tracing::debug!(%url, "fetching emoji");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EmojiError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }
        Ok(resp.bytes()?.to_vec())
    }
}

/// Builder for [`RemoteEmojiSource`].
pub struct RemoteEmojiSourceBuilder {
    style: CdnStyle,
    naming: EmojiNaming,
    timeout: Duration,
    user_agent: String,
}

impl RemoteEmojiSourceBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the naming used to build `{code}`.
    pub fn naming(mut self, naming: EmojiNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn build(self) -> Result<RemoteEmojiSource, EmojiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .build()?;
        Ok(RemoteEmojiSource {
            style: self.style,
            naming: self.naming,
            client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twemoji_url_uses_unpadded_stem() {
        let source = RemoteEmojiSource::new(CdnStyle::Twemoji).unwrap();
        let key = source.canonicalize("\u{1F600}");
        assert_eq!(
            source.url_for(&key),
            "https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/72x72/1f600.png"
        );
    }

    #[test]
    fn noto_url_uses_noto_stem() {
        let source = RemoteEmojiSource::new(CdnStyle::Noto).unwrap();
        let key = source.canonicalize("\u{2615}");
        assert!(source.url_for(&key).ends_with("/png/128/emoji_u2615.png"));
    }

    #[test]
    fn emojicdn_url_encodes_the_emoji() {
        let source = RemoteEmojiSource::new(CdnStyle::EmojiCdn {
            style: "apple".into(),
        })
        .unwrap();
        let key = source.canonicalize("\u{1F600}");
        assert_eq!(
            source.url_for(&key),
            "https://emojicdn.elk.sh/%F0%9F%98%80?style=apple"
        );
    }

    #[test]
    fn parses_cdn_styles() {
        assert_eq!("twemoji".parse::<CdnStyle>(), Ok(CdnStyle::Twemoji));
        assert_eq!("Noto".parse::<CdnStyle>(), Ok(CdnStyle::Noto));
        assert_eq!(
            "emojicdn:google".parse::<CdnStyle>(),
            Ok(CdnStyle::EmojiCdn {
                style: "google".into()
            })
        );
        assert_eq!(
            "https://example.com/{code}.png".parse::<CdnStyle>(),
            Ok(CdnStyle::Template("https://example.com/{code}.png".into()))
        );
        assert!("emojicdn:".parse::<CdnStyle>().is_err());
    }

    #[test]
    fn non_http_templates_are_blocked() {
        let source =
            RemoteEmojiSource::new(CdnStyle::Template("file:///etc/{code}.png".into())).unwrap();
        let key = source.canonicalize("\u{1F600}");
        assert!(matches!(source.fetch(&key), Err(EmojiError::Blocked { .. })));
    }
}
