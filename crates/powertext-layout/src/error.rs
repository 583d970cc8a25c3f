use powertext_emoji::EmojiError;

/// Fatal layout failures. Each aborts the call before the canvas is touched.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("no font rule matches {grapheme:?} (U+{codepoint:04X}) at byte {offset}")]
    Classification {
        grapheme: String,
        codepoint: u32,
        offset: usize,
    },

    #[error("invalid layout configuration: {reason}")]
    InvalidLayoutConfig { reason: String },

    /// Only raised when the caller asked for strict emoji handling.
    #[error("emoji {cluster:?} could not be resolved: {source}")]
    EmojiUnavailable {
        cluster: String,
        #[source]
        source: EmojiError,
    },
}

impl LayoutError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LayoutError::InvalidLayoutConfig {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
