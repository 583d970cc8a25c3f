pub mod line;
pub mod line_breaker;
pub mod options;
pub mod text_layout;
pub mod truncate;
pub mod unit;

pub use line::{Line, LineHeight};
pub use line_breaker::{LineBreak, LineBreakKind, LineBreaker};
pub use options::DrawOptions;
pub use text_layout::{LayoutResult, TextLayouter};
pub use truncate::Truncator;
pub use unit::{LayoutUnit, UnitContent};

/// Line wrapping strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Do not perform automatic wrapping (only explicit newlines).
    NoWrap,
    /// Wrap at UAX #14 break opportunities where possible, falling back
    /// to grapheme boundaries for long words.
    BreakWord,
    /// Allow breaking between all grapheme clusters.
    #[default]
    BreakAll,
}

impl core::str::FromStr for WrapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "nowrap" | "no-wrap" => Ok(WrapMode::NoWrap),
            "word" | "break-word" => Ok(WrapMode::BreakWord),
            "all" | "char" | "break-all" => Ok(WrapMode::BreakAll),
            other => Err(format!("unknown wrap mode '{other}'")),
        }
    }
}
