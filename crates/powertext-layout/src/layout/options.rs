use crate::color::Rgb;
use crate::error::{LayoutError, Result};
use crate::font::{FontRule, FontRules};
use crate::layout::WrapMode;

/// Per-call layout parameters.
///
/// `max_x` and `max_y` are budgets measured from the draw origin; `None`
/// leaves that axis unbounded.
#[derive(Debug, Clone)]
pub struct DrawOptions {
    /// Color for rules that do not carry their own.
    pub default_color: Rgb,
    pub max_x: Option<f32>,
    pub max_y: Option<f32>,
    pub max_lines: Option<usize>,
    /// Fixed line height; `None` sizes each line by its tallest unit.
    pub line_height: Option<f32>,
    pub wrap_mode: WrapMode,
    /// Render emoji clusters as images when a source is available.
    pub has_emoji: bool,
    /// Marker appended when content is cut. Empty disables the marker.
    pub end_text: String,
    /// Rule used for every marker unit instead of the regular rules.
    pub end_text_rule: Option<FontRule>,
    /// Fail the call when an emoji cannot be resolved instead of
    /// falling back to the font rules.
    pub strict_emoji: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            default_color: Rgb::BLACK,
            max_x: None,
            max_y: None,
            max_lines: None,
            line_height: None,
            wrap_mode: WrapMode::default(),
            has_emoji: true,
            end_text: String::new(),
            end_text_rule: None,
            strict_emoji: false,
        }
    }
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<Rgb>) -> Self {
        self.default_color = color.into();
        self
    }

    pub fn with_max_x(mut self, max_x: f32) -> Self {
        self.max_x = Some(max_x);
        self
    }

    pub fn with_max_y(mut self, max_y: f32) -> Self {
        self.max_y = Some(max_y);
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    pub fn with_emoji(mut self, has_emoji: bool) -> Self {
        self.has_emoji = has_emoji;
        self
    }

    pub fn with_end_text(mut self, end_text: impl Into<String>) -> Self {
        self.end_text = end_text.into();
        self
    }

    pub fn with_end_text_rule(mut self, rule: FontRule) -> Self {
        self.end_text_rule = Some(rule);
        self
    }

    pub fn with_strict_emoji(mut self, strict: bool) -> Self {
        self.strict_emoji = strict;
        self
    }

    /// Checks everything that can be checked without measuring text.
    pub fn validate(&self, rules: &FontRules) -> Result<()> {
        if rules.is_empty() {
            return Err(LayoutError::invalid("at least one font rule is required"));
        }
        for (name, value) in [
            ("max_x", self.max_x),
            ("max_y", self.max_y),
            ("line_height", self.line_height),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(LayoutError::invalid(format!(
                        "{name} must be a positive number, got {v}"
                    )));
                }
            }
        }
        if self.max_lines == Some(0) {
            return Err(LayoutError::invalid("max_lines must be at least 1"));
        }
        Ok(())
    }
}
