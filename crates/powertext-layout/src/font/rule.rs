use core::fmt;
use std::sync::Arc;

use crate::color::Rgb;
use crate::error::{LayoutError, Result};
use crate::font::FontHandle;

/// Character predicate shared by a rule.
pub type Predicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// A font and optional color for every character the predicate accepts.
#[derive(Clone)]
pub struct FontRule {
    font: FontHandle,
    predicate: Predicate,
    color: Option<Rgb>,
    order_index: usize,
}

impl FontRule {
    pub fn new<F>(font: FontHandle, predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self {
            font,
            predicate: Arc::new(predicate),
            color: None,
            order_index: 0,
        }
    }

    pub fn from_predicate(font: FontHandle, predicate: Predicate) -> Self {
        Self {
            font,
            predicate,
            color: None,
            order_index: 0,
        }
    }

    pub fn with_color(mut self, color: impl Into<Rgb>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    /// Position in the owning [`FontRules`]; zero until registered.
    pub fn order_index(&self) -> usize {
        self.order_index
    }

    pub fn matches(&self, ch: char) -> bool {
        (self.predicate)(ch)
    }

    /// The rule color, or `default` when the rule has none.
    pub fn resolve_color(&self, default: Rgb) -> Rgb {
        self.color.unwrap_or(default)
    }
}

impl fmt::Debug for FontRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRule")
            .field("font", &self.font)
            .field("color", &self.color)
            .field("order_index", &self.order_index)
            .finish_non_exhaustive()
    }
}

/// Ordered rule list. First match wins; there is no implicit fallback.
#[derive(Debug, Clone, Default)]
pub struct FontRules {
    rules: Vec<FontRule>,
}

impl FontRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule at the end of the list.
    pub fn push(&mut self, mut rule: FontRule) -> &mut Self {
        rule.order_index = self.rules.len();
        self.rules.push(rule);
        self
    }

    pub fn with(mut self, rule: FontRule) -> Self {
        self.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn first(&self) -> Option<&FontRule> {
        self.rules.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontRule> {
        self.rules.iter()
    }

    /// First rule accepting `ch`.
    pub fn find(&self, ch: char) -> Option<&FontRule> {
        self.rules.iter().find(|rule| rule.matches(ch))
    }

    /// Classifies a unit by its first code point.
    ///
    /// `offset` is the unit's byte offset in the source text and is only
    /// used to build the error.
    pub fn classify(&self, unit: &str, offset: usize) -> Result<&FontRule> {
        let Some(ch) = unit.chars().next() else {
            return Err(LayoutError::invalid("cannot classify an empty unit"));
        };
        self.find(ch).ok_or_else(|| LayoutError::Classification {
            grapheme: unit.to_string(),
            codepoint: ch as u32,
            offset,
        })
    }
}

impl FromIterator<FontRule> for FontRules {
    fn from_iter<I: IntoIterator<Item = FontRule>>(iter: I) -> Self {
        let mut rules = FontRules::new();
        for rule in iter {
            rules.push(rule);
        }
        rules
    }
}

impl<'a> IntoIterator for &'a FontRules {
    type Item = &'a FontRule;
    type IntoIter = core::slice::Iter<'a, FontRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
