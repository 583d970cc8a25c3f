use std::sync::Arc;

use powertext_emoji::{EmojiAsset, EmojiResolver};

use crate::error::{LayoutError, Result};
use crate::font::{FontHandle, FontRule, FontRules, MetricsCache};
use crate::layout::{DrawOptions, LayoutUnit, Line, LineBreaker, LineHeight, Truncator};
use crate::unicode::{Segment, Segmenter, UnitKind};

/// Final lines of one layout call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutResult {
    pub lines: Vec<Line>,
    /// Whether content was cut by `max_y` or `max_lines`.
    pub truncated: bool,
}

impl LayoutResult {
    pub fn height(&self) -> f32 {
        self.lines.iter().map(|l| l.height).sum()
    }

    pub fn width(&self) -> f32 {
        self.lines.iter().map(|l| l.width).fold(0.0, f32::max)
    }

    pub fn units(&self) -> impl Iterator<Item = &LayoutUnit> {
        self.lines.iter().flat_map(|l| l.units.iter())
    }
}

/// A unit before emoji sizing; emoji height depends on neighbouring text.
enum Pending<'t> {
    Ready(LayoutUnit),
    Emoji(Segment<'t>, Arc<EmojiAsset>),
}

/// Runs segmentation through truncation for one call.
///
/// Borrows the long-lived caches from its owner; holds no state of its own.
pub struct TextLayouter<'a> {
    metrics: &'a MetricsCache,
    emoji: Option<&'a EmojiResolver>,
    rules: &'a FontRules,
    options: &'a DrawOptions,
}

impl<'a> TextLayouter<'a> {
    pub fn new(
        metrics: &'a MetricsCache,
        emoji: Option<&'a EmojiResolver>,
        rules: &'a FontRules,
        options: &'a DrawOptions,
    ) -> Self {
        Self {
            metrics,
            emoji,
            rules,
            options,
        }
    }

    pub fn layout(&self, text: &str) -> Result<LayoutResult> {
        self.options.validate(self.rules)?;

        let marker = self.marker_units()?;
        let marker_width: f32 = marker.iter().map(|u| u.width).sum();
        if let Some(max_x) = self.options.max_x {
            if marker_width > max_x {
                return Err(LayoutError::invalid(format!(
                    "end text {:?} is {marker_width}px wide, wider than max_x {max_x}",
                    self.options.end_text
                )));
            }
        }

        let segmenter = Segmenter::new(text, self.options.has_emoji);
        let mut pending = Vec::new();
        for segment in segmenter.iter() {
            pending.push(self.classify(segment)?);
        }
        let units = self.size_emoji(pending);

        let line_height = self.line_height(&units);
        let lines = LineBreaker::new(self.options.max_x, self.options.wrap_mode)
            .break_lines(text, units, line_height);

        Ok(Truncator::new(
            self.options.max_x,
            self.options.max_y,
            self.options.max_lines,
            line_height,
        )
        .truncate(lines, &marker))
    }

    fn text_unit(&self, segment: Segment<'_>, rule: &FontRule) -> LayoutUnit {
        let size = self.metrics.measure(rule.font(), segment.text);
        LayoutUnit::text(
            segment,
            rule.font().clone(),
            rule.resolve_color(self.options.default_color),
            size.width,
            size.height,
        )
    }

    fn classify<'t>(&self, segment: Segment<'t>) -> Result<Pending<'t>> {
        match segment.kind {
            UnitKind::Newline => return Ok(Pending::Ready(LayoutUnit::line_break(segment))),
            UnitKind::Emoji => {
                if let Some(resolver) = self.emoji {
                    match resolver.resolve(segment.text) {
                        Ok(asset) => return Ok(Pending::Emoji(segment, asset)),
                        Err(source) if self.options.strict_emoji => {
                            return Err(LayoutError::EmojiUnavailable {
                                cluster: segment.text.to_string(),
                                source,
                            });
                        }
                        Err(err) => {
                            tracing::debug!(
                                cluster = segment.text,
                                offset = segment.offset,
                                error = %err,
                                "emoji unavailable, falling back to font rules"
                            );
                        }
                    }
                } else {
                    tracing::debug!(cluster = segment.text, "no emoji source configured");
                }
            }
            UnitKind::Char => {}
        }

        let rule = self.rules.classify(segment.text, segment.offset)?;
        Ok(Pending::Ready(self.text_unit(segment, rule)))
    }

    /// Scales each emoji to the size of the nearest text font.
    fn size_emoji(&self, pending: Vec<Pending<'_>>) -> Vec<LayoutUnit> {
        let fonts: Vec<Option<FontHandle>> = pending
            .iter()
            .map(|p| match p {
                Pending::Ready(unit) => unit.font().cloned(),
                Pending::Emoji(..) => None,
            })
            .collect();
        let fallback = self.rules.first().map(|rule| rule.font());

        pending
            .into_iter()
            .enumerate()
            .map(|(idx, p)| match p {
                Pending::Ready(unit) => unit,
                Pending::Emoji(segment, asset) => {
                    let ambient = fonts[..idx]
                        .iter()
                        .rev()
                        .flatten()
                        .next()
                        .or_else(|| fonts[idx + 1..].iter().flatten().next())
                        .or(fallback);
                    let height = ambient
                        .map(|font| font.font_size().round().max(1.0) as u32)
                        .unwrap_or_else(|| asset.bitmap.height().max(1));
                    let bitmap = match self.emoji {
                        Some(resolver) => resolver.scaled(&asset, height),
                        None => Arc::new(asset.bitmap.clone()),
                    };
                    LayoutUnit::image(segment, asset.key.clone(), bitmap)
                }
            })
            .collect()
    }

    fn line_height(&self, units: &[LayoutUnit]) -> LineHeight {
        if let Some(height) = self.options.line_height {
            return LineHeight::Fixed(height);
        }
        let tallest = units
            .iter()
            .filter(|u| !u.is_break())
            .map(|u| u.height)
            .fold(None, |acc: Option<f32>, h| Some(acc.map_or(h, |a| a.max(h))));
        let empty = tallest.unwrap_or_else(|| {
            self.rules
                .first()
                .map(|rule| self.metrics.measure(rule.font(), " ").height)
                .unwrap_or(0.0)
        });
        LineHeight::Auto { empty }
    }

    /// End marker units: never emoji, newlines dropped.
    fn marker_units(&self) -> Result<Vec<LayoutUnit>> {
        let mut units = Vec::new();
        for segment in Segmenter::new(&self.options.end_text, false).iter() {
            if segment.kind == UnitKind::Newline {
                continue;
            }
            let rule = match &self.options.end_text_rule {
                Some(rule) => rule,
                None => self.rules.classify(segment.text, segment.offset)?,
            };
            units.push(self.text_unit(segment, rule));
        }
        Ok(units)
    }
}
