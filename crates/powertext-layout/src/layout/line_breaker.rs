use hashbrown::HashSet;
use unicode_linebreak::{BreakOpportunity, linebreaks};

use crate::layout::{LayoutUnit, Line, LineHeight, WrapMode};

/// Kind of line break at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreakKind {
    /// Required line break (e.g., explicit newline).
    Mandatory,
    /// Optional line break opportunity.
    Opportunity,
}

/// A line break opportunity in the text.
#[derive(Debug, Clone, Copy)]
pub struct LineBreak {
    /// Byte offset *after* the break.
    pub offset: usize,
    pub kind: LineBreakKind,
}

/// UAX #14 break opportunities, end of text included.
pub fn compute_line_breaks(text: &str) -> Vec<LineBreak> {
    linebreaks(text)
        .map(|(offset, opp)| LineBreak {
            offset,
            kind: match opp {
                BreakOpportunity::Mandatory => LineBreakKind::Mandatory,
                BreakOpportunity::Allowed => LineBreakKind::Opportunity,
            },
        })
        .collect()
}

/// Greedy line breaking over measured units.
#[derive(Debug, Clone, Copy)]
pub struct LineBreaker {
    max_width: Option<f32>,
    mode: WrapMode,
}

impl LineBreaker {
    pub fn new(max_width: Option<f32>, mode: WrapMode) -> Self {
        Self { max_width, mode }
    }

    fn limit(&self) -> Option<f32> {
        match self.mode {
            WrapMode::NoWrap => None,
            _ => self.max_width,
        }
    }

    /// Splits `units` into lines.
    ///
    /// `text` is the source the unit offsets point into; it is only read in
    /// [`WrapMode::BreakWord`]. Break units close the current line and are
    /// dropped. The result always has at least one line.
    pub fn break_lines(
        &self,
        text: &str,
        units: Vec<LayoutUnit>,
        line_height: LineHeight,
    ) -> Vec<Line> {
        let limit = self.limit();
        let opportunities: HashSet<usize> = match (self.mode, limit) {
            (WrapMode::BreakWord, Some(_)) => compute_line_breaks(text)
                .into_iter()
                .map(|b| b.offset)
                .collect(),
            _ => HashSet::new(),
        };

        let mut lines = Vec::new();
        let mut current = Line::new();

        for unit in units {
            if unit.is_break() {
                lines.push(finish(current, line_height));
                current = Line::new();
                continue;
            }

            let overflow = limit.filter(|max| !current.is_empty() && current.width + unit.width > *max);
            if let Some(max) = overflow {
                let carried = if self.mode == WrapMode::BreakWord
                    && !opportunities.contains(&unit.offset)
                {
                    split_at_last_opportunity(&mut current, &opportunities)
                } else {
                    Vec::new()
                };
                tracing::trace!(
                    offset = unit.offset,
                    width = current.width,
                    carried = carried.len(),
                    "wrapping line"
                );
                lines.push(finish(current, line_height));
                current = Line::new();
                for moved in carried {
                    current.push(moved);
                }
                if !current.is_empty() && current.width + unit.width > max {
                    lines.push(finish(current, line_height));
                    current = Line::new();
                }
            }

            current.push(unit);
        }

        lines.push(finish(current, line_height));
        lines
    }
}

fn finish(mut line: Line, line_height: LineHeight) -> Line {
    line.refresh(line_height);
    line
}

/// Detaches the units after the last break opportunity inside `line`.
///
/// Returns nothing when the line has no interior opportunity, leaving
/// character wrapping to the caller.
fn split_at_last_opportunity(line: &mut Line, opportunities: &HashSet<usize>) -> Vec<LayoutUnit> {
    let split = line
        .units
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find(|(_, unit)| opportunities.contains(&unit.offset))
        .map(|(idx, _)| idx);

    match split {
        Some(idx) => {
            let tail = line.units.split_off(idx);
            line.width = line.units.iter().map(|u| u.width).sum();
            tail
        }
        None => Vec::new(),
    }
}
