use crate::layout::{LayoutResult, LayoutUnit, Line, LineHeight};

/// Cuts lines to a height and line-count budget and appends an end marker.
#[derive(Debug, Clone, Copy)]
pub struct Truncator {
    max_x: Option<f32>,
    max_y: Option<f32>,
    max_lines: Option<usize>,
    line_height: LineHeight,
}

impl Truncator {
    pub fn new(
        max_x: Option<f32>,
        max_y: Option<f32>,
        max_lines: Option<usize>,
        line_height: LineHeight,
    ) -> Self {
        Self {
            max_x,
            max_y,
            max_lines,
            line_height,
        }
    }

    /// Number of leading lines that fit both budgets.
    fn visible_count(&self, lines: &[Line]) -> usize {
        let mut total = 0.0f32;
        let mut count = 0;
        for line in lines {
            if self.max_lines.is_some_and(|max| count >= max) {
                break;
            }
            if self.max_y.is_some_and(|max| total + line.height > max) {
                break;
            }
            total += line.height;
            count += 1;
        }
        count
    }

    fn fits_height(&self, height: f32) -> bool {
        self.max_y.is_none_or(|max| height <= max)
    }

    pub fn truncate(&self, mut lines: Vec<Line>, marker: &[LayoutUnit]) -> LayoutResult {
        let visible = self.visible_count(&lines);
        if visible == lines.len() {
            return LayoutResult {
                lines,
                truncated: false,
            };
        }

        // Only empty lines (a trailing newline) left out: nothing was cut.
        if lines[visible..].iter().all(Line::is_empty) {
            lines.truncate(visible);
            return LayoutResult {
                lines,
                truncated: false,
            };
        }

        lines.truncate(visible);
        if marker.is_empty() {
            return LayoutResult {
                lines,
                truncated: true,
            };
        }

        let marker_width: f32 = marker.iter().map(|u| u.width).sum();
        while let Some(mut last) = lines.pop() {
            if let Some(max_x) = self.max_x {
                while !last.is_empty() && last.width + marker_width > max_x {
                    last.pop();
                }
            }
            last.units.extend(marker.iter().cloned());
            last.refresh(self.line_height);

            let above: f32 = lines.iter().map(|l| l.height).sum();
            if self.fits_height(above + last.height) {
                tracing::trace!(lines = lines.len() + 1, "truncated with end marker");
                lines.push(last);
                return LayoutResult {
                    lines,
                    truncated: true,
                };
            }
        }

        let mut marker_line = Line::from_units(marker.to_vec(), self.line_height);
        if let Some(max_x) = self.max_x {
            while !marker_line.is_empty() && marker_line.width > max_x {
                marker_line.pop();
            }
            marker_line.refresh(self.line_height);
        }
        let lines = if !marker_line.is_empty() && self.fits_height(marker_line.height) {
            vec![marker_line]
        } else {
            Vec::new()
        };
        LayoutResult {
            lines,
            truncated: true,
        }
    }
}
