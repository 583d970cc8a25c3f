use crate::layout::LayoutUnit;

/// Line height policy for a whole layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeight {
    /// Tallest unit in the line; `empty` is used for lines without units.
    Auto { empty: f32 },
    /// Every line has this height.
    Fixed(f32),
}

/// One visual line: units in source order plus cached extents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub units: Vec<LayoutUnit>,
    pub width: f32,
    pub height: f32,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: Vec<LayoutUnit>, line_height: LineHeight) -> Self {
        let mut line = Line {
            units,
            width: 0.0,
            height: 0.0,
        };
        line.refresh(line_height);
        line
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Appends a unit, growing width and height. [`Line::refresh`] applies a
    /// fixed or empty-line height afterwards.
    pub fn push(&mut self, unit: LayoutUnit) {
        self.width += unit.width;
        self.height = self.height.max(unit.height);
        self.units.push(unit);
    }

    pub fn pop(&mut self) -> Option<LayoutUnit> {
        let unit = self.units.pop()?;
        self.width = self.units.iter().map(|u| u.width).sum();
        Some(unit)
    }

    /// Recomputes width and height from the units.
    pub fn refresh(&mut self, line_height: LineHeight) {
        self.width = self.units.iter().map(|u| u.width).sum();
        self.height = match line_height {
            LineHeight::Fixed(height) => height,
            LineHeight::Auto { empty } if self.units.is_empty() => empty,
            LineHeight::Auto { .. } => self.units.iter().map(|u| u.height).fold(0.0, f32::max),
        };
    }

    pub fn text(&self) -> String {
        self.units.iter().map(|u| u.text.as_str()).collect()
    }
}
