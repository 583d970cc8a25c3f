use image::RgbaImage;

use crate::color::Rgb;
use crate::font::{FontHandle, FontId};
use crate::geometry::Point;
use crate::render::Canvas;

/// A single recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        position: Point,
        text: String,
        font_id: FontId,
        color: Rgb,
    },
    Image {
        position: Point,
        width: u32,
        height: u32,
    },
}

/// Canvas that records calls instead of drawing.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Concatenated text of all text runs, in call order.
    pub fn text(&self) -> String {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Image { .. } => None,
            })
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_text_run(&mut self, position: Point, text: &str, font: &FontHandle, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            font_id: font.id(),
            color,
        });
    }

    fn paste_image(&mut self, position: Point, bitmap: &RgbaImage) {
        self.commands.push(DrawCommand::Image {
            position,
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }
}
