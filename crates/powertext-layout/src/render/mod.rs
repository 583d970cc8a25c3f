pub mod recording;

pub use recording::{DrawCommand, RecordingCanvas};

use image::RgbaImage;

use crate::color::Rgb;
use crate::font::FontHandle;
use crate::geometry::Point;
use crate::layout::{LayoutResult, UnitContent};

/// Drawing target.
///
/// Positions are the top-left corner of the unit box in canvas pixels.
/// Implementations clip silently; nothing here can fail.
pub trait Canvas {
    fn draw_text_run(&mut self, position: Point, text: &str, font: &FontHandle, color: Rgb);

    fn paste_image(&mut self, position: Point, bitmap: &RgbaImage);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn draw_text_run(&mut self, position: Point, text: &str, font: &FontHandle, color: Rgb) {
        (**self).draw_text_run(position, text, font, color);
    }

    fn paste_image(&mut self, position: Point, bitmap: &RgbaImage) {
        (**self).paste_image(position, bitmap);
    }
}

/// Walks a finished layout and issues one canvas call per unit.
pub struct Renderer;

impl Renderer {
    pub fn render(layout: &LayoutResult, origin: Point, canvas: &mut dyn Canvas) {
        let mut dy = 0.0;
        for line in &layout.lines {
            let mut dx = 0.0;
            for unit in &line.units {
                let position = origin.offset(dx, dy);
                match &unit.content {
                    UnitContent::Text { font, color } => {
                        canvas.draw_text_run(position, &unit.text, font, *color);
                    }
                    UnitContent::Image { bitmap, .. } => canvas.paste_image(position, bitmap),
                    UnitContent::Break => {}
                }
                dx += unit.width;
            }
            dy += line.height;
        }
    }
}
