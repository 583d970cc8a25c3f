use std::path::Path;

use image::{Rgba, RgbaImage, imageops};
use powertext_layout::{Canvas, FontHandle, GlyphMask, Point, Rgb};

use crate::SurfaceError;

/// Canvas backed by an RGBA pixel buffer. Draws outside the buffer are clipped.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, SurfaceError> {
        Ok(Self::from_image(image::open(path)?.to_rgba8()))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        self.image.save(path)?;
        Ok(())
    }

    /// Horizontal guide line, used by the demo to mark layout bounds.
    pub fn hline(&mut self, y: u32, x0: u32, x1: u32, color: Rgba<u8>) {
        if y >= self.image.height() {
            return;
        }
        for x in x0..x1.min(self.image.width()) {
            self.image.put_pixel(x, y, color);
        }
    }

    pub fn vline(&mut self, x: u32, y0: u32, y1: u32, color: Rgba<u8>) {
        if x >= self.image.width() {
            return;
        }
        for y in y0..y1.min(self.image.height()) {
            self.image.put_pixel(x, y, color);
        }
    }

    fn blend_mask(&mut self, left: i64, top: i64, mask: &GlyphMask, color: Rgb) {
        let (width, height) = (self.image.width() as i64, self.image.height() as i64);
        for row in 0..mask.height as i64 {
            let y = top + row;
            if y < 0 || y >= height {
                continue;
            }
            for col in 0..mask.width as i64 {
                let x = left + col;
                if x < 0 || x >= width {
                    continue;
                }
                let coverage = mask.coverage[(row * mask.width as i64 + col) as usize];
                if coverage == 0 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(x as u32, y as u32);
                *dst = blend(*dst, color, coverage);
            }
        }
    }
}

/// Source-over blend of `color` at `coverage` onto `dst` (straight alpha).
fn blend(dst: Rgba<u8>, color: Rgb, coverage: u8) -> Rgba<u8> {
    let sa = coverage as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let src = [color.r, color.g, color.b];
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}

impl Canvas for RasterCanvas {
    fn draw_text_run(&mut self, position: Point, text: &str, font: &FontHandle, color: Rgb) {
        let baseline = position.y + font.ascent();
        let mut pen = position.x;
        for ch in text.chars() {
            match font.rasterize(ch) {
                Some(mask) => {
                    let left = (pen + mask.left as f32).round() as i64;
                    let top = (baseline - mask.bottom as f32 - mask.height as f32).round() as i64;
                    self.blend_mask(left, top, &mask, color);
                    pen += mask.advance;
                }
                None => {
                    let mut buf = [0u8; 4];
                    pen += font.measure(ch.encode_utf8(&mut buf)).width;
                }
            }
        }
    }

    fn paste_image(&mut self, position: Point, bitmap: &RgbaImage) {
        imageops::overlay(
            &mut self.image,
            bitmap,
            position.x.round() as i64,
            position.y.round() as i64,
        );
    }
}
