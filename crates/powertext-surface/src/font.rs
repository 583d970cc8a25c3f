use std::path::Path;

use fontdue::{Font, FontSettings};
use powertext_layout::{FontHandle, FontMetrics, GlyphMask, TextSize};

use crate::SurfaceError;

/// A `fontdue` face at a fixed pixel size.
pub struct FontdueFont {
    font: Font,
    size: f32,
    ascent: f32,
    line_height: f32,
}

impl FontdueFont {
    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self, SurfaceError> {
        let settings = FontSettings {
            scale: size,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings)
            .map_err(|e| SurfaceError::InvalidFont(e.to_string()))?;

        let (ascent, line_height) = match font.horizontal_line_metrics(size) {
            // fontdue reports descent as a negative number
            Some(lm) => (lm.ascent, lm.ascent - lm.descent + lm.line_gap.max(0.0)),
            None => (size * 0.8, size),
        };
        Ok(Self {
            font,
            size,
            ascent,
            line_height,
        })
    }

    pub fn from_file(path: impl AsRef<Path>, size: f32) -> Result<Self, SurfaceError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SurfaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, size)
    }
}

impl FontMetrics for FontdueFont {
    fn measure(&self, text: &str) -> TextSize {
        let width = text
            .chars()
            .map(|ch| self.font.metrics(ch, self.size).advance_width)
            .sum();
        TextSize::new(width, self.line_height)
    }

    fn font_size(&self) -> f32 {
        self.size
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn rasterize(&self, ch: char) -> Option<GlyphMask> {
        let (metrics, coverage) = self.font.rasterize(ch, self.size);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        Some(GlyphMask {
            width: metrics.width as u32,
            height: metrics.height as u32,
            left: metrics.xmin,
            bottom: metrics.ymin,
            advance: metrics.advance_width,
            coverage,
        })
    }
}

/// Loads a font file into a shareable handle named after the file stem.
pub fn load_font(path: impl AsRef<Path>, size: f32) -> Result<FontHandle, SurfaceError> {
    let path = path.as_ref();
    let font = FontdueFont::from_file(path, size)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::debug!(font = %name, size, "loaded font");
    Ok(FontHandle::new(name, font))
}
