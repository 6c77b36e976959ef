//! TrueType/OpenType caption fonts.
//!
//! Measures and rasterizes text with ab_glyph. Point sizes are converted to
//! pixels at 96 DPI so a given size renders the same as a typical desktop
//! rasterizer.

use std::fmt;
use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont, point};

use super::{FontMetrics, RawBounds};
use crate::error::{BarcodeError, Result};

const DPI: f32 = 96.0;
const POINTS_PER_INCH: f32 = 72.0;

/// A font loaded from a TrueType/OpenType file.
#[derive(Clone)]
pub struct TtfFont {
    name: String,
    font: FontArc,
}

impl fmt::Debug for TtfFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtfFont").field("name", &self.name).finish()
    }
}

impl TtfFont {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            BarcodeError::FontMetrics(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_bytes(path.display().to_string(), data)
    }

    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let font = FontArc::try_from_vec(data)
            .map_err(|e| BarcodeError::FontMetrics(format!("Failed to parse {}: {}", name, e)))?;
        Ok(Self { name, font })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scale at which one em spans `size` points.
    fn px_scale(&self, size: u32) -> PxScale {
        let em_px = size as f32 * DPI / POINTS_PER_INCH;
        let height = self.font.height_unscaled();
        let units_per_em = self.font.units_per_em().unwrap_or(height);
        PxScale::from(em_px * height / units_per_em)
    }

    /// Position glyphs along a baseline at y = 0. Returns the glyphs and the
    /// final caret position.
    fn layout(&self, size: u32, text: &str) -> (Vec<Glyph>, f32) {
        let scale = self.px_scale(size);
        let scaled = self.font.as_scaled(scale);

        let mut glyphs = Vec::new();
        let mut caret_x = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            if let Some(previous) = previous {
                caret_x += scaled.kern(previous, glyph_id);
            }
            glyphs.push(glyph_id.with_scale_and_position(scale, point(caret_x, 0.0)));
            caret_x += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }

        (glyphs, caret_x)
    }

    pub fn rasterize(&self, size: u32, text: &str, plot: &mut dyn FnMut(i32, i32, f32)) {
        let (glyphs, _) = self.layout(size, text);
        for glyph in glyphs {
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;
                    plot(x, y, coverage);
                });
            }
        }
    }
}

impl FontMetrics for TtfFont {
    fn measure(&self, size: u32, text: &str) -> Result<RawBounds> {
        let (glyphs, caret_x) = self.layout(size, text);

        let mut ink: Option<RawBounds> = None;
        for glyph in glyphs {
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let glyph_bounds = RawBounds {
                    left: bounds.min.x.floor() as i32,
                    right: bounds.max.x.ceil() as i32,
                    top: bounds.min.y.floor() as i32,
                    bottom: bounds.max.y.ceil() as i32,
                };
                ink = Some(match ink {
                    Some(acc) => RawBounds {
                        left: acc.left.min(glyph_bounds.left),
                        right: acc.right.max(glyph_bounds.right),
                        top: acc.top.min(glyph_bounds.top),
                        bottom: acc.bottom.max(glyph_bounds.bottom),
                    },
                    None => glyph_bounds,
                });
            }
        }

        // Whitespace-only text has no ink but still advances
        Ok(ink.unwrap_or(RawBounds {
            right: caret_x.ceil() as i32,
            ..RawBounds::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_font_error() {
        let result = TtfFont::from_file("/nonexistent/font.ttf");
        assert!(matches!(result, Err(BarcodeError::FontMetrics(_))));
    }

    #[test]
    fn test_garbage_bytes_are_font_error() {
        let result = TtfFont::from_bytes("garbage", vec![0u8; 16]);
        match result {
            Err(BarcodeError::FontMetrics(message)) => assert!(message.contains("garbage")),
            other => panic!("expected FontMetrics error, got {:?}", other.map(|f| f.name().to_string())),
        }
    }
}
