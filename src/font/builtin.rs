//! Built-in bitmap caption font.
//!
//! Uses the Spleen 12×24 PSF2 font, scaled nearest-neighbor to the requested
//! point size. Every character occupies a fixed cell, so the measured width
//! grows with the point size and never shrinks.

use spleen_font::{FONT_12X24, PSF2Font};

use super::{FontMetrics, RawBounds};
use crate::error::Result;

const SOURCE_WIDTH: usize = 12;
const SOURCE_HEIGHT: usize = 24;
/// Rows of the source cell above the baseline
const SOURCE_ASCENT: usize = 19;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFont;

/// Pixel cell for one character at a point size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    width: usize,
    height: usize,
    ascent: usize,
}

impl Cell {
    fn at(size: u32) -> Self {
        // 96 DPI: one point is 4/3 pixels
        let height = (size as usize * 4).div_ceil(3);
        Self {
            width: height * SOURCE_WIDTH / SOURCE_HEIGHT,
            height,
            ascent: height * SOURCE_ASCENT / SOURCE_HEIGHT,
        }
    }
}

impl BuiltinFont {
    pub const NAME: &'static str = "spleen-12x24";

    pub fn rasterize(&self, size: u32, text: &str, plot: &mut dyn FnMut(i32, i32, f32)) {
        let cell = Cell::at(size);
        if cell.width == 0 || cell.height == 0 {
            return;
        }

        let mut font = PSF2Font::new(FONT_12X24).expect("embedded Spleen font is valid");

        for (index, ch) in text.chars().enumerate() {
            let utf8 = ch.to_string();
            let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) else {
                continue;
            };

            let mut bitmap = [[false; SOURCE_WIDTH]; SOURCE_HEIGHT];
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < SOURCE_HEIGHT && col_x < SOURCE_WIDTH {
                        bitmap[row_y][col_x] = on;
                    }
                }
            }

            let origin_x = (index * cell.width) as i32;
            for dy in 0..cell.height {
                for dx in 0..cell.width {
                    let sx = dx * SOURCE_WIDTH / cell.width;
                    let sy = dy * SOURCE_HEIGHT / cell.height;
                    if bitmap[sy][sx] {
                        plot(origin_x + dx as i32, dy as i32 - cell.ascent as i32, 1.0);
                    }
                }
            }
        }
    }
}

impl FontMetrics for BuiltinFont {
    fn measure(&self, size: u32, text: &str) -> Result<RawBounds> {
        let cell = Cell::at(size);
        let count = text.chars().count();
        Ok(RawBounds {
            left: 0,
            right: (count * cell.width) as i32,
            top: -(cell.ascent as i32),
            bottom: (cell.height - cell.ascent) as i32,
        })
    }
}
