//! # Drawing Canvas
//!
//! The [`Canvas`] trait is everything the layout needs from a drawing
//! surface: lines, stroked rectangles and text. [`RasterCanvas`] implements
//! it on an RGBA image buffer and encodes the result as PNG.
//!
//! ## Failure State
//!
//! Drawing never returns errors. Invalid dimensions or coordinates are
//! recorded and put the canvas into a failed state, after which every draw
//! call is a no-op. Callers check [`Canvas::is_ok`] (or get an error from
//! [`RasterCanvas::to_png`] / [`RasterCanvas::save`]) before presenting.
//!
//! ## Example
//!
//! ```
//! use barcode128::canvas::{Canvas, Color, RasterCanvas};
//!
//! let mut canvas = RasterCanvas::new(20, 10);
//! canvas.draw_line(5, 0, 5, 9, 1, Color::BLACK);
//! assert!(canvas.is_ok());
//! assert_eq!(canvas.pixel(5, 3), Some(Color::BLACK));
//!
//! let failed = RasterCanvas::new(0, 10);
//! assert!(!failed.is_ok());
//! ```

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use tracing::warn;

use crate::error::{BarcodeError, Result};
use crate::font::FontFace;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Bar and caption color
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// Background and space color
    pub const WHITE: Color = Color::rgba(255, 255, 255, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear mix toward `other` by `t` (0.0 = self, 1.0 = other).
    fn mix(self, other: Color, t: f32) -> Color {
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgba(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
            lerp(self.a, other.a),
        )
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Color::rgba(r, g, b, a)
    }
}

// ============================================================================
// CANVAS TRAIT
// ============================================================================

/// Drawing surface used by the layout.
pub trait Canvas {
    /// Line from (x1, y1) to (x2, y2), both ends inclusive.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, thickness: u32, color: Color);

    /// Text with its baseline origin at (x, y), rotated `angle` degrees
    /// counter-clockwise.
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        angle: f32,
        font: &FontFace,
        size: u32,
        color: Color,
        text: &str,
    );

    fn is_ok(&self) -> bool;

    /// Every failure recorded so far.
    fn errors(&self) -> &[String];

    /// Stroked rectangle with corners (x1, y1) and (x2, y2).
    ///
    /// The stroke is centered on the edges; for even thicknesses the extra
    /// pixel falls outside the right and bottom edges.
    fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, thickness: u32, color: Color) {
        let t = thickness as i32;
        let floor = t / 2;
        let ceil = t - floor;

        self.draw_line(x1 - floor, y1, x2 - ceil, y1, thickness, color);
        self.draw_line(x1, y1 + ceil, x1, y2 + floor, thickness, color);
        if ceil == floor {
            self.draw_line(x1 + ceil, y2 + 1, x2 + floor, y2 + 1, thickness, color);
            self.draw_line(x2 + 1, y1 - floor, x2 + 1, y2 - ceil, thickness, color);
        } else {
            self.draw_line(x1 + ceil, y2, x2 + floor, y2, thickness, color);
            self.draw_line(x2, y1 - floor, x2, y2 - ceil, thickness, color);
        }
    }
}

// ============================================================================
// RASTER CANVAS
// ============================================================================

/// Largest width or height a [`RasterCanvas`] accepts.
pub const MAX_DIMENSION: i32 = 1 << 16;

/// RGBA raster canvas, filled with [`Color::WHITE`] on creation.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: i32,
    height: i32,
    image: Option<RgbaImage>,
    errors: Vec<String>,
}

impl RasterCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        let mut canvas = Self {
            width,
            height,
            image: None,
            errors: Vec::new(),
        };

        if !(1..=MAX_DIMENSION).contains(&height) {
            canvas.fail(format!("image height must be between 1 and {}, got {}", MAX_DIMENSION, height));
        }
        if !(1..=MAX_DIMENSION).contains(&width) {
            canvas.fail(format!("image width must be between 1 and {}, got {}", MAX_DIMENSION, width));
        }
        if canvas.is_ok() {
            canvas.image = Some(RgbaImage::from_pixel(
                width as u32,
                height as u32,
                Color::WHITE.into(),
            ));
        }

        canvas
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn fail(&mut self, message: String) {
        warn!("canvas failed: {}", message);
        self.errors.push(message);
    }

    fn check_point(&mut self, what: &str, x: i32, y: i32) {
        if !(0..=self.width).contains(&x) {
            self.fail(format!("{}: x {} must be between 0 and {}", what, x, self.width));
        }
        if !(0..=self.height).contains(&y) {
            self.fail(format!("{}: y {} must be between 0 and {}", what, y, self.height));
        }
    }

    /// Color at (x, y), or `None` outside the canvas or on a failed canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let image = self.image.as_ref()?;
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((*image.get_pixel(x as u32, y as u32)).into())
    }

    /// The underlying image, unless the canvas failed.
    pub fn image(&self) -> Option<&RgbaImage> {
        if self.is_ok() { self.image.as_ref() } else { None }
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        if let Some(image) = self.image.as_mut() {
            image.put_pixel(x as u32, y as u32, color.into());
        }
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if let Some(existing) = self.pixel(x, y) {
            self.put(x, y, existing.mix(color, coverage.clamp(0.0, 1.0)));
        }
    }

    /// Square brush of `thickness` pixels centered on (x, y).
    fn stamp(&mut self, x: i32, y: i32, thickness: u32, color: Color) {
        let t = thickness.max(1) as i32;
        let offset = (t - 1) / 2;
        for dy in 0..t {
            for dx in 0..t {
                self.put(x - offset + dx, y - offset + dy, color);
            }
        }
    }

    fn failure(&self) -> BarcodeError {
        BarcodeError::InvalidDimension(self.errors.join("; "))
    }

    /// Encode the canvas as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let image = self.image().ok_or_else(|| self.failure())?;
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| BarcodeError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(bytes)
    }

    /// Write the canvas to a PNG file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = self.image().ok_or_else(|| self.failure())?;
        image
            .save_with_format(path.as_ref(), ImageFormat::Png)
            .map_err(|e| BarcodeError::Image(format!("Failed to save PNG: {}", e)))
    }
}

impl Canvas for RasterCanvas {
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, thickness: u32, color: Color) {
        if !self.is_ok() {
            return;
        }
        self.check_point("draw_line", x1, y1);
        self.check_point("draw_line", x2, y2);
        if !self.is_ok() {
            return;
        }

        // Bresenham
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let step_x = if x1 < x2 { 1 } else { -1 };
        let step_y = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.stamp(x, y, thickness, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        angle: f32,
        font: &FontFace,
        size: u32,
        color: Color,
        text: &str,
    ) {
        if !self.is_ok() {
            return;
        }

        let (sin, cos) = angle.to_radians().sin_cos();
        let mut covered = Vec::new();
        font.rasterize(size, text, &mut |px, py, coverage| {
            let (px, py) = (px as f32, py as f32);
            let rx = (px * cos + py * sin).round() as i32;
            let ry = (py * cos - px * sin).round() as i32;
            covered.push((x + rx, y + ry, coverage));
        });

        for (px, py, coverage) in covered {
            self.blend(px, py, color, coverage);
        }
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }
}
