//! # Caption Fonts
//!
//! Font measurement and rasterizing for the human-readable caption.
//!
//! ## Bounding Boxes
//!
//! A font reports [`RawBounds`]: the ink extents of a string relative to
//! its origin on the baseline, with y growing downward (so `top` is usually
//! negative). [`BoundingBox::from_raw`] turns those into the offsets the
//! layout uses for centering and baseline placement:
//!
//! ```text
//!        left          right
//!   top   ┌──────────────┐
//!         │  Caption     │
//!  ───────┼──────────────┼──── baseline (y = 0)
//!  bottom └──────────────┘
//! ```
//!
//! ## Font Sources
//!
//! | Source | Type | Notes |
//! |--------|------|-------|
//! | TrueType/OpenType file | [`TtfFont`] | Anti-aliased, point sizes at 96 DPI |
//! | Built-in | [`BuiltinFont`] | Spleen 12×24 bitmap, scaled nearest-neighbor |

pub mod builtin;
pub mod ttf;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;

pub use builtin::BuiltinFont;
pub use ttf::TtfFont;

/// Largest point size the fit search will try.
pub const MAX_FONT_SIZE: u32 = 512;

// ============================================================================
// BOUNDS
// ============================================================================

/// Ink extents of a string, relative to its baseline origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawBounds {
    pub left: i32,
    pub right: i32,
    /// Highest ink row, negative above the baseline
    pub top: i32,
    /// Lowest ink row, positive below the baseline
    pub bottom: i32,
}

/// Caption box with bearing corrections applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_bearing: i32,
    pub y_bearing: i32,
    pub width: i32,
    pub height: i32,
    /// Signed distance of the lowest ink row below the baseline
    pub descent: i32,
}

impl BoundingBox {
    /// Apply the bearing rules to raw extents.
    ///
    /// A left bearing of -1 or more is treated as a one pixel inset; anything
    /// further left overhangs the origin and widens the box instead.
    pub fn from_raw(raw: RawBounds) -> Self {
        let (x_bearing, width) = if raw.left >= -1 {
            (-(raw.left + 1).abs(), (raw.right - raw.left).abs())
        } else {
            ((raw.left + 2).abs(), raw.right.abs() + raw.left.abs() - 1)
        };

        let height = if raw.bottom > 0 {
            (raw.top - raw.bottom).abs() - 1
        } else {
            raw.top.abs() - raw.bottom.abs()
        };

        Self {
            x_bearing,
            y_bearing: (raw.top + 1).abs(),
            width,
            height,
            descent: raw.bottom,
        }
    }
}

// ============================================================================
// METRICS
// ============================================================================

/// Measures strings at integer point sizes.
///
/// Implementations must report a width and height that never shrink as the
/// point size grows; [`fit_font_size`] relies on it.
pub trait FontMetrics {
    fn measure(&self, size: u32, text: &str) -> Result<RawBounds>;

    fn bounding_box(&self, size: u32, text: &str) -> Result<BoundingBox> {
        Ok(BoundingBox::from_raw(self.measure(size, text)?))
    }
}

/// Largest point size at which `text` is narrower than `available_width`
/// and no taller than `max_height`.
///
/// Walks up from size 1 until the measured box reaches the available width
/// or grows past `max_height`, then steps back one size. The search stops
/// at [`MAX_FONT_SIZE`]. Returns the size together with its bounding box.
pub fn fit_font_size(
    metrics: &dyn FontMetrics,
    text: &str,
    available_width: i32,
    max_height: i32,
) -> Result<(u32, BoundingBox)> {
    let mut size = 1;
    loop {
        let bbox = metrics.bounding_box(size, text)?;
        if bbox.width >= available_width || bbox.height > max_height {
            break;
        }
        if size == MAX_FONT_SIZE {
            warn!(size, available_width, "caption font size capped");
            return Ok((size, bbox));
        }
        size += 1;
    }

    let size = size - 1;
    if size == 0 {
        warn!(available_width, max_height, "caption does not fit at any font size");
    }
    let bbox = metrics.bounding_box(size, text)?;
    debug!(size, width = bbox.width, height = bbox.height, available_width, "fitted caption font size");
    Ok((size, bbox))
}

// ============================================================================
// FONT FACES
// ============================================================================

/// A caption font: either a loaded font file or the built-in bitmap font.
#[derive(Debug, Clone)]
pub enum FontFace {
    Builtin(BuiltinFont),
    Ttf(TtfFont),
}

impl FontFace {
    /// Load a TrueType/OpenType font file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(FontFace::Ttf(TtfFont::from_file(path)?))
    }

    pub fn builtin() -> Self {
        FontFace::Builtin(BuiltinFont)
    }

    pub fn name(&self) -> &str {
        match self {
            FontFace::Builtin(_) => BuiltinFont::NAME,
            FontFace::Ttf(font) => font.name(),
        }
    }

    /// Rasterize `text` at `size`, calling `plot(x, y, coverage)` for every
    /// covered pixel. Coordinates are relative to the baseline origin.
    pub fn rasterize(&self, size: u32, text: &str, plot: &mut dyn FnMut(i32, i32, f32)) {
        match self {
            FontFace::Builtin(font) => font.rasterize(size, text, plot),
            FontFace::Ttf(font) => font.rasterize(size, text, plot),
        }
    }
}

impl FontMetrics for FontFace {
    fn measure(&self, size: u32, text: &str) -> Result<RawBounds> {
        match self {
            FontFace::Builtin(font) => font.measure(size, text),
            FontFace::Ttf(font) => font.measure(size, text),
        }
    }
}
