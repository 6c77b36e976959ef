//! # Barcode Layout
//!
//! Derives the complete drawing geometry of a barcode image from an
//! [`Encoding`] and [`LayoutParams`], then replays it onto a [`Canvas`].
//!
//! ## Architecture
//!
//! ```text
//! (LayoutParams, Encoding, FontMetrics) → derive_geometry → Geometry
//!                                                             ↓
//!                                             draw(Geometry, Canvas, FontFace)
//!                                               - border outlines
//!                                               - one 1px line per module column
//!                                               - caption
//! ```
//!
//! ## Bar Heights
//!
//! Bars start at the top frame. Where they end depends on the caption and
//! on EAN style, which draws the first 11 and last 13 modules (START and
//! STOP) as taller guard bars:
//!
//! | Caption | EAN style | Guard bars end | Data bars end |
//! |---------|-----------|----------------|---------------|
//! | yes | yes | half the caption height into the caption | above caption + text spacing |
//! | yes | no | above caption + text spacing | above caption + text spacing |
//! | no | yes | bottom frame | 3/4 of the inner height |
//! | no | no | bottom frame | bottom frame |

use tracing::{debug, warn};

use crate::canvas::{Canvas, Color, MAX_DIMENSION};
use crate::code128::Encoding;
use crate::config::LayoutParams;
use crate::error::{BarcodeError, Result};
use crate::font::{BoundingBox, FontFace, FontMetrics, fit_font_size};

/// Modules drawn as guard bars at the start (the START symbol).
pub const START_GUARD_MODULES: usize = 11;
/// Modules drawn as guard bars at the end (the STOP symbol).
pub const STOP_GUARD_MODULES: usize = 13;

/// A one pixel wide vertical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub x: i32,
    pub y1: i32,
    pub y2: i32,
    pub color: Color,
}

/// Corner coordinates of a one pixel border outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Caption text placed at its baseline origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: u32,
    pub bbox: BoundingBox,
}

/// Everything needed to draw one barcode image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
    pub border: Vec<Rect>,
    pub bars: Vec<Bar>,
    pub caption: Option<Caption>,
}

fn checked_image_width(params: &LayoutParams, encoding: &Encoding) -> Option<i32> {
    i32::try_from(encoding.module_count())
        .ok()?
        .checked_mul(params.module_width)?
        .checked_add(params.frame().checked_mul(2)?)
}

/// Canvas width needed for an encoding, saturating at `i32::MAX`.
pub fn image_width(params: &LayoutParams, encoding: &Encoding) -> i32 {
    checked_image_width(params, encoding).unwrap_or(i32::MAX)
}

/// Horizontal room for the caption. EAN style also keeps the caption clear
/// of the START and STOP guard bars.
pub fn caption_width(params: &LayoutParams, image_width: i32) -> i32 {
    if params.ean_style {
        image_width
            - params.frame() * 2
            - params.module_width * START_GUARD_MODULES as i32 * 2
            - params.module_width * 2
            - params.text_spacing * 2
    } else {
        image_width - (params.frame() + params.text_spacing) * 2
    }
}

/// Tallest caption that still leaves the bars inside the frame.
pub fn caption_height_limit(params: &LayoutParams) -> i32 {
    params.image_height - params.frame() * 2 - params.text_spacing
}

fn caption_box(
    params: &LayoutParams,
    metrics: &dyn FontMetrics,
    text: &str,
    image_width: i32,
) -> Result<(u32, BoundingBox)> {
    if params.auto_fit {
        fit_font_size(
            metrics,
            text,
            caption_width(params, image_width),
            caption_height_limit(params),
        )
    } else {
        Ok((params.font_size, metrics.bounding_box(params.font_size, text)?))
    }
}

/// Where a module column's bar ends, given the caption height if any.
/// Never above the top frame.
fn bar_bottom(params: &LayoutParams, guard: bool, caption_height: Option<i32>) -> i32 {
    let inner_bottom = params.image_height - params.frame();
    let bottom = match caption_height {
        Some(height) if params.ean_style && guard => {
            (inner_bottom as f64 - height as f64 / 2.0) as i32
        }
        Some(height) => inner_bottom - params.text_spacing - height,
        None if params.ean_style && !guard => (inner_bottom as f64 * 0.75) as i32,
        None => inner_bottom,
    };
    bottom.max(params.frame())
}

/// Compute the full image geometry.
///
/// `metrics` is required for a caption; without it, or with empty text, the
/// image is laid out as if `show_text` were off. Fails if the font cannot be
/// measured or the image would be wider than [`MAX_DIMENSION`].
pub fn derive_geometry(
    params: &LayoutParams,
    encoding: &Encoding,
    text: &str,
    metrics: Option<&dyn FontMetrics>,
) -> Result<Geometry> {
    let width = checked_image_width(params, encoding)
        .filter(|&width| width <= MAX_DIMENSION)
        .ok_or_else(|| {
            BarcodeError::InvalidDimension(format!(
                "image width for {} modules at module width {} exceeds {}",
                encoding.module_count(),
                params.module_width,
                MAX_DIMENSION
            ))
        })?;
    let height = params.image_height;
    let frame = params.frame();

    let caption = match (params.show_text, metrics) {
        (true, _) if text.is_empty() => None,
        (true, Some(metrics)) => {
            let (size, bbox) = caption_box(params, metrics, text, width)?;
            let x = ((width - bbox.width) as f64 / 2.0) as i32 - bbox.x_bearing.abs();
            let y = height - bbox.descent.abs() - frame;
            Some(Caption {
                text: text.to_string(),
                x,
                y,
                size,
                bbox,
            })
        }
        (true, None) => {
            warn!("caption requested without a font, drawing bars only");
            None
        }
        (false, _) => None,
    };
    let caption_height = caption.as_ref().map(|c| c.bbox.height);

    let modules = encoding.modules();
    let stop_guard_start = modules.len().saturating_sub(STOP_GUARD_MODULES);
    let mut bars = Vec::with_capacity(modules.len() * params.module_width.max(0) as usize);
    let mut x = frame;
    for (index, &bar) in modules.iter().enumerate() {
        let guard = index < START_GUARD_MODULES || index >= stop_guard_start;
        let y2 = bar_bottom(params, guard, caption_height);
        let color = if bar { Color::BLACK } else { Color::WHITE };
        for _ in 0..params.module_width {
            bars.push(Bar {
                x,
                y1: frame,
                y2,
                color,
            });
            x += 1;
        }
    }

    let border = (0..params.border_width)
        .map(|inset| Rect {
            x1: inset,
            y1: inset,
            x2: width - 1 - inset,
            y2: height - 1 - inset,
        })
        .collect();

    debug!(
        width,
        height,
        modules = modules.len(),
        caption_size = ?caption.as_ref().map(|c| c.size),
        "derived barcode geometry"
    );

    Ok(Geometry {
        width,
        height,
        border,
        bars,
        caption,
    })
}

/// Replay geometry onto a canvas. The caption is skipped without a font.
pub fn draw(geometry: &Geometry, canvas: &mut dyn Canvas, font: Option<&FontFace>) {
    for rect in &geometry.border {
        canvas.draw_rectangle(rect.x1, rect.y1, rect.x2, rect.y2, 1, Color::BLACK);
    }

    for bar in &geometry.bars {
        canvas.draw_line(bar.x, bar.y1, bar.x, bar.y2, 1, bar.color);
    }

    if let (Some(caption), Some(font)) = (&geometry.caption, font) {
        canvas.draw_text(
            caption.x,
            caption.y,
            0.0,
            font,
            caption.size,
            Color::BLACK,
            &caption.text,
        );
    }

    if !canvas.is_ok() {
        warn!(errors = ?canvas.errors(), "canvas failed while drawing barcode");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code128;
    use crate::font::RawBounds;
    use crate::font::tests::TenPerPoint;
    use pretty_assertions::assert_eq;

    fn abc() -> Encoding {
        code128::encode("ABC").unwrap()
    }

    /// Font whose strings are `size × 2` pixels wide and `size × 6` tall.
    struct TallGlyphs;

    impl FontMetrics for TallGlyphs {
        fn measure(&self, size: u32, _text: &str) -> Result<RawBounds> {
            let size = size as i32;
            Ok(RawBounds {
                left: 0,
                right: size * 2,
                top: -size * 6,
                bottom: 0,
            })
        }
    }

    /// Canvas that records calls instead of drawing.
    #[derive(Default)]
    struct RecordingCanvas {
        lines: Vec<(i32, i32, i32, i32, Color)>,
        rectangles: usize,
        texts: Vec<(i32, i32, u32, String)>,
        errors: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, _thickness: u32, color: Color) {
            self.lines.push((x1, y1, x2, y2, color));
        }

        fn draw_rectangle(&mut self, _x1: i32, _y1: i32, _x2: i32, _y2: i32, _t: u32, _c: Color) {
            self.rectangles += 1;
        }

        fn draw_text(
            &mut self,
            x: i32,
            y: i32,
            _angle: f32,
            _font: &FontFace,
            size: u32,
            _color: Color,
            text: &str,
        ) {
            self.texts.push((x, y, size, text.to_string()));
        }

        fn is_ok(&self) -> bool {
            self.errors.is_empty()
        }

        fn errors(&self) -> &[String] {
            &self.errors
        }
    }

    #[test]
    fn test_image_width_formula() {
        let params = LayoutParams::default()
            .module_width(2)
            .border_width(3)
            .border_spacing(4);
        let encoding = abc();
        assert_eq!(image_width(&params, &encoding), 68 * 2 + (3 + 4) * 2);
    }

    #[test]
    fn test_caption_width() {
        let params = LayoutParams::default();
        // 92 - 24 - 22 - 2 - 10
        assert_eq!(caption_width(&params, 92), 34);
        // 92 - 2 × (12 + 5)
        assert_eq!(caption_width(&params.ean_style(false), 92), 58);
    }

    #[test]
    fn test_plain_bars_span_inner_height() {
        let params = LayoutParams::default().ean_style(false).show_text(false);
        let geometry = derive_geometry(&params, &abc(), "ABC", None).unwrap();
        assert_eq!(geometry.width, 92);
        assert_eq!(geometry.bars.len(), 68);
        assert!(geometry.bars.iter().all(|b| b.y1 == 12 && b.y2 == 138));
        assert!(geometry.caption.is_none());
    }

    #[test]
    fn test_bar_columns_follow_modules() {
        let params = LayoutParams::default().module_width(3).show_text(false);
        let encoding = abc();
        let geometry = derive_geometry(&params, &encoding, "ABC", None).unwrap();
        assert_eq!(geometry.bars.len(), encoding.module_count() * 3);
        for (index, bar) in geometry.bars.iter().enumerate() {
            assert_eq!(bar.x, params.frame() + index as i32);
            let expected = if encoding.modules()[index / 3] { Color::BLACK } else { Color::WHITE };
            assert_eq!(bar.color, expected);
        }
    }

    #[test]
    fn test_ean_guard_bars_without_caption() {
        let params = LayoutParams::default().show_text(false);
        let geometry = derive_geometry(&params, &abc(), "ABC", None).unwrap();
        let bottoms: Vec<i32> = geometry.bars.iter().map(|b| b.y2).collect();
        // inner bottom 138, data bars end at 138 × 0.75 = 103
        assert!(bottoms[..11].iter().all(|&y| y == 138));
        assert!(bottoms[11..55].iter().all(|&y| y == 103));
        assert!(bottoms[55..].iter().all(|&y| y == 138));
    }

    #[test]
    fn test_ean_caption_layout() {
        let params = LayoutParams::default();
        let geometry = derive_geometry(&params, &abc(), "ABC", Some(&TenPerPoint)).unwrap();

        let caption = geometry.caption.clone().unwrap();
        assert_eq!(caption.size, 3);
        assert_eq!(caption.bbox.width, 30);
        assert_eq!(caption.bbox.height, 3);
        // (92 - 30) / 2 - 1
        assert_eq!(caption.x, 30);
        assert_eq!(caption.y, 150 - 12);

        // Guard: 138 - 1.5 truncated; data: 150 - 17 - 3
        assert_eq!(geometry.bars[0].y2, 136);
        assert_eq!(geometry.bars[20].y2, 130);
        assert_eq!(geometry.bars[67].y2, 136);
    }

    #[test]
    fn test_plain_caption_layout() {
        let params = LayoutParams::default().ean_style(false);
        let geometry = derive_geometry(&params, &abc(), "ABC", Some(&TenPerPoint)).unwrap();
        let caption = geometry.caption.unwrap();
        assert_eq!(caption.size, 5);
        assert!(geometry.bars.iter().all(|b| b.y2 == 150 - 17 - 5));
    }

    #[test]
    fn test_fixed_font_size() {
        let params = LayoutParams::default().auto_fit(false).font_size(4);
        let geometry = derive_geometry(&params, &abc(), "ABC", Some(&TenPerPoint)).unwrap();
        let caption = geometry.caption.unwrap();
        assert_eq!(caption.size, 4);
        assert_eq!(caption.bbox.width, 40);
    }

    #[test]
    fn test_caption_without_font_is_skipped() {
        let params = LayoutParams::default().ean_style(false);
        let geometry = derive_geometry(&params, &abc(), "ABC", None).unwrap();
        assert!(geometry.caption.is_none());
        assert!(geometry.bars.iter().all(|b| b.y2 == 138));
    }

    #[test]
    fn test_border_outlines() {
        let params = LayoutParams::default().border_width(3).show_text(false);
        let geometry = derive_geometry(&params, &abc(), "ABC", None).unwrap();
        assert_eq!(
            geometry.border,
            vec![
                Rect { x1: 0, y1: 0, x2: geometry.width - 1, y2: 149 },
                Rect { x1: 1, y1: 1, x2: geometry.width - 2, y2: 148 },
                Rect { x1: 2, y1: 2, x2: geometry.width - 3, y2: 147 },
            ]
        );
        let none = derive_geometry(&params.border_width(0), &abc(), "ABC", None).unwrap();
        assert!(none.border.is_empty());
    }

    #[test]
    fn test_changing_params_rederives_everything() {
        let encoding = abc();
        let narrow = derive_geometry(&LayoutParams::default(), &encoding, "ABC", Some(&TenPerPoint)).unwrap();
        let wide_params = LayoutParams::default().module_width(4);
        let wide = derive_geometry(&wide_params, &encoding, "ABC", Some(&TenPerPoint)).unwrap();
        assert_eq!(wide.width, 68 * 4 + 24);
        assert!(wide.caption.unwrap().size > narrow.caption.unwrap().size);
    }

    #[test]
    fn test_caption_height_is_limited() {
        // 210 px of caption width would allow size 104, but only
        // 150 - 24 - 5 = 121 px are left below the top frame
        let params = LayoutParams::default().module_width(5);
        let geometry = derive_geometry(&params, &abc(), "ABC", Some(&TallGlyphs)).unwrap();
        let caption = geometry.caption.unwrap();
        assert_eq!(caption_height_limit(&params), 121);
        assert_eq!(caption.bbox.height, 120);
        assert!(geometry.bars.iter().all(|b| b.y2 >= params.frame() && b.y2 <= 150));
    }

    #[test]
    fn test_fixed_size_caption_clamps_bars_to_frame() {
        let params = LayoutParams::default().auto_fit(false).font_size(40);
        let geometry = derive_geometry(&params, &abc(), "ABC", Some(&TallGlyphs)).unwrap();
        assert_eq!(geometry.caption.unwrap().bbox.height, 240);
        // Data bars: 138 - 5 - 240 clamps to the frame; guard bars: 138 - 120
        assert_eq!(geometry.bars[20].y2, params.frame());
        assert_eq!(geometry.bars[0].y2, 18);
        assert!(geometry.bars.iter().all(|b| b.y2 >= b.y1));
    }

    #[test]
    fn test_empty_text_has_no_caption() {
        let encoding = code128::encode("").unwrap();
        let params = LayoutParams::default();
        let geometry = derive_geometry(&params, &encoding, "", Some(&TenPerPoint)).unwrap();
        assert!(geometry.caption.is_none());
        // Laid out like show_text off: guard bars reach the bottom frame
        assert_eq!(geometry.bars[0].y2, 138);
        assert_eq!(geometry.bars[12].y2, 103);
    }

    #[test]
    fn test_oversized_module_width_is_rejected() {
        let params = LayoutParams::default().module_width(i32::MAX).show_text(false);
        assert_eq!(image_width(&params, &abc()), i32::MAX);
        assert!(matches!(
            derive_geometry(&params, &abc(), "ABC", None),
            Err(BarcodeError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_draw_replays_geometry() {
        let params = LayoutParams::default().ean_style(false);
        let geometry = derive_geometry(&params, &abc(), "ABC", Some(&TenPerPoint)).unwrap();
        let mut canvas = RecordingCanvas::default();
        draw(&geometry, &mut canvas, Some(&FontFace::builtin()));

        assert_eq!(canvas.rectangles, 2);
        assert_eq!(canvas.lines.len(), 68);
        let caption = geometry.caption.as_ref().unwrap();
        assert_eq!(canvas.texts, vec![(caption.x, caption.y, caption.size, "ABC".to_string())]);
    }

    #[test]
    fn test_draw_without_font_skips_caption() {
        let geometry = derive_geometry(&LayoutParams::default(), &abc(), "ABC", Some(&TenPerPoint)).unwrap();
        let mut canvas = RecordingCanvas::default();
        draw(&geometry, &mut canvas, None);
        assert!(canvas.texts.is_empty());
    }
}
