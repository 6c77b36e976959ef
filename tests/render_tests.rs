//! # Render Tests
//!
//! Renders barcodes to PNG, decodes the result and checks pixels against the
//! encoding and the derived geometry.

use barcode128::canvas::Color;
use barcode128::{Barcode128, BarcodeError, FontFace, LayoutParams};
use image::RgbaImage;
use pretty_assertions::assert_eq;

fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

fn is_black(image: &RgbaImage, x: i32, y: i32) -> bool {
    Color::from(*image.get_pixel(x as u32, y as u32)) == Color::BLACK
}

/// No border, spacing or caption: every column is exactly one module.
fn bare_params() -> LayoutParams {
    LayoutParams::default()
        .image_height(10)
        .border_width(0)
        .border_spacing(0)
        .ean_style(false)
        .show_text(false)
}

#[test]
fn test_columns_match_modules() {
    let barcode = Barcode128::with_params("ABC", bare_params(), None).unwrap();
    let image = decode(&barcode.to_png().unwrap());
    assert_eq!(image.dimensions(), (68, 10));

    let row: String = (0..68)
        .map(|x| if is_black(&image, x, 0) { '1' } else { '0' })
        .collect();
    assert_eq!(row, barcode.encoding().bit_string());

    // Every row of a bare barcode is identical
    for y in 1..10 {
        for x in 0..68 {
            assert_eq!(is_black(&image, x, y), is_black(&image, x, 0));
        }
    }
}

#[test]
fn test_module_width_scales_columns() {
    let barcode = Barcode128::with_params("Hi", bare_params().module_width(3), None).unwrap();
    let image = decode(&barcode.to_png().unwrap());
    let modules = barcode.encoding().modules();
    assert_eq!(image.width() as usize, modules.len() * 3);
    for (index, &bar) in modules.iter().enumerate() {
        for offset in 0..3 {
            assert_eq!(is_black(&image, (index * 3 + offset) as i32, 5), bar);
        }
    }
}

#[test]
fn test_background_is_transparent_white() {
    let barcode = Barcode128::with_params("ABC", bare_params().border_spacing(4), None).unwrap();
    let image = decode(&barcode.to_png().unwrap());
    assert_eq!(Color::from(*image.get_pixel(0, 0)), Color::WHITE);
}

#[test]
fn test_border_outlines() {
    let params = LayoutParams::default().show_text(false);
    let barcode = Barcode128::with_params("ABC", params, None).unwrap();
    let image = decode(&barcode.to_png().unwrap());
    let (width, height) = (barcode.image_width(), barcode.image_height());

    for inset in 0..2 {
        assert!(is_black(&image, inset, inset));
        assert!(is_black(&image, width - 1 - inset, height - 1 - inset));
        assert!(is_black(&image, width / 2, inset));
        assert!(is_black(&image, inset, height / 2));
    }
    // Border spacing is left empty
    assert!(!is_black(&image, 2, 2));
    assert!(!is_black(&image, 11, height / 2));
    // First module of START is a bar
    assert!(is_black(&image, 12, 12));
}

#[test]
fn test_caption_is_drawn_below_data_bars() {
    let params = LayoutParams::default().ean_style(false);
    let barcode = Barcode128::with_params("ABC", params, Some(FontFace::builtin())).unwrap();
    let geometry = barcode.geometry().unwrap();
    let caption = geometry.caption.clone().unwrap();
    assert!(caption.size > 0);

    let image = decode(&barcode.to_png().unwrap());
    let data_bottom = geometry.bars[0].y2;
    let frame = params.frame();

    let caption_ink = (data_bottom + 1..geometry.height - frame)
        .flat_map(|y| (frame..geometry.width - frame).map(move |x| (x, y)))
        .filter(|&(x, y)| is_black(&image, x, y))
        .count();
    assert!(caption_ink > 0);
}

#[test]
fn test_ean_without_caption_leaves_bottom_empty() {
    let params = LayoutParams::default().show_text(false);
    let barcode = Barcode128::with_params("ABC", params, Some(FontFace::builtin())).unwrap();
    let geometry = barcode.geometry().unwrap();
    let image = decode(&barcode.to_png().unwrap());

    // Interior bars stop at three quarters of the inner height
    let interior_bottom = geometry.bars[20].y2;
    assert_eq!(interior_bottom, 103);
    let frame = params.frame();
    for y in interior_bottom + 1..geometry.height - frame {
        for x in frame + 11..geometry.width - frame - 13 {
            assert!(!is_black(&image, x, y), "unexpected ink at ({}, {})", x, y);
        }
    }
}

#[test]
fn test_ean_guard_bars_are_taller() {
    let barcode = Barcode128::with_params("ABC", LayoutParams::default(), Some(FontFace::builtin())).unwrap();
    let geometry = barcode.geometry().unwrap();
    let first = geometry.bars.first().unwrap();
    let middle = &geometry.bars[30];
    let last = geometry.bars.last().unwrap();
    assert!(first.y2 > middle.y2);
    assert_eq!(first.y2, last.y2);
}

#[test]
fn test_captioned_geometry_stays_inside_canvas() {
    let texts = ["", "A", "ABC", "Hello, World!", "0123456789", "code rust 42 a-b_c"];
    for text in texts {
        for module_width in 1..=8 {
            for ean_style in [true, false] {
                let params = LayoutParams::default()
                    .module_width(module_width)
                    .ean_style(ean_style);
                let barcode =
                    Barcode128::with_params(text, params, Some(FontFace::builtin())).unwrap();
                let geometry = barcode.geometry().unwrap();
                let context = format!("{:?} at module width {} (ean {})", text, module_width, ean_style);

                assert!(
                    geometry
                        .bars
                        .iter()
                        .all(|b| (0..=geometry.height).contains(&b.y2) && b.y2 >= b.y1),
                    "bar outside canvas for {}",
                    context
                );
                let png = barcode.to_png();
                assert!(png.is_ok(), "render failed for {}: {:?}", context, png.err());
            }
        }
    }
}

#[test]
fn test_save_writes_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.png");
    let barcode = Barcode128::new("ABC", 150, Some(FontFace::builtin()), 0).unwrap();
    barcode.save(&path).unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!(image.width() as i32, barcode.image_width());
    assert_eq!(image.height(), 150);
}

#[test]
fn test_save_on_failed_canvas_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    let barcode = Barcode128::new("ABC", -1, None, 0).unwrap();
    assert!(matches!(barcode.save(&path), Err(BarcodeError::InvalidDimension(_))));
    assert!(!path.exists());
}

#[test]
fn test_missing_font_file() {
    assert!(matches!(
        FontFace::load("/nonexistent/caption.ttf"),
        Err(BarcodeError::FontMetrics(_))
    ));
}
