//! # Barcode Images
//!
//! [`Barcode128`] ties the encoder, layout and canvas together: it keeps the
//! caption text, its encoding, the layout parameters and the caption font,
//! and renders them to PNG on demand.
//!
//! Setters only change inputs. Every render re-derives the geometry from
//! the current inputs, so `render`, `save` and `to_png` always agree.
//!
//! ## Example
//!
//! ```
//! use barcode128::{Barcode128, FontFace};
//!
//! let mut barcode = Barcode128::new("ABC-123", 120, Some(FontFace::builtin()), 12).unwrap();
//! barcode.set_module_width(2);
//! barcode.set_ean_style(false);
//!
//! let png = barcode.to_png().unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::canvas::{Canvas, RasterCanvas};
use crate::code128::{self, Encoding};
use crate::config::LayoutParams;
use crate::error::Result;
use crate::font::{FontFace, FontMetrics};
use crate::layout::{self, Geometry};

/// A Code 128 barcode with its rendering settings.
#[derive(Debug, Clone)]
pub struct Barcode128 {
    text: String,
    encoding: Encoding,
    params: LayoutParams,
    font: Option<FontFace>,
}

impl Barcode128 {
    /// Encode `text` with default layout parameters.
    ///
    /// `image_height` is the full canvas height, border and border spacing
    /// included; the bars get `image_height - 2 × frame` of it. A
    /// `font_size` of 0 keeps the default size used when auto-fit is
    /// turned off.
    pub fn new(
        text: &str,
        image_height: i32,
        font: Option<FontFace>,
        font_size: u32,
    ) -> Result<Self> {
        let mut params = LayoutParams::default().image_height(image_height);
        if font_size != 0 {
            params = params.font_size(font_size);
        }
        Self::with_params(text, params, font)
    }

    pub fn with_params(text: &str, params: LayoutParams, font: Option<FontFace>) -> Result<Self> {
        let encoding = code128::encode(text)?;
        Ok(Self::with_encoding(text, encoding, params, font))
    }

    /// Use a prepared encoding, e.g. one built with function tokens, and
    /// `caption` as the human-readable text.
    pub fn with_encoding(
        caption: impl Into<String>,
        encoding: Encoding,
        params: LayoutParams,
        font: Option<FontFace>,
    ) -> Self {
        Self {
            text: caption.into(),
            encoding,
            params,
            font,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn font(&self) -> Option<&FontFace> {
        self.font.as_ref()
    }

    /// Replace the text. On error the barcode keeps its previous text.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.encoding = code128::encode(text)?;
        self.text = text.to_string();
        Ok(())
    }

    pub fn set_params(&mut self, params: LayoutParams) {
        self.params = params;
    }

    pub fn set_image_height(&mut self, px: i32) {
        self.params = self.params.image_height(px);
    }

    pub fn set_border_width(&mut self, px: i32) {
        self.params = self.params.border_width(px);
    }

    pub fn set_border_spacing(&mut self, px: i32) {
        self.params = self.params.border_spacing(px);
    }

    pub fn set_module_width(&mut self, px: i32) {
        self.params = self.params.module_width(px);
    }

    pub fn set_text_spacing(&mut self, px: i32) {
        self.params = self.params.text_spacing(px);
    }

    pub fn set_ean_style(&mut self, enabled: bool) {
        self.params = self.params.ean_style(enabled);
    }

    pub fn set_show_text(&mut self, enabled: bool) {
        self.params = self.params.show_text(enabled);
    }

    pub fn set_auto_fit(&mut self, enabled: bool) {
        self.params = self.params.auto_fit(enabled);
    }

    /// Set the caption font and the size used when auto-fit is off.
    pub fn set_font(&mut self, font: Option<FontFace>, size: u32) {
        self.font = font;
        self.params = self.params.font_size(size);
    }

    pub fn image_width(&self) -> i32 {
        layout::image_width(&self.params, &self.encoding)
    }

    pub fn image_height(&self) -> i32 {
        self.params.image_height
    }

    /// Derive the drawing geometry from the current settings.
    pub fn geometry(&self) -> Result<Geometry> {
        let metrics = self.font.as_ref().map(|font| font as &dyn FontMetrics);
        layout::derive_geometry(&self.params, &self.encoding, &self.text, metrics)
    }

    /// Draw onto any canvas and return the geometry used.
    pub fn draw(&self, canvas: &mut dyn Canvas) -> Result<Geometry> {
        let geometry = self.geometry()?;
        layout::draw(&geometry, canvas, self.font.as_ref());
        Ok(geometry)
    }

    fn paint(&self) -> Result<RasterCanvas> {
        let geometry = self.geometry()?;
        let mut canvas = RasterCanvas::new(geometry.width, geometry.height);
        layout::draw(&geometry, &mut canvas, self.font.as_ref());
        debug!(
            width = geometry.width,
            height = geometry.height,
            ok = canvas.is_ok(),
            "painted barcode"
        );
        Ok(canvas)
    }

    /// Render to PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        self.paint()?.to_png()
    }

    /// Render as PNG to a writer such as stdout.
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<()> {
        let png = self.to_png()?;
        writer.write_all(&png)?;
        writer.flush()?;
        Ok(())
    }

    /// Render as PNG to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.paint()?.save(path)
    }
}
