//! # Layout Configuration
//!
//! [`LayoutParams`] holds every dimension and flag that shapes the rendered
//! barcode. It is a plain value: setters return a modified copy, and the
//! geometry is derived from it from scratch on every render, so there is
//! no derived state to keep in sync.
//!
//! ## Dimensions
//!
//! ```text
//! ┌─ border_width ─────────────────────────────────────┐
//! │  border_spacing                                    │
//! │   ┃┃ ┃ ┃┃┃ ┃┃  ┃ ┃┃┃ ┃  ┃┃ ┃ ┃┃┃ ┃┃   bars          │
//! │   ┃┃ ┃ ┃┃┃ ┃┃  ┃ ┃┃┃ ┃  ┃┃ ┃ ┃┃┃ ┃┃                 │
//! │   ┃┃ ┃                       ┃┃┃ ┃┃  guard bars    │
//! │   ┃┃ ┃        Caption        ┃┃┃ ┃┃  (ean_style)   │
//! │                  ↑ text_spacing                    │
//! └────────────────────────────────────────────────────┘
//!  image width = modules × module_width + 2 × (border_width + border_spacing)
//! ```
//!
//! ## Loading From JSON
//!
//! Missing fields keep their defaults:
//!
//! ```
//! use barcode128::config::LayoutParams;
//!
//! let params = LayoutParams::from_json_str(r#"{ "module_width": 3, "ean_style": false }"#).unwrap();
//! assert_eq!(params.module_width, 3);
//! assert!(!params.ean_style);
//! assert_eq!(params.border_width, 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BarcodeError, Result};

/// Rendering parameters for one barcode image. All lengths are pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Full canvas height
    pub image_height: i32,
    /// Number of concentric border outlines (0 = no border)
    pub border_width: i32,
    /// Gap between the border and the bars
    pub border_spacing: i32,
    /// Width of one module
    pub module_width: i32,
    /// Gap between the bars and the caption
    pub text_spacing: i32,
    /// Draw START/STOP regions as taller guard bars
    pub ean_style: bool,
    /// Draw the human-readable caption
    pub show_text: bool,
    /// Pick the largest caption size that fits instead of `font_size`
    pub auto_fit: bool,
    /// Caption point size when `auto_fit` is off
    pub font_size: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            image_height: 150,
            border_width: 2,
            border_spacing: 10,
            module_width: 1,
            text_spacing: 5,
            ean_style: true,
            show_text: true,
            auto_fit: true,
            font_size: 12,
        }
    }
}

impl LayoutParams {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BarcodeError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| BarcodeError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn image_height(mut self, px: i32) -> Self {
        self.image_height = px;
        self
    }

    pub fn border_width(mut self, px: i32) -> Self {
        self.border_width = px;
        self
    }

    pub fn border_spacing(mut self, px: i32) -> Self {
        self.border_spacing = px;
        self
    }

    pub fn module_width(mut self, px: i32) -> Self {
        self.module_width = px;
        self
    }

    pub fn text_spacing(mut self, px: i32) -> Self {
        self.text_spacing = px;
        self
    }

    pub fn ean_style(mut self, enabled: bool) -> Self {
        self.ean_style = enabled;
        self
    }

    pub fn show_text(mut self, enabled: bool) -> Self {
        self.show_text = enabled;
        self
    }

    pub fn auto_fit(mut self, enabled: bool) -> Self {
        self.auto_fit = enabled;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Border plus border spacing, the inset of the bars on every side.
    pub fn frame(&self) -> i32 {
        self.border_width.saturating_add(self.border_spacing)
    }
}
