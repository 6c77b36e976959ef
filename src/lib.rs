//! # barcode128 - Code 128 Barcode Images
//!
//! barcode128 encodes text as a Code 128 linear barcode and renders it to a
//! PNG image with an optional human-readable caption. It provides:
//!
//! - **Encoding**: Set A/B/C selection, set switching, mod-103 checksum
//! - **Layout**: module widths, borders, EAN-style guard bars
//! - **Captions**: auto-fitted font size with TrueType or built-in fonts
//! - **Output**: PNG bytes, files, or any writer
//!
//! ## Quick Start
//!
//! ```no_run
//! use barcode128::{Barcode128, FontFace};
//!
//! let font = FontFace::load("DejaVuSans.ttf")?;
//! let mut barcode = Barcode128::new("Hello 1234", 150, Some(font), 14)?;
//! barcode.set_module_width(2);
//! barcode.save("hello.png")?;
//!
//! # Ok::<(), barcode128::BarcodeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`code128`] | Tokenizer, set selection, checksum, bar patterns |
//! | [`layout`] | Geometry derivation and drawing |
//! | [`font`] | Font metrics, caption fitting, font sources |
//! | [`canvas`] | Drawing surface and PNG output |
//! | [`config`] | Layout parameters |
//! | [`barcode`] | The [`Barcode128`] entry point |
//! | [`error`] | Error types |

pub mod barcode;
pub mod canvas;
pub mod code128;
pub mod config;
pub mod error;
pub mod font;
pub mod layout;

// Re-exports for convenience
pub use barcode::Barcode128;
pub use config::LayoutParams;
pub use error::BarcodeError;
pub use font::FontFace;
