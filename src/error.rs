//! # Error Types
//!
//! This module defines error types used throughout the barcode128 library.

use thiserror::Error;

/// Main error type for barcode128 operations
#[derive(Debug, Error)]
pub enum BarcodeError {
    /// A token has no representation in Set A, B or C
    #[error("Unencodable character {token:?} at token {position}")]
    UnencodableCharacter { token: String, position: usize },

    /// Non-positive or out-of-range canvas dimensions
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Font resource unreadable or measurement failed
    #[error("Font error: {0}")]
    FontMetrics(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Malformed layout configuration
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BarcodeError>;
