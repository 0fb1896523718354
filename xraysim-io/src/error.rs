//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration file could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension does not name a supported image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Image is too large for the target format.
    #[error("image of {0}x{0} pixels exceeds the format's limits")]
    TooLarge(usize),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] xraysim_core::Error),
}
