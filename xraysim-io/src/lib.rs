//! xraysim-io: File export and configuration loading for xraysim.
//!
//! Frames are written as 8-bit grayscale images. The format is chosen from
//! the file extension. Synthesizer configurations are stored as JSON.
//!

mod config;
mod error;
mod writer;

pub use config::{load_config, save_config};
pub use error::{Error, Result};
pub use writer::{write_image, write_pgm, ImageFormat};
