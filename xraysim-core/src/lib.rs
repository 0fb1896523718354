//! xraysim-core: Synthetic X-ray image generation.
//!
//! A frame is built from tube exposure parameters in four steps:
//! relative dose, Gaussian photon field, Poisson shot noise, and
//! peak normalization to 8 bits.
//!
//! ```no_run
//! use xraysim_core::{Synthesizer, SynthesizerConfig};
//!
//! let synth = Synthesizer::new(SynthesizerConfig::default())?;
//! let exposure = synth.exposure(200.0, 70.0).with_image_size(256);
//! let image = synth.synthesize_seeded(&exposure, 42)?;
//! assert_eq!(image.dim(), (256, 256));
//! # Ok::<(), xraysim_core::Error>(())
//! ```
//!

pub mod config;
pub mod error;
pub mod exposure;
pub mod field;
pub mod image;
pub mod noise;
pub mod normalize;
pub mod synthesizer;

pub use config::SynthesizerConfig;
pub use error::{Error, Parameter, ParameterIssue, Result};
pub use exposure::{image_size_from_f64, Exposure};
pub use image::XrayImage;
pub use synthesizer::{synthesize, Synthesizer};
