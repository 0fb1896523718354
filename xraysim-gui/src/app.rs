//! Main application state and logic.
//!
//! Contains the `XraySimApp` struct, which holds the current exposure
//! settings and the last synthesized frame.

use std::path::PathBuf;

use anyhow::Context as _;
use eframe::egui;
use rfd::FileDialog;
use xraysim_core::{Exposure, Synthesizer, XrayImage};

use crate::viewer::{frame_to_color_image, Colormap};

/// Tube current slider range [mA].
pub const CURRENT_RANGE: std::ops::RangeInclusive<f64> = 10.0..=500.0;
/// Tube voltage slider range [kVp].
pub const VOLTAGE_RANGE: std::ops::RangeInclusive<f64> = 40.0..=120.0;
/// Selectable image sizes.
pub const IMAGE_SIZES: [usize; 5] = [64, 128, 256, 512, 1024];

/// Main application state.
pub struct XraySimApp {
    /// Synthesizer with the default configuration.
    pub(crate) synth: Synthesizer,

    /// Tube current [mA].
    pub(crate) current_ma: f64,
    /// Tube voltage [kVp].
    pub(crate) voltage_kvp: f64,
    /// Exposure time [ms].
    pub(crate) exposure_ms: f64,
    /// Dose exponent.
    pub(crate) dose_exponent: f64,
    /// Photons per unit relative dose.
    pub(crate) photon_scale: f64,
    /// Beam profile width.
    pub(crate) beam_std: f64,
    /// Output image side length.
    pub(crate) image_size: usize,

    /// Reuse `seed` for every frame instead of fresh noise.
    pub(crate) fixed_seed: bool,
    /// Seed used when `fixed_seed` is set.
    pub(crate) seed: u64,
    /// Display colormap.
    pub(crate) colormap: Colormap,

    /// Last synthesized frame.
    pub(crate) frame: Option<XrayImage>,
    /// Texture of the last frame.
    pub(crate) texture: Option<egui::TextureHandle>,
    /// User-facing status message.
    pub(crate) status_text: String,
    /// Whether the status reports a failure.
    pub(crate) status_is_error: bool,
    /// Parameters changed since the last frame.
    pub(crate) dirty: bool,
}

impl Default for XraySimApp {
    fn default() -> Self {
        let synth = Synthesizer::default();
        let config = synth.config().clone();
        Self {
            synth,
            current_ma: 200.0,
            voltage_kvp: 70.0,
            exposure_ms: config.default_exposure_ms,
            dose_exponent: config.default_dose_exponent,
            photon_scale: config.default_photon_scale,
            beam_std: config.default_beam_std,
            image_size: config.default_image_size,

            fixed_seed: false,
            seed: 0,
            colormap: Colormap::Grayscale,

            frame: None,
            texture: None,
            status_text: "Ready".to_string(),
            status_is_error: false,
            dirty: true,
        }
    }
}

impl XraySimApp {
    /// Exposure built from every current control value.
    pub fn exposure(&self) -> Exposure {
        self.synth
            .exposure(self.current_ma, self.voltage_kvp)
            .with_exposure_ms(self.exposure_ms)
            .with_dose_exponent(self.dose_exponent)
            .with_photon_scale(self.photon_scale)
            .with_beam_std(self.beam_std)
            .with_image_size(self.image_size)
    }

    /// Synthesize a new frame and upload it as a texture.
    pub fn regenerate(&mut self, ctx: &egui::Context) {
        self.dirty = false;
        let exposure = self.exposure();
        let result = if self.fixed_seed {
            self.synth.synthesize_seeded(&exposure, self.seed)
        } else {
            self.synth.synthesize(&exposure)
        };

        match result {
            Ok(frame) => {
                self.status_text = format!(
                    "dose {:.4}  mean {:.1}",
                    exposure.relative_dose(self.synth.config()),
                    frame.mean()
                );
                self.status_is_error = false;
                self.frame = Some(frame);
                self.refresh_texture(ctx);
            }
            Err(e) => {
                log::warn!("synthesis failed: {e}");
                self.status_text = format!("Error: {e}");
                self.status_is_error = true;
            }
        }
    }

    /// Re-upload the current frame, e.g. after a colormap change.
    pub fn refresh_texture(&mut self, ctx: &egui::Context) {
        if let Some(frame) = &self.frame {
            let img = frame_to_color_image(frame, self.colormap);
            self.texture = Some(ctx.load_texture("xray", img, egui::TextureOptions::LINEAR));
        }
    }

    /// Ask for a destination and write the current frame there.
    pub fn save_frame(&mut self) {
        match self.try_save_frame() {
            Ok(Some(path)) => {
                log::info!("saved frame to {}", path.display());
                self.status_text = format!("Saved {}", path.display());
                self.status_is_error = false;
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("save failed: {e:#}");
                self.status_text = format!("Error: {e:#}");
                self.status_is_error = true;
            }
        }
    }

    fn try_save_frame(&self) -> anyhow::Result<Option<PathBuf>> {
        let Some(frame) = &self.frame else {
            return Ok(None);
        };
        let Some(path) = FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("PGM", &["pgm"])
            .add_filter("TIFF", &["tif", "tiff"])
            .set_file_name("xray.png")
            .save_file()
        else {
            return Ok(None);
        };
        xraysim_io::write_image(&path, frame)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(Some(path))
    }
}

impl eframe::App for XraySimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_side_panel(ctx);
        if self.dirty {
            self.regenerate(ctx);
        }
        self.render_central_panel(ctx);
    }
}
