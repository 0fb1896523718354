//! The image synthesizer.

use ndarray::Array2;
use rand::Rng;

use crate::error::{Parameter, ParameterIssue};
use crate::{field, noise, normalize};
use crate::{Error, Exposure, Result, SynthesizerConfig, XrayImage};

/// Renders exposures into 8-bit frames under a fixed configuration.
///
/// The synthesizer holds no mutable state. Each call builds a fresh frame, and
/// randomness comes from the caller or from a seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesizer {
    config: SynthesizerConfig,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self {
            config: SynthesizerConfig::default(),
        }
    }
}

impl Synthesizer {
    /// Creates a synthesizer after validating `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if any constant is unusable.
    pub fn new(config: SynthesizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Exposure for `current_ma` and `voltage_kvp` with this synthesizer's defaults.
    #[must_use]
    pub fn exposure(&self, current_ma: f64, voltage_kvp: f64) -> Exposure {
        Exposure::with_defaults(current_ma, voltage_kvp, &self.config)
    }

    /// Expected photon count per pixel before noise.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if the exposure fails validation or
    /// its dose overflows.
    pub fn photon_field(&self, exposure: &Exposure) -> Result<Array2<f64>> {
        exposure.validate()?;
        let dose_rel = exposure.relative_dose(&self.config);
        if !dose_rel.is_finite() {
            return Err(Error::invalid(
                dose_overflow_source(exposure),
                ParameterIssue::DoseOverflow,
            ));
        }
        let peak = dose_rel * exposure.photon_scale;
        if !peak.is_finite() {
            return Err(Error::invalid(
                Parameter::PhotonScale,
                ParameterIssue::DoseOverflow,
            ));
        }
        log::debug!(
            "synthesizing {0}x{0} frame: {1:.3} mAs, dose_rel={dose_rel:.6}, peak={peak:.3} photons",
            exposure.image_size,
            exposure.charge_mas(),
        );
        Ok(field::gaussian_field(
            exposure.image_size,
            exposure.beam_std,
            peak,
        ))
    }

    /// Synthesizes a frame using the thread-local random source.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if the exposure is invalid.
    pub fn synthesize(&self, exposure: &Exposure) -> Result<XrayImage> {
        self.synthesize_with_rng(exposure, &mut rand::thread_rng())
    }

    /// Synthesizes a frame drawing noise from `rng`, one pixel at a time in
    /// row-major order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if the exposure is invalid.
    pub fn synthesize_with_rng<R: Rng + ?Sized>(
        &self,
        exposure: &Exposure,
        rng: &mut R,
    ) -> Result<XrayImage> {
        let photons = self.photon_field(exposure)?;
        let noisy = noise::apply_poisson_noise(&photons, rng);
        Ok(finish(&noisy))
    }

    /// Synthesizes a frame with parallel, seed-derived noise.
    ///
    /// The same seed and exposure always produce the same bytes.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if the exposure is invalid.
    pub fn synthesize_seeded(&self, exposure: &Exposure, seed: u64) -> Result<XrayImage> {
        let photons = self.photon_field(exposure)?;
        let noisy = noise::apply_poisson_noise_seeded(&photons, seed);
        Ok(finish(&noisy))
    }
}

/// Input blamed for a non-finite relative dose.
///
/// An overflowing tube charge names the larger of its two factors; anything
/// else comes from the voltage power term.
fn dose_overflow_source(exposure: &Exposure) -> Parameter {
    if exposure.charge_mas().is_finite() {
        Parameter::DoseExponent
    } else if exposure.current_ma >= exposure.exposure_ms {
        Parameter::CurrentMa
    } else {
        Parameter::ExposureMs
    }
}

fn finish(noisy: &Array2<f32>) -> XrayImage {
    XrayImage::from_square(normalize::to_u8(noisy))
}

/// Synthesizes a frame for `current_ma` and `voltage_kvp` using default
/// settings and the thread-local random source.
///
/// # Errors
/// Returns [`Error::InvalidParameter`] naming the rejected input.
pub fn synthesize(current_ma: f64, voltage_kvp: f64) -> Result<XrayImage> {
    let synth = Synthesizer::default();
    let exposure = synth.exposure(current_ma, voltage_kvp);
    synth.synthesize(&exposure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small(current: f64, voltage: f64) -> Exposure {
        Exposure::new(current, voltage).with_image_size(32)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SynthesizerConfig::new().with_max_ma(-1.0);
        assert!(matches!(Synthesizer::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_exposure_uses_config_defaults() {
        let synth = Synthesizer::new(SynthesizerConfig::new().with_default_image_size(16)).unwrap();
        let exposure = synth.exposure(100.0, 60.0);
        assert_eq!(exposure.image_size, 16);
        assert_relative_eq!(exposure.exposure_ms, 10.0);
    }

    #[test]
    fn test_photon_field_peak_matches_dose() {
        let synth = Synthesizer::default();
        let exposure = small(500.0, 120.0).with_image_size(5);
        let field = synth.photon_field(&exposure).unwrap();
        let expected = exposure.relative_dose(synth.config()) * exposure.photon_scale;
        assert_relative_eq!(field[[2, 2]], expected, epsilon = 1e-9);
        // 10 ms at the reference point is 1% of the reference dose.
        assert_relative_eq!(expected, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dose_overflow_is_rejected() {
        let synth = Synthesizer::default();
        let exposure = small(200.0, 100.0).with_dose_exponent(400.0);
        let err = synth.photon_field(&exposure).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidParameter {
                parameter: Parameter::DoseExponent,
                issue: ParameterIssue::DoseOverflow,
            }
        );
    }

    #[test]
    fn test_peak_overflow_names_photon_scale() {
        let synth = Synthesizer::default();
        let exposure = small(500.0, 120.0)
            .with_exposure_ms(2000.0)
            .with_photon_scale(f64::MAX);
        assert!(exposure.relative_dose(synth.config()) > 1.0);
        let err = synth.photon_field(&exposure).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidParameter {
                parameter: Parameter::PhotonScale,
                issue: ParameterIssue::DoseOverflow,
            }
        );
    }

    #[test]
    fn test_charge_overflow_names_larger_factor() {
        let synth = Synthesizer::default();
        let err = synth
            .photon_field(&small(f64::MAX, 70.0).with_exposure_ms(2000.0))
            .unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::CurrentMa));

        let err = synth
            .photon_field(&small(200.0, 70.0).with_exposure_ms(f64::MAX))
            .unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::ExposureMs));
    }

    #[test]
    fn test_synthesize_with_rng_is_reproducible() {
        let synth = Synthesizer::default();
        let exposure = small(200.0, 70.0);
        let a = synth
            .synthesize_with_rng(&exposure, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = synth
            .synthesize_with_rng(&exposure, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.max(), 255);
    }

    #[test]
    fn test_invalid_exposure_fails_before_sampling() {
        let synth = Synthesizer::default();
        let err = synth.synthesize_seeded(&small(-5.0, 70.0), 1).unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::CurrentMa));
    }

    #[test]
    fn test_free_function_uses_defaults() {
        let image = synthesize(200.0, 70.0).unwrap();
        assert_eq!(image.dim(), (512, 512));
    }
}
