//! Normalization constants and exposure defaults.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable constants that parameterize the synthesizer.
///
/// `max_ma`, `max_kvp` and `reference_exponent` fix the denominator of the
/// relative dose so the top of the slider range maps near full scale. The
/// `default_*` fields fill in the optional exposure inputs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthesizerConfig {
    /// Tube current at the top of the range [mA].
    pub max_ma: f64,
    /// Tube voltage at the top of the range [kVp].
    pub max_kvp: f64,
    /// Exponent used in the dose denominator, independent of the caller's exponent.
    pub reference_exponent: f64,
    /// Exposure time used when the caller does not give one [ms].
    pub default_exposure_ms: f64,
    /// Dose exponent used when the caller does not give one.
    pub default_dose_exponent: f64,
    /// Photons per unit relative dose.
    pub default_photon_scale: f64,
    /// Gaussian width of the beam profile, in normalized image coordinates.
    pub default_beam_std: f64,
    /// Side length of the square output image.
    pub default_image_size: usize,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            max_ma: 500.0,
            max_kvp: 120.0,
            reference_exponent: 1.7,
            default_exposure_ms: 10.0,
            default_dose_exponent: 1.7,
            default_photon_scale: 1.0e4,
            default_beam_std: 0.5,
            default_image_size: 512,
        }
    }
}

impl SynthesizerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the normalization current.
    pub fn with_max_ma(mut self, max_ma: f64) -> Self {
        self.max_ma = max_ma;
        self
    }

    /// Sets the normalization voltage.
    pub fn with_max_kvp(mut self, max_kvp: f64) -> Self {
        self.max_kvp = max_kvp;
        self
    }

    /// Sets the exponent used in the dose denominator.
    pub fn with_reference_exponent(mut self, exponent: f64) -> Self {
        self.reference_exponent = exponent;
        self
    }

    /// Sets the default exposure time.
    pub fn with_default_exposure_ms(mut self, exposure_ms: f64) -> Self {
        self.default_exposure_ms = exposure_ms;
        self
    }

    /// Sets the default dose exponent.
    pub fn with_default_dose_exponent(mut self, exponent: f64) -> Self {
        self.default_dose_exponent = exponent;
        self
    }

    /// Sets the default photon scale.
    pub fn with_default_photon_scale(mut self, photon_scale: f64) -> Self {
        self.default_photon_scale = photon_scale;
        self
    }

    /// Sets the default beam width.
    pub fn with_default_beam_std(mut self, beam_std: f64) -> Self {
        self.default_beam_std = beam_std;
        self
    }

    /// Sets the default image size.
    pub fn with_default_image_size(mut self, image_size: usize) -> Self {
        self.default_image_size = image_size;
        self
    }

    /// Denominator of the relative dose: `max_ma * max_kvp ^ reference_exponent`.
    #[must_use]
    pub fn reference_dose(&self) -> f64 {
        self.max_ma * self.max_kvp.powf(self.reference_exponent)
    }

    /// Checks that every constant is usable.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_ma", self.max_ma),
            ("max_kvp", self.max_kvp),
            ("default_exposure_ms", self.default_exposure_ms),
            ("default_photon_scale", self.default_photon_scale),
            ("default_beam_std", self.default_beam_std),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("reference_exponent", self.reference_exponent),
            ("default_dose_exponent", self.default_dose_exponent),
        ] {
            if !value.is_finite() {
                return Err(Error::Config(format!("{name} must be finite, got {value}")));
            }
        }
        if self.default_image_size == 0 {
            return Err(Error::Config("default_image_size must be at least 1".into()));
        }
        let reference = self.reference_dose();
        if !reference.is_finite() || reference <= 0.0 {
            return Err(Error::Config(format!(
                "reference dose must be finite and positive, got {reference}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_constants() {
        let config = SynthesizerConfig::default();
        assert_relative_eq!(config.max_ma, 500.0);
        assert_relative_eq!(config.max_kvp, 120.0);
        assert_relative_eq!(config.reference_exponent, 1.7);
        assert_eq!(config.default_image_size, 512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reference_dose() {
        let config = SynthesizerConfig::new()
            .with_max_ma(2.0)
            .with_max_kvp(10.0)
            .with_reference_exponent(2.0);
        assert_relative_eq!(config.reference_dose(), 200.0);
    }

    #[test]
    fn test_validate_rejects_bad_constants() {
        let config = SynthesizerConfig::new().with_max_kvp(0.0);
        assert!(matches!(config.validate(), Err(Error::Config(msg)) if msg.contains("max_kvp")));

        let config = SynthesizerConfig::new().with_reference_exponent(f64::NAN);
        assert!(config.validate().is_err());

        let config = SynthesizerConfig::new().with_default_image_size(0);
        assert!(config.validate().is_err());

        let config = SynthesizerConfig::new().with_reference_exponent(1.0e6);
        assert!(config.validate().is_err());
    }
}
