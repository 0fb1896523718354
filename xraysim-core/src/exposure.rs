//! Exposure parameters and the relative dose model.

use crate::error::{Parameter, ParameterIssue};
use crate::{Error, Result, SynthesizerConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inputs for one synthesized frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exposure {
    /// Tube current [mA].
    pub current_ma: f64,
    /// Tube peak voltage [kVp].
    pub voltage_kvp: f64,
    /// Exposure time [ms].
    pub exposure_ms: f64,
    /// Exponent `n` in dose ∝ kVp^n.
    pub dose_exponent: f64,
    /// Photons per unit relative dose.
    pub photon_scale: f64,
    /// Gaussian width of the beam profile.
    pub beam_std: f64,
    /// Side length of the square output image.
    pub image_size: usize,
}

impl Exposure {
    /// Creates an exposure with the default configuration's optional values.
    pub fn new(current_ma: f64, voltage_kvp: f64) -> Self {
        Self::with_defaults(current_ma, voltage_kvp, &SynthesizerConfig::default())
    }

    /// Creates an exposure whose optional values come from `config`.
    pub fn with_defaults(current_ma: f64, voltage_kvp: f64, config: &SynthesizerConfig) -> Self {
        Self {
            current_ma,
            voltage_kvp,
            exposure_ms: config.default_exposure_ms,
            dose_exponent: config.default_dose_exponent,
            photon_scale: config.default_photon_scale,
            beam_std: config.default_beam_std,
            image_size: config.default_image_size,
        }
    }

    /// Sets the exposure time.
    pub fn with_exposure_ms(mut self, exposure_ms: f64) -> Self {
        self.exposure_ms = exposure_ms;
        self
    }

    /// Sets the dose exponent.
    pub fn with_dose_exponent(mut self, dose_exponent: f64) -> Self {
        self.dose_exponent = dose_exponent;
        self
    }

    /// Sets the photon scale.
    pub fn with_photon_scale(mut self, photon_scale: f64) -> Self {
        self.photon_scale = photon_scale;
        self
    }

    /// Sets the beam width.
    pub fn with_beam_std(mut self, beam_std: f64) -> Self {
        self.beam_std = beam_std;
        self
    }

    /// Sets the image size.
    pub fn with_image_size(mut self, image_size: usize) -> Self {
        self.image_size = image_size;
        self
    }

    /// Checks every input against its precondition.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] for the first input that is
    /// non-finite, non-positive where positivity is required, or a zero size.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            (Parameter::CurrentMa, self.current_ma),
            (Parameter::VoltageKvp, self.voltage_kvp),
            (Parameter::ExposureMs, self.exposure_ms),
        ];
        for (parameter, value) in positive {
            check_positive(parameter, value)?;
        }
        check_finite(Parameter::DoseExponent, self.dose_exponent)?;
        check_positive(Parameter::PhotonScale, self.photon_scale)?;
        check_positive(Parameter::BeamStd, self.beam_std)?;
        if self.image_size == 0 {
            return Err(Error::invalid(Parameter::ImageSize, ParameterIssue::Zero));
        }
        Ok(())
    }

    /// Tube charge in milliampere-seconds.
    #[must_use]
    pub fn charge_mas(&self) -> f64 {
        self.current_ma * self.exposure_ms / 1000.0
    }

    /// Dose relative to the configuration's reference dose.
    ///
    /// The numerator uses this exposure's `dose_exponent`; the denominator
    /// always uses `config.reference_exponent`.
    #[must_use]
    pub fn relative_dose(&self, config: &SynthesizerConfig) -> f64 {
        self.charge_mas() * self.voltage_kvp.powf(self.dose_exponent) / config.reference_dose()
    }

    /// Expected photon count at the beam center.
    #[must_use]
    pub fn peak_photons(&self, config: &SynthesizerConfig) -> f64 {
        self.relative_dose(config) * self.photon_scale
    }
}

/// Converts a floating-point image size into a pixel count.
///
/// # Errors
/// Rejects non-finite values, values with a fractional part, and values below 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn image_size_from_f64(value: f64) -> Result<usize> {
    if !value.is_finite() {
        return Err(Error::invalid(
            Parameter::ImageSize,
            ParameterIssue::NotFinite(value),
        ));
    }
    if value.fract() != 0.0 {
        return Err(Error::invalid(
            Parameter::ImageSize,
            ParameterIssue::NotAnInteger(value),
        ));
    }
    if value < 1.0 {
        return Err(Error::invalid(Parameter::ImageSize, ParameterIssue::Zero));
    }
    Ok(value as usize)
}

fn check_finite(parameter: Parameter, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(parameter, ParameterIssue::NotFinite(value)))
    }
}

fn check_positive(parameter: Parameter, value: f64) -> Result<()> {
    check_finite(parameter, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(parameter, ParameterIssue::NotPositive(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_follow_config() {
        let config = SynthesizerConfig::new()
            .with_default_exposure_ms(20.0)
            .with_default_image_size(64);
        let exposure = Exposure::with_defaults(100.0, 80.0, &config);
        assert_relative_eq!(exposure.exposure_ms, 20.0);
        assert_relative_eq!(exposure.dose_exponent, 1.7);
        assert_eq!(exposure.image_size, 64);
    }

    #[test]
    fn test_charge_mas() {
        let exposure = Exposure::new(200.0, 70.0).with_exposure_ms(50.0);
        assert_relative_eq!(exposure.charge_mas(), 10.0);
    }

    #[test]
    fn test_relative_dose_is_unity_at_reference() {
        let config = SynthesizerConfig::default();
        let exposure = Exposure::new(500.0, 120.0).with_exposure_ms(1000.0);
        assert_relative_eq!(exposure.relative_dose(&config), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_exponent_is_decoupled() {
        let config = SynthesizerConfig::default();
        let exposure = Exposure::new(500.0, 120.0)
            .with_exposure_ms(1000.0)
            .with_dose_exponent(2.0);
        // 120^2 / 120^1.7 = 120^0.3
        assert_relative_eq!(
            exposure.relative_dose(&config),
            120f64.powf(0.3),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Exposure::new(200.0, 70.0).validate().is_ok());
        assert!(Exposure::new(200.0, 70.0)
            .with_dose_exponent(-1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_names_offending_parameter() {
        let cases = [
            (Exposure::new(-5.0, 70.0), Parameter::CurrentMa),
            (Exposure::new(200.0, 0.0), Parameter::VoltageKvp),
            (
                Exposure::new(200.0, 70.0).with_exposure_ms(f64::NAN),
                Parameter::ExposureMs,
            ),
            (
                Exposure::new(200.0, 70.0).with_dose_exponent(f64::INFINITY),
                Parameter::DoseExponent,
            ),
            (
                Exposure::new(200.0, 70.0).with_photon_scale(-1.0),
                Parameter::PhotonScale,
            ),
            (
                Exposure::new(200.0, 70.0).with_beam_std(0.0),
                Parameter::BeamStd,
            ),
            (
                Exposure::new(200.0, 70.0).with_image_size(0),
                Parameter::ImageSize,
            ),
        ];
        for (exposure, expected) in cases {
            let err = exposure.validate().unwrap_err();
            assert_eq!(err.parameter(), Some(expected), "{err}");
        }
    }

    #[test]
    fn test_non_finite_reported_before_sign() {
        let err = Exposure::new(f64::NEG_INFINITY, 70.0).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                parameter: Parameter::CurrentMa,
                issue: ParameterIssue::NotFinite(_),
            }
        ));
    }

    #[test]
    fn test_image_size_from_f64() {
        assert_eq!(image_size_from_f64(512.0).unwrap(), 512);
        assert_eq!(image_size_from_f64(1.0).unwrap(), 1);
        assert!(matches!(
            image_size_from_f64(12.5),
            Err(Error::InvalidParameter {
                parameter: Parameter::ImageSize,
                issue: ParameterIssue::NotAnInteger(_),
            })
        ));
        assert!(image_size_from_f64(0.0).is_err());
        assert!(image_size_from_f64(-4.0).is_err());
        assert!(image_size_from_f64(f64::NAN).is_err());
    }
}
