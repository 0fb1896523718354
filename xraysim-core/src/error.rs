//! Error types for xraysim-core.

use std::fmt;

use thiserror::Error;

/// Result type alias for xraysim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for xraysim operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An exposure input failed its precondition check.
    #[error("invalid parameter `{parameter}`: {issue}")]
    InvalidParameter {
        /// The offending input.
        parameter: Parameter,
        /// Why it was rejected.
        issue: ParameterIssue,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidParameter`].
    pub(crate) fn invalid(parameter: Parameter, issue: ParameterIssue) -> Self {
        Self::InvalidParameter { parameter, issue }
    }

    /// Returns the offending parameter, if this is a parameter error.
    #[must_use]
    pub fn parameter(&self) -> Option<Parameter> {
        match self {
            Self::InvalidParameter { parameter, .. } => Some(*parameter),
            Self::Config(_) => None,
        }
    }
}

/// Names the exposure inputs accepted by the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Tube current in milliamperes.
    CurrentMa,
    /// Tube peak voltage in kilovolts.
    VoltageKvp,
    /// Exposure time in milliseconds.
    ExposureMs,
    /// Power-law exponent relating voltage to dose.
    DoseExponent,
    /// Photons per unit relative dose.
    PhotonScale,
    /// Gaussian width of the beam profile.
    BeamStd,
    /// Side length of the square output image.
    ImageSize,
}

impl Parameter {
    /// Name of the parameter as shown to users.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Parameter::CurrentMa => "current_mA",
            Parameter::VoltageKvp => "voltage_kVp",
            Parameter::ExposureMs => "exposure_ms",
            Parameter::DoseExponent => "dose_exponent",
            Parameter::PhotonScale => "photon_scale",
            Parameter::BeamStd => "beam_std",
            Parameter::ImageSize => "image_size",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reason a parameter was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParameterIssue {
    /// Value is zero or negative where a strictly positive value is required.
    #[error("must be strictly positive, got {0}")]
    NotPositive(f64),

    /// Value is NaN or infinite.
    #[error("must be finite, got {0}")]
    NotFinite(f64),

    /// Size given as a floating-point value with a fractional part.
    #[error("must be a whole number, got {0}")]
    NotAnInteger(f64),

    /// Size of zero.
    #[error("must be at least 1")]
    Zero,

    /// Inputs are individually finite but their dose product is not.
    #[error("drives the relative dose to a non-finite value")]
    DoseOverflow,
}
