//! Noise-free photon field.
//!
//! The field is a centered Gaussian sampled on `[-1, 1] x [-1, 1]`, with
//! `size` samples per axis including both end points.

use ndarray::{Array1, Array2};

/// Sample positions along one axis, matching `linspace(-1, 1, size)`.
///
/// A single sample sits at `-1`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn axis_coordinates(size: usize) -> Array1<f64> {
    if size <= 1 {
        return Array1::from_elem(size, -1.0);
    }
    let step = 2.0 / (size - 1) as f64;
    let mut coords = Array1::from_shape_fn(size, |i| -1.0 + i as f64 * step);
    coords[size - 1] = 1.0;
    coords
}

/// Expected photon count per pixel.
///
/// `photons[row, col] = exp(-(x² + y²) / (2 σ²)) * peak`, where `y` runs down
/// the rows, `x` across the columns and `peak = dose_rel * photon_scale`.
#[must_use]
pub fn gaussian_field(size: usize, beam_std: f64, peak: f64) -> Array2<f64> {
    let coords = axis_coordinates(size);
    let two_var = 2.0 * beam_std * beam_std;
    Array2::from_shape_fn((size, size), |(row, col)| {
        let y = coords[row];
        let x = coords[col];
        let r2 = x * x + y * y;
        (-r2 / two_var).exp() * peak
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_coordinates_endpoints() {
        let coords = axis_coordinates(5);
        assert_eq!(coords.len(), 5);
        assert_relative_eq!(coords[0], -1.0);
        assert_relative_eq!(coords[2], 0.0);
        assert_relative_eq!(coords[4], 1.0);
    }

    #[test]
    fn test_axis_coordinates_degenerate_sizes() {
        assert_eq!(axis_coordinates(0).len(), 0);
        let single = axis_coordinates(1);
        assert_eq!(single.len(), 1);
        assert_relative_eq!(single[0], -1.0);
    }

    #[test]
    fn test_gaussian_field_peak_at_center() {
        let field = gaussian_field(5, 0.5, 100.0);
        assert_eq!(field.dim(), (5, 5));
        assert_relative_eq!(field[[2, 2]], 100.0);
        // Corner: r² = 2, σ = 0.5 -> exp(-4)
        assert_relative_eq!(field[[0, 0]], 100.0 * (-4.0f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_gaussian_field_is_radially_symmetric() {
        let field = gaussian_field(9, 0.3, 1.0);
        for row in 0..9 {
            for col in 0..9 {
                assert_relative_eq!(field[[row, col]], field[[col, row]], epsilon = 1e-12);
                assert_relative_eq!(field[[row, col]], field[[8 - row, col]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_wider_beam_spreads_photons() {
        let narrow = gaussian_field(16, 0.2, 1.0).sum();
        let wide = gaussian_field(16, 0.8, 1.0).sum();
        assert!(wide > narrow);
    }
}
