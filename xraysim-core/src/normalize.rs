//! Conversion of noisy photon counts to 8-bit pixels.

use ndarray::Array2;

/// Largest value in the field, or `0.0` for an empty field.
#[must_use]
pub fn peak(counts: &Array2<f32>) -> f32 {
    counts.iter().copied().fold(0.0_f32, f32::max)
}

/// Rescales counts so the peak maps to 255, then clips and truncates.
///
/// A field whose peak is zero or negative yields an all-zero image. The cast
/// truncates after clipping: a scaled value of `254.9` becomes `254`.
#[must_use]
pub fn to_u8(counts: &Array2<f32>) -> Array2<u8> {
    let peak = peak(counts);
    if peak <= 0.0 {
        log::debug!("degenerate frame: peak photon count is {peak}, returning blank image");
        return Array2::zeros(counts.dim());
    }
    counts.mapv(|value| scale_pixel(value, peak))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_pixel(value: f32, peak: f32) -> u8 {
    (value / peak * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_peak_maps_to_255() {
        let counts = array![[0.0_f32, 5.0], [10.0, 2.5]];
        let img = to_u8(&counts);
        assert_eq!(img, array![[0_u8, 127], [255, 63]]);
    }

    #[test]
    fn test_cast_truncates() {
        assert_eq!(scale_pixel(254.9, 255.0), 254);
        assert_eq!(scale_pixel(0.999, 255.0), 0);
        assert_eq!(scale_pixel(255.0, 255.0), 255);
    }

    #[test]
    fn test_degenerate_peak_gives_blank_image() {
        let zeros = Array2::<f32>::zeros((4, 3));
        let img = to_u8(&zeros);
        assert_eq!(img.dim(), (4, 3));
        assert!(img.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_negative_values_clip_to_zero() {
        let counts = array![[-3.0_f32, 6.0]];
        assert_eq!(to_u8(&counts), array![[0_u8, 255]]);
    }

    #[test]
    fn test_peak_of_empty_field() {
        let empty = Array2::<f32>::zeros((0, 0));
        assert_eq!(peak(&empty), 0.0);
        assert_eq!(to_u8(&empty).len(), 0);
    }
}
