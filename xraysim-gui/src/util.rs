//! Numeric conversion utilities for xraysim-gui.

/// Convert f32 to u8 with clamping to [0, 255].
///
/// Rounds to nearest, for display colors only. Frame pixels are truncated by
/// `xraysim_core::normalize::to_u8` instead.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f32_to_u8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 255.0);
    clamped.round() as u8
}

/// Convert usize to f32 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f32(value: usize) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_to_u8_clamps() {
        assert_eq!(f32_to_u8(-4.0), 0);
        assert_eq!(f32_to_u8(127.6), 128);
        assert_eq!(f32_to_u8(300.0), 255);
    }

    #[test]
    fn test_f32_to_u8_rounds_not_truncates() {
        assert_eq!(f32_to_u8(254.9), 255);
        assert_eq!(f32_to_u8(0.4), 0);
    }
}
