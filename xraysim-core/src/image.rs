//! 8-bit grayscale output image.

use ndarray::Array2;

/// Square grayscale frame produced by the synthesizer.
///
/// Pixels are stored row-major with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrayImage {
    pixels: Array2<u8>,
}

impl XrayImage {
    /// Wraps a square pixel array.
    ///
    /// Returns `None` if the array is not square.
    pub fn from_pixels(pixels: Array2<u8>) -> Option<Self> {
        let (rows, cols) = pixels.dim();
        (rows == cols).then(|| Self::from_square(pixels))
    }

    /// Wraps an array already known to be square.
    pub(crate) fn from_square(pixels: Array2<u8>) -> Self {
        debug_assert_eq!(pixels.nrows(), pixels.ncols());
        let pixels = if pixels.is_standard_layout() {
            pixels
        } else {
            pixels.as_standard_layout().into_owned()
        };
        Self { pixels }
    }

    /// Side length in pixels.
    #[must_use]
    pub fn size(&self) -> usize {
        self.pixels.nrows()
    }

    /// Shape as `(rows, cols)`.
    #[must_use]
    pub fn dim(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    /// Pixel array view.
    #[must_use]
    pub fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }

    /// Pixel value at `(row, col)`, if in bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.pixels.get((row, col)).copied()
    }

    /// Row-major pixel bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        // Construction guarantees standard layout.
        self.pixels.as_slice().unwrap_or(&[])
    }

    /// Consumes the image and returns its row-major bytes.
    #[must_use]
    pub fn into_raw_vec(self) -> Vec<u8> {
        self.pixels.into_raw_vec_and_offset().0
    }

    /// Mean pixel value in `[0, 255]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let total: u64 = self.pixels.iter().map(|&p| u64::from(p)).sum();
        total as f64 / self.pixels.len() as f64
    }

    /// Brightest pixel value.
    #[must_use]
    pub fn max(&self) -> u8 {
        self.pixels.iter().copied().max().unwrap_or(0)
    }

    /// True if every pixel is zero.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }
}

impl From<XrayImage> for Array2<u8> {
    fn from(image: XrayImage) -> Self {
        image.pixels
    }
}
