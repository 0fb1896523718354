//! Texture generation for frame display.

use egui::ColorImage;
use xraysim_core::XrayImage;

use crate::viewer::Colormap;

/// Convert a synthesized frame into an RGBA color image.
#[must_use]
pub fn frame_to_color_image(frame: &XrayImage, colormap: Colormap) -> ColorImage {
    let size = frame.size();
    if colormap == Colormap::Grayscale {
        return ColorImage::from_gray([size, size], frame.as_slice());
    }

    let mut pixels = Vec::with_capacity(size * size * 4);
    for &value in frame.as_slice() {
        pixels.extend_from_slice(&colormap.apply(f32::from(value) / 255.0));
    }
    ColorImage::from_rgba_unmultiplied([size, size], &pixels)
}
