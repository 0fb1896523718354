//! Colormap definitions and application logic.

use crate::util::f32_to_u8;

/// Available colormaps for frame display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Grayscale - black to white, the raw detector look.
    Grayscale,
    /// Inverted grayscale - film look, dense regions bright.
    Film,
    /// Hot (Thermal) - black to red to yellow to white.
    Hot,
    /// Viridis (approximate) - blue to teal to green to yellow.
    Viridis,
}

impl Colormap {
    /// All colormaps in menu order.
    pub const ALL: [Colormap; 4] = [
        Colormap::Grayscale,
        Colormap::Film,
        Colormap::Hot,
        Colormap::Viridis,
    ];
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Grayscale => write!(f, "Grayscale"),
            Colormap::Film => write!(f, "Film (inverted)"),
            Colormap::Hot => write!(f, "Hot (Thermal)"),
            Colormap::Viridis => write!(f, "Viridis"),
        }
    }
}

impl Colormap {
    /// Apply the colormap to a normalized value [0, 1] and return RGBA bytes.
    #[must_use]
    pub fn apply(self, val: f32) -> [u8; 4] {
        let val = val.clamp(0.0, 1.0);
        match self {
            Colormap::Grayscale => {
                let v = f32_to_u8(val * 255.0);
                [v, v, v, 255]
            }
            Colormap::Film => {
                let v = f32_to_u8((1.0 - val) * 255.0);
                [v, v, v, 255]
            }
            Colormap::Hot => {
                if val < 0.5 {
                    // Red to Yellow
                    let g = f32_to_u8(val * 2.0 * 255.0);
                    [255, g, 0, 255]
                } else {
                    // Yellow to White
                    let b = f32_to_u8((val - 0.5) * 2.0 * 255.0);
                    [255, 255, b, 255]
                }
            }
            Colormap::Viridis => {
                let r = f32_to_u8(255.0 * val.powf(2.0));
                let g = f32_to_u8(255.0 * val);
                let b = f32_to_u8(255.0 * (1.0 - val));
                [r, g, b, 255]
            }
        }
    }
}
