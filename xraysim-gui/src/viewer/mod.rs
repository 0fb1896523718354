//! Conversion of synthesized frames into displayable textures.

mod colormap;
mod texture;

pub use colormap::Colormap;
pub use texture::frame_to_color_image;
