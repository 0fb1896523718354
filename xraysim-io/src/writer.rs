//! Image file writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::GrayImage;
use xraysim_core::XrayImage;

use crate::{Error, Result};

/// Output formats understood by [`write_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Binary portable graymap (P5).
    Pgm,
    /// PNG, 8-bit grayscale.
    Png,
    /// TIFF, 8-bit grayscale.
    Tiff,
    /// Windows bitmap.
    Bmp,
}

impl ImageFormat {
    /// Picks a format from the file extension (case-insensitive).
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`] for a missing or unknown extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| Error::UnsupportedFormat(format!("{}", path.display())))?;
        match ext.as_str() {
            "pgm" => Ok(Self::Pgm),
            "png" => Ok(Self::Png),
            "tif" | "tiff" => Ok(Self::Tiff),
            "bmp" => Ok(Self::Bmp),
            _ => Err(Error::UnsupportedFormat(ext)),
        }
    }
}

/// Writes `image` to `path` in the format named by its extension.
///
/// # Errors
/// Fails on unknown extensions and on I/O or encoder errors.
pub fn write_image<P: AsRef<Path>>(path: P, image: &XrayImage) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    log::debug!(
        "writing {0}x{0} frame to {1} as {format:?}",
        image.size(),
        path.display()
    );

    let encoded = match format {
        ImageFormat::Pgm => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_pgm(&mut writer, image)?;
            writer.flush()?;
            return Ok(());
        }
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Tiff => image::ImageFormat::Tiff,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
    };
    to_gray_image(image)?.save_with_format(path, encoded)?;
    Ok(())
}

/// Writes `image` as a binary PGM (P5) stream.
///
/// # Errors
/// Propagates errors from `writer`.
pub fn write_pgm<W: Write>(writer: &mut W, image: &XrayImage) -> Result<()> {
    let size = image.size();
    write!(writer, "P5\n{size} {size}\n255\n")?;
    writer.write_all(image.as_slice())?;
    Ok(())
}

fn to_gray_image(image: &XrayImage) -> Result<GrayImage> {
    let size = image.size();
    let side = u32::try_from(size).map_err(|_| Error::TooLarge(size))?;
    GrayImage::from_raw(side, side, image.as_slice().to_vec()).ok_or(Error::TooLarge(size))
}
