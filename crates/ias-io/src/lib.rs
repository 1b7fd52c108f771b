//! ias-io - Image and mask I/O
//!
//! Decodes raster files into [`Image`] values with channels in B, G, R
//! order, and encodes [`Mask`] results (8-bit grayscale) or images back to
//! disk.
//!
//! | Format | Read | Write | Feature      |
//! |--------|------|-------|--------------|
//! | BMP    | 1/4/8/24/32-bit | 8-bit gray, 24-bit | `bmp` |
//! | PNM    | P5, P6 | P5, P6 | `pnm` |
//! | PNG    | all (normalized to 8-bit) | gray, RGB | `png-format` |
//! | JPEG   | gray, RGB | gray, RGB | `jpeg` |
//!
//! Grayscale sources are replicated into all three channels and alpha is
//! discarded, so every decoded image is a plain 3-channel raster.
//!
//! The format is detected from the file contents on read and chosen from
//! the file extension on write.

#[cfg(feature = "bmp")]
pub mod bmp;
mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use ias_core::{Image, Mask};
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

/// Pixel source handed to the format encoders
#[derive(Debug, Clone, Copy)]
pub(crate) enum Raster<'a> {
    /// Single-channel 8-bit values
    Gray(&'a Mask),
    /// Three-channel B, G, R samples
    Color(&'a Image),
}

impl Raster<'_> {
    pub(crate) fn width(&self) -> u32 {
        match self {
            Raster::Gray(mask) => mask.width(),
            Raster::Color(image) => image.width(),
        }
    }

    pub(crate) fn height(&self) -> u32 {
        match self {
            Raster::Gray(mask) => mask.height(),
            Raster::Color(image) => image.height(),
        }
    }

    /// Row `y` as interleaved bytes, R, G, B for color rasters.
    pub(crate) fn row_rgb(&self, y: u32, out: &mut Vec<u8>) {
        out.clear();
        match self {
            Raster::Gray(mask) => out.extend_from_slice(mask.row(y)),
            Raster::Color(image) => {
                for color in image.row(y) {
                    out.extend_from_slice(&[color.red(), color.green(), color.blue()]);
                }
            }
        }
    }
}

/// Read exactly `len` bytes of `what` from `reader`.
///
/// The buffer grows with the data actually present, so a header that
/// claims more than the input holds fails with [`IoError::InvalidData`]
/// instead of reserving the claimed size up front.
pub(crate) fn read_payload<R: Read>(
    reader: &mut R,
    len: usize,
    what: &str,
) -> IoResult<Vec<u8>> {
    let mut data = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut data)?;
    if data.len() != len {
        return Err(IoError::InvalidData(format!(
            "{what} truncated: expected {len} bytes, found {}",
            data.len()
        )));
    }
    Ok(data)
}

/// Multiply header-derived sizes, rejecting overflow.
pub(crate) fn checked_size(factors: &[usize], what: &str) -> IoResult<usize> {
    factors
        .iter()
        .try_fold(1usize, |acc, &f| acc.checked_mul(f))
        .ok_or_else(|| IoError::InvalidData(format!("{what} size overflows")))
}

/// Read an image from a file.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be read,
/// [`IoError::UnsupportedFormat`] if the contents are not a recognized
/// (or enabled) format, and a decode error for corrupt data.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let image = read_image_mem(&data)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "image loaded"
    );
    Ok(image)
}

/// Read an image from memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);

    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(cursor),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support is not enabled"
        ))),
    }
}

/// Write a mask as an 8-bit grayscale file.
///
/// The format is chosen from the extension of `path`. An empty mask is
/// not written and yields `Ok(false)`.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for an unknown extension and
/// [`IoError::Io`] / [`IoError::EncodeError`] if writing fails.
pub fn write_mask<P: AsRef<Path>>(mask: &Mask, path: P) -> IoResult<bool> {
    let path = path.as_ref();
    if mask.is_empty() {
        tracing::debug!(path = %path.display(), "empty mask, nothing written");
        return Ok(false);
    }
    let format = ImageFormat::from_path(path)?;
    write_file(Raster::Gray(mask), path, format)?;
    Ok(true)
}

/// Write an image, choosing the format from the extension of `path`.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    write_file(Raster::Color(image), path, format)
}

/// Encode a mask into memory.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] for an empty mask.
pub fn write_mask_mem(mask: &Mask, format: ImageFormat) -> IoResult<Vec<u8>> {
    if mask.is_empty() {
        return Err(IoError::InvalidData("cannot encode an empty mask".to_string()));
    }
    let mut buffer = Vec::new();
    write_raster(Raster::Gray(mask), &mut buffer, format)?;
    Ok(buffer)
}

/// Encode an image into memory.
pub fn write_image_mem(image: &Image, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_raster(Raster::Color(image), &mut buffer, format)?;
    Ok(buffer)
}

fn write_file(raster: Raster<'_>, path: &Path, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_raster(raster, &mut writer, format)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), ?format, "written");
    Ok(())
}

fn write_raster<W: Write>(raster: Raster<'_>, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(raster, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(raster, writer),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(raster, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = (raster, writer);
            Err(IoError::UnsupportedFormat(format!(
                "{other:?} support is not enabled"
            )))
        }
    }
}
