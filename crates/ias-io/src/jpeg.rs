//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Only 8-bit grayscale and 24-bit RGB sources are
//! decoded. JPEG is lossy, so a written mask does not read back exactly.

use crate::{IoError, IoResult, Raster};
use ias_core::{Color, Image};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::{Read, Write};

/// Quality used when encoding
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG header info".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let colors = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().map(|&v| Color::bgr(v, v, v)).collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|px| Color::bgr(px[2], px[1], px[0]))
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    Ok(Image::from_colors(width, height, colors)?)
}

/// Write a JPEG image at [`DEFAULT_QUALITY`].
pub(crate) fn write_jpeg<W: Write>(raster: Raster<'_>, mut writer: W) -> IoResult<()> {
    let width = u16::try_from(raster.width())
        .map_err(|_| IoError::EncodeError(format!("width {} too large", raster.width())))?;
    let height = u16::try_from(raster.height())
        .map_err(|_| IoError::EncodeError(format!("height {} too large", raster.height())))?;

    let color_type = match raster {
        Raster::Gray(_) => jpeg_encoder::ColorType::Luma,
        Raster::Color(_) => jpeg_encoder::ColorType::Rgb,
    };

    let mut data = Vec::new();
    let mut row = Vec::new();
    for y in 0..raster.height() {
        raster.row_rgb(y, &mut row);
        data.extend_from_slice(&row);
    }

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, DEFAULT_QUALITY);
    encoder
        .encode(&data, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    writer.write_all(&jpeg_buf)?;
    Ok(())
}
