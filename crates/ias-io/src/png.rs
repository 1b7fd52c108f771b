//! PNG image format support

use crate::{IoError, IoResult, Raster};
use ias_core::{Color, Image};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Palette, low bit depth and 16-bit inputs are normalized to 8 bits per
/// sample by the decoder before conversion.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }

    let samples = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "palette was not expanded".to_string(),
            ));
        }
    };

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let mut colors = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height as usize {
        let row_start = y * bytes_per_row;
        let row = &buf[row_start..row_start + width as usize * samples];
        for px in row.chunks_exact(samples) {
            let color = if samples < 3 {
                Color::bgr(px[0], px[0], px[0])
            } else {
                Color::bgr(px[2], px[1], px[0])
            };
            colors.push(color);
        }
    }

    Ok(Image::from_colors(width, height, colors)?)
}

/// Write a PNG image
///
/// Masks are written as 8-bit grayscale, images as 8-bit RGB.
pub(crate) fn write_png<W: Write>(raster: Raster<'_>, writer: W) -> IoResult<()> {
    let width = raster.width();
    let height = raster.height();

    let color_type = match raster {
        Raster::Gray(_) => ColorType::Grayscale,
        Raster::Color(_) => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::new();
    let mut row = Vec::new();
    for y in 0..height {
        raster.row_rgb(y, &mut row);
        data.extend_from_slice(&row);
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
