//! BMP image format support
//!
//! Reads and writes uncompressed Windows Bitmap (BMP) files.

use crate::{IoError, IoResult, Raster, checked_size, read_payload};
use ias_core::{Color, Image};
use std::io::{self, Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn le_i32(bytes: &[u8], at: usize) -> i32 {
    le_u32(bytes, at) as i32
}

fn skip<R: Read>(reader: &mut R, count: usize) -> IoResult<()> {
    let skipped = io::copy(&mut reader.by_ref().take(count as u64), &mut io::sink())?;
    if skipped != count as u64 {
        return Err(IoError::InvalidData("BMP file truncated".to_string()));
    }
    Ok(())
}

/// Read a BMP image
///
/// Palette-based (1, 4, 8-bit) images are expanded through their color
/// table; 32-bit images drop the fourth byte.
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Image> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }

    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; 40];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_i32(&info_header, 4);
    let height = le_i32(&info_header, 8);

    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);

    // BI_RGB and BI_BITFIELDS with the default masks
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }

    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    skip(&mut reader, header_size as usize - BMP_INFO_HEADER_SIZE as usize)?;

    // Color table, stored as B, G, R, reserved
    let palette: Vec<Color> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let used = le_u32(&info_header, 32) as usize;
        let num_colors = if used == 0 { max_colors } else { used };
        if num_colors > max_colors {
            return Err(IoError::InvalidData(format!(
                "{} palette entries for a {}-bit BMP",
                num_colors, bits_per_pixel
            )));
        }
        read_payload(&mut reader, num_colors * 4, "BMP color table")?
            .chunks_exact(4)
            .map(|c| Color::bgr(c[0], c[1], c[2]))
            .collect()
    } else {
        Vec::new()
    };

    let current_pos = BMP_FILE_HEADER_SIZE + header_size as usize + palette.len() * 4;
    if pixel_offset > current_pos {
        skip(&mut reader, pixel_offset - current_pos)?;
    }

    // BMP rows are 4-byte aligned
    let row_bits = checked_size(&[width as usize, bits_per_pixel as usize], "BMP row")?;
    let row_stride = row_bits.div_ceil(32) * 4;
    let pixel_data_size = checked_size(&[row_stride, height as usize], "BMP pixel data")?;
    let pixel_data = read_payload(&mut reader, pixel_data_size, "BMP pixel data")?;
    let mut colors = vec![Color::ZERO; checked_size(&[width as usize, height as usize], "BMP")?];

    let lookup = |index: u8| -> IoResult<Color> {
        palette.get(index as usize).copied().ok_or_else(|| {
            IoError::InvalidData(format!("palette index {} out of range", index))
        })
    };

    for (row, row_buffer) in (0..height).zip(pixel_data.chunks_exact(row_stride.max(1))) {
        let y = if top_down { row } else { height - 1 - row };
        let out = &mut colors[y as usize * width as usize..(y as usize + 1) * width as usize];

        for (x, pixel) in out.iter_mut().enumerate() {
            *pixel = match bits_per_pixel {
                1 => lookup((row_buffer[x / 8] >> (7 - (x % 8))) & 1)?,
                4 => {
                    let byte = row_buffer[x / 2];
                    lookup(if x % 2 == 0 { byte >> 4 } else { byte & 0xF })?
                }
                8 => lookup(row_buffer[x])?,
                24 => {
                    let idx = x * 3;
                    Color::bgr(row_buffer[idx], row_buffer[idx + 1], row_buffer[idx + 2])
                }
                _ => {
                    let idx = x * 4;
                    Color::bgr(row_buffer[idx], row_buffer[idx + 1], row_buffer[idx + 2])
                }
            };
        }
    }

    Ok(Image::from_colors(width, height, colors)?)
}

/// Write a BMP image
///
/// Masks become 8-bit images with a grayscale color table, images become
/// 24-bit. Rows are written bottom-up.
pub(crate) fn write_bmp<W: Write>(raster: Raster<'_>, mut writer: W) -> IoResult<()> {
    let width = raster.width();
    let height = raster.height();

    let bits_per_pixel: u16 = match raster {
        Raster::Gray(_) => 8,
        Raster::Color(_) => 24,
    };
    let colormap_size = if bits_per_pixel == 8 { 256 * 4 } else { 0 };

    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let pixel_data_size = row_stride * height as usize;

    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize + colormap_size;
    let file_size = pixel_offset + pixel_data_size;

    // File header
    writer.write_all(b"BM")?;
    writer.write_all(&(file_size as u32).to_le_bytes())?;
    writer.write_all(&[0u8; 4])?; // Reserved
    writer.write_all(&(pixel_offset as u32).to_le_bytes())?;

    // Info header
    writer.write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?; // Bottom-up
    writer.write_all(&1u16.to_le_bytes())?; // Planes
    writer.write_all(&bits_per_pixel.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?; // Compression
    writer.write_all(&(pixel_data_size as u32).to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?; // X pixels per meter
    writer.write_all(&0i32.to_le_bytes())?; // Y pixels per meter
    writer.write_all(&0u32.to_le_bytes())?; // Colors used
    writer.write_all(&0u32.to_le_bytes())?; // Important colors

    if colormap_size > 0 {
        for i in 0..=255u8 {
            writer.write_all(&[i, i, i, 0])?;
        }
    }

    let mut row_buffer = vec![0u8; row_stride];
    let mut row = Vec::new();

    for r in 0..height {
        let y = height - 1 - r;
        raster.row_rgb(y, &mut row);
        match raster {
            Raster::Gray(_) => row_buffer[..row.len()].copy_from_slice(&row),
            Raster::Color(_) => {
                for (dst, src) in row_buffer.chunks_exact_mut(3).zip(row.chunks_exact(3)) {
                    dst.copy_from_slice(&[src[2], src[1], src[0]]);
                }
            }
        }
        writer.write_all(&row_buffer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ias_core::Mask;
    use std::io::Cursor;

    #[test]
    fn test_bmp_roundtrip_24bit_odd_width() {
        // Width 5 needs row padding (15 -> 16 bytes).
        let mut image = Image::new(5, 3).unwrap().try_into_mut().unwrap();
        for y in 0..3 {
            for x in 0..5 {
                let v = (x * 40 + y * 7) as u8;
                image.set_pixel(x, y, Color::bgr(v, 255 - v, y as u8)).unwrap();
            }
        }
        let image: Image = image.into();

        let mut buffer = Vec::new();
        write_bmp(Raster::Color(&image), &mut buffer).unwrap();
        assert_eq!(buffer.len(), 14 + 40 + 16 * 3);

        let back = read_bmp(Cursor::new(buffer)).unwrap();
        assert_eq!(back.data(), image.data());
    }

    #[test]
    fn test_bmp_mask_uses_gray_palette() {
        let mask = Mask::from_vec(3, 2, vec![0, 127, 255, 1, 2, 3]).unwrap();
        let mut buffer = Vec::new();
        write_bmp(Raster::Gray(&mask), &mut buffer).unwrap();
        assert_eq!(le_u16(&buffer, 28), 8);

        let back = read_bmp(Cursor::new(buffer)).unwrap();
        assert_eq!(back.get_pixel(1, 0), Some(Color::bgr(127, 127, 127)));
        assert_eq!(back.get_pixel(2, 1), Some(Color::bgr(3, 3, 3)));
    }

    /// 54-byte file and info header with nothing after it.
    fn bare_header(
        width: i32,
        height: i32,
        bits_per_pixel: u16,
        info_size: u32,
        used: u32,
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"BM");
        data.extend_from_slice(&54u32.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(&54u32.to_le_bytes());
        data.extend_from_slice(&info_size.to_le_bytes());
        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&bits_per_pixel.to_le_bytes());
        data.extend_from_slice(&[0u8; 16]);
        data.extend_from_slice(&used.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        assert_eq!(data.len(), 54);
        data
    }

    #[test]
    fn test_bmp_huge_dimensions_without_data() {
        let data = bare_header(0x7fff_ffff, 0x7fff_ffff, 24, 40, 0);
        assert!(matches!(
            read_bmp(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));

        let data = bare_header(0x7fff_ffff, 1, 1, 40, 0);
        assert!(read_bmp(Cursor::new(data)).is_err());
    }

    #[test]
    fn test_bmp_oversized_header_and_palette() {
        let data = bare_header(2, 2, 24, u32::MAX, 0);
        assert!(matches!(
            read_bmp(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));

        let data = bare_header(2, 2, 8, 40, u32::MAX);
        assert!(matches!(
            read_bmp(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_bmp_rejects_bad_magic() {
        let data = vec![b'X'; 64];
        assert!(matches!(
            read_bmp(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }
}
