//! PNM (Portable Any Map) format support
//!
//! Reads and writes PGM (P5 binary) and PPM (P6 binary). Samples with a
//! maximum value other than 255 are rescaled to 8 bits on read; 16-bit
//! samples are big-endian as the format requires.

use crate::{IoError, IoResult, Raster, checked_size, read_payload};
use ias_core::{Color, Image};
use std::io::{BufRead, Write};

/// Read the next whitespace-separated header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            break;
        }
        match byte[0] {
            b'#' if token.is_empty() => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            b => token.push(b as char),
        }
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PNM header".to_string()));
    }
    Ok(token)
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: '{}'", what, token)))
}

/// Read a PNM image (P5/P6) from a reader.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Image> {
    let magic = read_token(&mut reader)?;
    let channels = match magic.as_str() {
        "P5" => 1,
        "P6" => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM variant: {}",
                other
            )));
        }
    };

    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PNM maxval: {}", maxval)));
    }

    let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
    let raw_size = checked_size(
        &[width as usize, height as usize, channels, bytes_per_sample],
        "PNM sample data",
    )?;
    let raw = read_payload(&mut reader, raw_size, "PNM sample data")?;

    let samples: Vec<u8> = if bytes_per_sample == 2 {
        raw.chunks_exact(2)
            .map(|s| scale(u16::from_be_bytes([s[0], s[1]]) as u32, maxval))
            .collect()
    } else if maxval == 255 {
        raw
    } else {
        raw.into_iter().map(|s| scale(s as u32, maxval)).collect()
    };

    let colors = if channels == 1 {
        samples.iter().map(|&v| Color::bgr(v, v, v)).collect()
    } else {
        samples
            .chunks_exact(3)
            .map(|px| Color::bgr(px[2], px[1], px[0]))
            .collect()
    };

    Ok(Image::from_colors(width, height, colors)?)
}

/// Rescale a sample in `0..=maxval` to `0..=255`.
fn scale(value: u32, maxval: u32) -> u8 {
    ((value.min(maxval) * 255 + maxval / 2) / maxval) as u8
}

/// Write a binary PNM: P5 for masks, P6 for images.
pub(crate) fn write_pnm<W: Write>(raster: Raster<'_>, mut writer: W) -> IoResult<()> {
    let magic = match raster {
        Raster::Gray(_) => "P5",
        Raster::Color(_) => "P6",
    };
    write!(writer, "{}\n{} {}\n255\n", magic, raster.width(), raster.height())?;

    let mut row = Vec::new();
    for y in 0..raster.height() {
        raster.row_rgb(y, &mut row);
        writer.write_all(&row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_p5_with_comment() {
        let mut data = b"P5\n# made by hand\n3 1\n255\n".to_vec();
        data.extend_from_slice(&[0, 128, 255]);
        let image = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(image.dimensions(), (3, 1));
        assert_eq!(image.get_pixel(1, 0), Some(Color::bgr(128, 128, 128)));
    }

    #[test]
    fn test_read_p6_channel_order() {
        let mut data = b"P6 1 1 255\n".to_vec();
        data.extend_from_slice(&[10, 20, 30]);
        let image = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(image.get_pixel(0, 0), Some(Color::bgr(30, 20, 10)));
    }

    #[test]
    fn test_read_rescales_maxval() {
        let mut data = b"P5\n2 1\n15\n".to_vec();
        data.extend_from_slice(&[15, 0]);
        let image = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(image.get_pixel(0, 0).map(Color::red), Some(255));

        let mut data = b"P5\n1 1\n65535\n".to_vec();
        data.extend_from_slice(&[0x80, 0x00]);
        let image = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(image.get_pixel(0, 0).map(Color::red), Some(128));
    }

    #[test]
    fn test_truncated_data() {
        let mut data = b"P5\n4 4\n255\n".to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        assert!(read_pnm(Cursor::new(data)).is_err());
        assert!(read_pnm(Cursor::new(b"P5\n4".to_vec())).is_err());
    }

    #[test]
    fn test_huge_dimensions() {
        let mut data = b"P6\n4000000000 4000000000\n255\n".to_vec();
        data.extend_from_slice(&[0; 12]);
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));

        let data = b"P5\n65535 65535\n65535\n\x00\x01".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_write_header() {
        let image = Image::filled(2, 1, Color::bgr(3, 2, 1)).unwrap();
        let mut buffer = Vec::new();
        write_pnm(Raster::Color(&image), &mut buffer).unwrap();
        assert_eq!(&buffer[..11], b"P6\n2 1\n255\n");
        assert_eq!(&buffer[11..], &[1, 2, 3, 1, 2, 3]);
    }
}
