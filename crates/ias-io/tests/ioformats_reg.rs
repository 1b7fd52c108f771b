//! Image I/O regression test
//!
//! Writes synthetic masks and images in every supported format, reads
//! them back and checks the decoded pixels.
//!
//! Run with:
//! ```
//! cargo test -p ias-io --test ioformats_reg
//! ```

use ias_core::{Color, Image, Mask};
use ias_io::{ImageFormat, IoError, read_image, read_image_mem, write_image, write_mask};
use ias_test::{RegParams, regout_dir};
use std::fs;

fn gradient_mask() -> Mask {
    let (w, h) = (37u32, 21u32);
    let data = (0..w * h).map(|i| ((i % w) * 7 + (i / w) * 3) as u8).collect();
    Mask::from_vec(w, h, data).unwrap()
}

fn patch_image() -> Image {
    let mut image = Image::filled(33, 17, Color::bgr(240, 240, 240))
        .unwrap()
        .try_into_mut()
        .unwrap();
    image.fill_rect(4, 3, 20, 12, Color::bgr(30, 60, 200));
    image.fill_rect(22, 0, 33, 17, Color::bgr(0, 128, 0));
    image.into()
}

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");

    let outdir = regout_dir();
    fs::create_dir_all(&outdir).expect("Failed to create output directory");

    let mask = gradient_mask();
    let image = patch_image();

    for format in [ImageFormat::Png, ImageFormat::Bmp, ImageFormat::Pnm] {
        eprintln!("Lossless format: {:?}", format);
        rp.write_mask_and_check(&mask, format)
            .expect("write mask");

        let path = format!("{}/ioformats_mask.{}", outdir, format.extension());
        assert!(write_mask(&mask, &path).unwrap());
        let back = read_image(&path).unwrap();
        rp.compare_values(mask.width() as f64, back.width() as f64, 0.0);
        let gray_matches = back
            .data()
            .iter()
            .zip(mask.data())
            .all(|(c, &v)| *c == Color::bgr(v, v, v));
        rp.compare_values(1.0, if gray_matches { 1.0 } else { 0.0 }, 0.0);

        let path = format!("{}/ioformats_image.{}", outdir, format.extension());
        write_image(&image, &path).unwrap();
        let back = read_image(&path).unwrap();
        rp.compare_values(
            1.0,
            if back.data() == image.data() { 1.0 } else { 0.0 },
            0.0,
        );
    }

    // JPEG is lossy: check that a flat color survives approximately.
    let flat = Image::filled(32, 16, Color::bgr(30, 60, 200)).unwrap();
    let path = format!("{}/ioformats_image.jpg", outdir);
    write_image(&flat, &path).unwrap();
    let back = read_image(&path).unwrap();
    rp.compare_values(32.0, back.width() as f64, 0.0);
    let center = back.get_pixel(11, 7).unwrap();
    rp.compare_values(200.0, center.red() as f64, 8.0);
    rp.compare_values(30.0, center.blue() as f64, 8.0);

    // Empty masks are skipped, not written.
    let path = format!("{}/ioformats_empty.png", outdir);
    let _ = fs::remove_file(&path);
    assert!(!write_mask(&Mask::empty(), &path).unwrap());
    rp.compare_values(0.0, if fs::metadata(&path).is_ok() { 1.0 } else { 0.0 }, 0.0);

    // Headers claiming more pixels than the file holds fail to load.
    let mut bmp = b"BM".to_vec();
    bmp.extend_from_slice(&54u32.to_le_bytes());
    bmp.extend_from_slice(&[0u8; 4]);
    bmp.extend_from_slice(&54u32.to_le_bytes());
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&0x7fff_ffffi32.to_le_bytes());
    bmp.extend_from_slice(&0x7fff_ffffi32.to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&24u16.to_le_bytes());
    bmp.extend_from_slice(&[0u8; 24]);
    assert!(matches!(read_image_mem(&bmp), Err(IoError::InvalidData(_))));

    let mut pnm = b"P6\n4000000000 4000000000\n255\n".to_vec();
    pnm.extend_from_slice(&[7u8; 30]);
    assert!(matches!(read_image_mem(&pnm), Err(IoError::InvalidData(_))));

    let path = format!("{}/ioformats_truncated.pgm", outdir);
    fs::write(&path, b"P5\n64 64\n255\n\x01\x02\x03").unwrap();
    assert!(read_image(&path).is_err());

    // Missing and unsupported files fail to load.
    assert!(read_image(format!("{}/does_not_exist.png", outdir)).is_err());
    assert!(write_mask(&mask, format!("{}/mask.tiff", outdir)).is_err());

    assert!(rp.cleanup(), "ioformats regression test failed");
}
