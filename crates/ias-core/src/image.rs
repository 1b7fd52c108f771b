//! Image - The source raster container
//!
//! `Image` holds the 3-channel, 8-bit pixel grid that region analysis reads
//! from. Pixels are stored row-major as [`Color`] triplets in the channel
//! order produced by the loader (B, G, R); no color-space conversion is
//! ever applied.
//!
//! # Ownership model
//!
//! `Image` uses `Arc` for cheap cloning (shared ownership). To build or
//! modify pixel data, use [`ImageMut`] (via [`Image::try_into_mut`] or
//! [`Image::to_mut`]) and convert back with `Into<Image>`.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Three-channel 8-bit color sample.
///
/// Channels are kept in storage order; the loader produces B, G, R, so
/// index 0 is blue, 1 is green and 2 is red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// The zero triplet, returned for samples outside the valid range.
    pub const ZERO: Color = Color([0, 0, 0]);

    /// Create a color from blue, green and red components.
    #[inline]
    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Color([b, g, r])
    }

    /// Get the raw channel triplet.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        self.0
    }

    /// Blue component (channel 0).
    #[inline]
    pub fn blue(self) -> u8 {
        self.0[0]
    }

    /// Green component (channel 1).
    #[inline]
    pub fn green(self) -> u8 {
        self.0[1]
    }

    /// Red component (channel 2).
    #[inline]
    pub fn red(self) -> u8 {
        self.0[2]
    }

    /// Check whether every channel differs from `other` by at most
    /// `tolerance`.
    ///
    /// Channels are compared independently and the test stops at the first
    /// channel that exceeds the tolerance.
    #[inline]
    pub fn within_tolerance(self, other: Color, tolerance: u8) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(&a, &b)| a.abs_diff(b) <= tolerance)
    }
}

impl From<[u8; 3]> for Color {
    fn from(channels: [u8; 3]) -> Self {
        Color(channels)
    }
}

/// Pixel coordinate: `x` is the column, `y` the row.
///
/// Signed so that callers can express (and the analyzer can reject)
/// coordinates left of or above the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Internal image data
#[derive(Debug)]
struct ImageData {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

/// Immutable 3-channel source image.
///
/// # Examples
///
/// ```
/// use ias_core::{Color, Image};
///
/// let image = Image::new(4, 3).unwrap();
/// assert_eq!(image.width(), 4);
/// assert_eq!(image.get_pixel(1, 1), Some(Color::ZERO));
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    inner: Arc<ImageData>,
}

impl Image {
    /// Create a new image filled with the zero color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Color::ZERO)
    }

    /// Create a new image with every pixel set to `color`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = vec![color; width as usize * height as usize];
        Ok(Image {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image from row-major color samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::DataLength`] if `data.len() != width * height`.
    pub fn from_colors(width: u32, height: u32, data: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Image {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image from interleaved B, G, R bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `bytes.len() != width * height * 3`.
    pub fn from_bgr_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(3)
            .map(|c| Color([c[0], c[1], c[2]]))
            .collect();
        Self::from_colors(width, height, data)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get a pixel at (x, y), or `None` if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the pixel buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Color {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Get one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Color] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[Color] {
        &self.inner.data
    }

    /// Get the number of strong references to this image.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<ImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(ImageMut { inner: data }),
            Err(arc) => Err(Image { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> ImageMut {
        ImageMut {
            inner: ImageData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable image
///
/// Used by loaders and tests to build pixel data. Convert back to an
/// immutable [`Image`] using `Into<Image>`.
#[derive(Debug)]
pub struct ImageMut {
    inner: ImageData,
}

impl ImageMut {
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Set a pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        self.set_pixel_unchecked(x, y, color);
        Ok(())
    }

    /// Set a pixel without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the pixel buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, color: Color) {
        let idx = y as usize * self.inner.width as usize + x as usize;
        self.inner.data[idx] = color;
    }

    /// Fill an axis-aligned rectangle `[x0, x1) × [y0, y1)`, clipped to the
    /// image.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        let x1 = x1.min(self.inner.width);
        let y1 = y1.min(self.inner.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel_unchecked(x, y, color);
            }
        }
    }

    /// Get mutable access to the pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Color] {
        &mut self.inner.data
    }
}

impl From<ImageMut> for Image {
    fn from(image: ImageMut) -> Self {
        Image {
            inner: Arc::new(image.inner),
        }
    }
}
