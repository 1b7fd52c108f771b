//! Mask - Single-channel 8-bit intensity buffer
//!
//! A `Mask` is the unit every region/perimeter operation reads, mutates or
//! replaces. It is either *empty* (0x0, meaning "no result") or has
//! strictly positive width and height.
//!
//! Unlike [`Image`](crate::Image), a mask is plainly owned: operations
//! take `&mut Mask` or return a fresh `Mask`, and a failed operation
//! leaves an empty mask behind rather than a partially updated one.

use crate::error::{Error, Result};

/// Single-channel 8-bit intensity grid.
///
/// # Examples
///
/// ```
/// use ias_core::Mask;
///
/// let mut mask = Mask::new(3, 3).unwrap();
/// mask.set(1, 1, 255).unwrap();
/// assert_eq!(mask.get(1, 1), Some(255));
/// assert_eq!(mask.count_value(0), 8);
///
/// mask.invalidate();
/// assert!(mask.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Create an empty mask ("no result").
    #[inline]
    pub const fn empty() -> Self {
        Mask {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Create a zero-filled mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, 0)
    }

    /// Create a mask with every pixel set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Mask {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }

    /// Create a mask from row-major intensity values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::DataLength`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
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
        Ok(Mask {
            width,
            height,
            data,
        })
    }

    /// Create a zero-filled mask with the same dimensions as `self`.
    ///
    /// An empty mask yields an empty template.
    pub fn create_template(&self) -> Self {
        Mask {
            width: self.width,
            height: self.height,
            data: vec![0; self.data.len()],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check whether this mask holds no result.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop the pixel data, leaving an empty mask.
    pub fn invalidate(&mut self) {
        *self = Mask::empty();
    }

    /// Check that this mask is non-empty and sized `width x height`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] for an empty mask and
    /// [`Error::DimensionMismatch`] if the sizes differ.
    pub fn check_size(&self, width: u32, height: u32) -> Result<()> {
        if self.is_empty() {
            return Err(Error::NullInput("mask"));
        }
        if self.width != width || self.height != height {
            return Err(Error::DimensionMismatch {
                expected: (width, height),
                actual: (self.width, self.height),
            });
        }
        Ok(())
    }

    /// Get a value at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_unchecked(x, y))
    }

    /// Get a value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set a value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_unchecked(x, y, value);
        Ok(())
    }

    /// Set a value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the buffer.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: u8) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = value;
    }

    /// Get one row of values.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// Get one row of values mutably.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.data[start..start + w]
    }

    /// Get raw access to the values.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable access to the values.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Replace every occurrence of `from` with `to`.
    pub fn change_color(&mut self, from: u8, to: u8) {
        for value in self.data.iter_mut().filter(|v| **v == from) {
            *value = to;
        }
    }

    /// Count the pixels holding exactly `value`.
    pub fn count_value(&self, value: u8) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }
}
