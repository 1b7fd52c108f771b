//! Correlation kernels
//!
//! Defines the weight grid used by [`correlate`](crate::correlate()).
//! A kernel has odd width and height and its center sits at
//! `(width / 2, height / 2)`. The zero-sized kernel is valid and makes
//! correlation a no-op.

use crate::{FilterError, FilterResult};

/// A 2D correlation kernel with `f64` weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create the empty kernel.
    pub const fn empty() -> Self {
        Kernel {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Create a zero-valued kernel with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is zero
    /// or even.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        Self::filled(width, height, 0.0)
    }

    /// Create a kernel with every weight set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is zero
    /// or even.
    pub fn filled(width: u32, height: u32, value: f64) -> FilterResult<Self> {
        check_dimensions(width, height)?;
        Ok(Kernel {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }

    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] for zero or even dimensions,
    /// or if `data.len() != width * height`.
    pub fn from_slice(width: u32, height: u32, data: &[f64]) -> FilterResult<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "expected {expected} weights for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Kernel {
            width,
            height,
            data: data.to_vec(),
        })
    }

    /// Create a `size x size` kernel of ones (not normalized).
    pub fn ones(size: u32) -> FilterResult<Self> {
        Self::filled(size, size, 1.0)
    }

    /// 3x3 Laplacian: -1 everywhere, +8 at the center. Weights sum to 0.
    pub fn laplacian() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: vec![
                -1.0, -1.0, -1.0, //
                -1.0, 8.0, -1.0, //
                -1.0, -1.0, -1.0,
            ],
        }
    }

    /// 3x3 binomial blur `[[1,2,1],[2,4,2],[1,2,1]] / 16`.
    pub fn gaussian_3x3() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: vec![
                1.0, 2.0, 1.0, //
                2.0, 4.0, 2.0, //
                1.0, 2.0, 1.0,
            ],
        }
        .scaled(1.0 / 16.0)
    }

    /// Multiply every weight by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for w in &mut self.data {
            *w *= factor;
        }
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.width / 2
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.height / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get a weight at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a weight at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Get the sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

fn check_dimensions(width: u32, height: u32) -> FilterResult<()> {
    if width == 0 || height == 0 || width % 2 == 0 || height % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "dimensions must be odd and non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}
