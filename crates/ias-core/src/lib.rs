//! IAS Core - Pixel containers for region analysis
//!
//! This crate provides the data structures shared by every stage of the
//! region analysis engine:
//!
//! - [`Image`] / [`ImageMut`] - 3-channel 8-bit source image (immutable / mutable)
//! - [`Mask`] - Single-channel 8-bit intensity buffer, possibly empty
//! - [`Color`] - Channel triplet in the order the loader produced (B, G, R)
//! - [`Point`] - Signed pixel coordinate (x = column, y = row)

pub mod error;
pub mod image;
pub mod mask;

pub use error::{Error, Result};
pub use image::{Color, Image, ImageMut, Point};
pub use mask::Mask;
