//! Result previews
//!
//! The analyzer hands images and masks to a [`DisplaySink`] rather than
//! opening windows itself. [`FileDisplay`] writes one PNG per label, which
//! works in headless environments.

use crate::error::{AnalysisError, AnalysisResult};
use ias_core::{Color, Image, Mask};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for previews
pub trait DisplaySink {
    /// Show a source image under `label`.
    fn show_image(&mut self, label: &str, image: &Image) -> AnalysisResult<()>;

    /// Show a mask under `label`.
    fn show_mask(&mut self, label: &str, mask: &Mask) -> AnalysisResult<()>;
}

/// Writes each preview to `<dir>/<label>.png`
#[derive(Debug, Clone)]
pub struct FileDisplay {
    dir: PathBuf,
}

impl FileDisplay {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a preview with `label` is written to.
    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{label}.png"))
    }

    fn prepare(&self) -> AnalysisResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AnalysisError::Display(format!("cannot create {}: {}", self.dir.display(), e))
        })
    }
}

impl DisplaySink for FileDisplay {
    fn show_image(&mut self, label: &str, image: &Image) -> AnalysisResult<()> {
        self.prepare()?;
        let path = self.path_for(label);
        ias_io::write_image(image, &path)?;
        tracing::info!(path = %path.display(), "{label} written");
        Ok(())
    }

    fn show_mask(&mut self, label: &str, mask: &Mask) -> AnalysisResult<()> {
        self.prepare()?;
        let path = self.path_for(label);
        if ias_io::write_mask(mask, &path)? {
            tracing::info!(path = %path.display(), "{label} written");
        }
        Ok(())
    }
}

/// Place `image` on the left and `mask` (as gray) on the right.
///
/// The joined image is as tall as the taller input; uncovered pixels are
/// black.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyMask`] if `mask` is empty.
pub fn join(image: &Image, mask: &Mask) -> AnalysisResult<Image> {
    if mask.is_empty() {
        return Err(AnalysisError::EmptyMask);
    }

    let left = image.width() as usize;
    let width = image.width() + mask.width();
    let height = image.height().max(mask.height());
    let stride = width as usize;
    let mut colors = vec![Color::ZERO; stride * height as usize];

    for y in 0..image.height() {
        let start = y as usize * stride;
        colors[start..start + left].copy_from_slice(image.row(y));
    }
    for y in 0..mask.height() {
        let start = y as usize * stride + left;
        for (dst, &v) in colors[start..].iter_mut().zip(mask.row(y)) {
            *dst = Color::bgr(v, v, v);
        }
    }

    Ok(Image::from_colors(width, height, colors)?)
}
