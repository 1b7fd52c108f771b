//! Region analysis session
//!
//! A [`RegionAnalyzer`] owns at most one source image and one result mask.
//! Every mask-producing operation first invalidates the result, then runs
//! its pipeline; a failed precondition leaves the result empty and is
//! logged at `debug` level instead of being returned.

use crate::display::{DisplaySink, join};
use crate::error::{AnalysisError, AnalysisResult};
use ias_core::{Color, Image, Mask, Point};
use ias_filter::{Kernel, MorphOptions, apply_kernel, detect_edges, dilate, erode, threshold};
use ias_region::{FillValues, binarize, floodfill};
use std::path::Path;

/// Cutoff applied after the blur in [`RegionAnalyzer::find_smooth_perimeter`]
pub const BLUR_CUTOFF: u8 = 100;

/// Cutoff applied to the smoothed edge response
pub const FINAL_CUTOFF: u8 = 64;

/// Tunables for the smoothed perimeter pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothPerimeterOptions {
    /// Options for each erode and dilate pass
    pub open_close: MorphOptions,
    /// Cutoff applied to the blurred mask
    pub blur_cutoff: u8,
    /// Cutoff applied to the edge response
    pub final_cutoff: u8,
}

impl Default for SmoothPerimeterOptions {
    fn default() -> Self {
        Self {
            open_close: MorphOptions::default(),
            blur_cutoff: BLUR_CUTOFF,
            final_cutoff: FINAL_CUTOFF,
        }
    }
}

impl SmoothPerimeterOptions {
    pub fn with_open_close(mut self, options: MorphOptions) -> Self {
        self.open_close = options;
        self
    }

    pub fn with_blur_cutoff(mut self, cutoff: u8) -> Self {
        self.blur_cutoff = cutoff;
        self
    }

    pub fn with_final_cutoff(mut self, cutoff: u8) -> Self {
        self.final_cutoff = cutoff;
        self
    }
}

/// Source image plus the mask produced by the last find operation.
#[derive(Debug, Default)]
pub struct RegionAnalyzer {
    source: Option<Image>,
    result: Mask,
}

impl RegionAnalyzer {
    /// Create an analyzer with no image and an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the source image from a file.
    ///
    /// The result mask is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Io`] if the file cannot be decoded. The
    /// previous source image is dropped in that case.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> AnalysisResult<()> {
        let path = path.as_ref();
        match ias_io::read_image(path) {
            Ok(image) => {
                tracing::debug!(path = %path.display(), "source image replaced");
                self.source = Some(image);
                Ok(())
            }
            Err(e) => {
                self.source = None;
                Err(e.into())
            }
        }
    }

    /// Replace the source image.
    pub fn set_image(&mut self, image: Image) {
        self.source = Some(image);
    }

    /// Current source image, if any.
    pub fn image(&self) -> Option<&Image> {
        self.source.as_ref()
    }

    /// Mask produced by the last find operation; empty if it failed.
    pub fn result(&self) -> &Mask {
        &self.result
    }

    /// Color of the source pixel at `point`.
    ///
    /// Returns [`Color::ZERO`] without a source image, for negative
    /// coordinates, and on the last column and last row.
    pub fn sample_color(&self, point: Point) -> Color {
        let Some(image) = &self.source else {
            return Color::ZERO;
        };
        if point.x < 0
            || point.y < 0
            || point.x as i64 >= image.width() as i64 - 1
            || point.y as i64 >= image.height() as i64 - 1
        {
            return Color::ZERO;
        }
        image.get_pixel_unchecked(point.x as u32, point.y as u32)
    }

    /// Select the region of pixels within `tolerance` of `color` that is
    /// 4-connected to `seed`.
    ///
    /// On success the result holds 255 for region pixels and 0 elsewhere.
    pub fn find_region(&mut self, seed: Point, color: Color, tolerance: u8) {
        self.result.invalidate();
        let outcome = self.region_mask(seed, color, tolerance);
        self.store(outcome, "region");
    }

    /// Replace the result with the sharp outline of the current result.
    pub fn find_perimeter(&mut self) {
        let input = self.result.clone();
        self.find_perimeter_of(&input);
    }

    /// Replace the result with the sharp outline of `input`.
    pub fn find_perimeter_of(&mut self, input: &Mask) {
        self.result.invalidate();
        let outcome = self.perimeter_mask(input);
        self.store(outcome, "perimeter");
    }

    /// Replace the result with the smoothed outline of the current result.
    pub fn find_smooth_perimeter(&mut self) {
        let input = self.result.clone();
        self.find_smooth_perimeter_with(&input, &SmoothPerimeterOptions::default());
    }

    /// Replace the result with the smoothed outline of `input`.
    pub fn find_smooth_perimeter_of(&mut self, input: &Mask) {
        self.find_smooth_perimeter_with(input, &SmoothPerimeterOptions::default());
    }

    /// Smoothed outline of `input` with explicit tunables.
    ///
    /// The mask is opened and closed to drop specks and fill pinholes,
    /// blurred and re-binarized to round corners, then edge detected.
    pub fn find_smooth_perimeter_with(&mut self, input: &Mask, options: &SmoothPerimeterOptions) {
        self.result.invalidate();
        let outcome = self.smooth_perimeter_mask(input, options);
        self.store(outcome, "smooth perimeter");
    }

    /// Write the result mask to `path`.
    ///
    /// Returns `Ok(false)` without touching the file system if the result
    /// is empty.
    pub fn store_result<P: AsRef<Path>>(&self, path: P) -> AnalysisResult<bool> {
        let path = path.as_ref();
        let written = ias_io::write_mask(&self.result, path)?;
        if written {
            tracing::debug!(path = %path.display(), "result stored");
        } else {
            tracing::debug!(path = %path.display(), "empty result not stored");
        }
        Ok(written)
    }

    /// Show the source image. Returns `Ok(false)` if there is none.
    pub fn display_image(&self, sink: &mut dyn DisplaySink) -> AnalysisResult<bool> {
        match &self.source {
            Some(image) => {
                sink.show_image("image", image)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show the result mask. Returns `Ok(false)` if it is empty.
    pub fn display_result(&self, sink: &mut dyn DisplaySink) -> AnalysisResult<bool> {
        if self.result.is_empty() {
            return Ok(false);
        }
        sink.show_mask("result", &self.result)?;
        Ok(true)
    }

    /// Show the source image and the result side by side.
    ///
    /// Returns `Ok(false)` if either is missing.
    pub fn display_join(&self, sink: &mut dyn DisplaySink) -> AnalysisResult<bool> {
        let Some(image) = &self.source else {
            return Ok(false);
        };
        if self.result.is_empty() {
            return Ok(false);
        }
        sink.show_image("join", &join(image, &self.result)?)?;
        Ok(true)
    }

    fn store(&mut self, outcome: AnalysisResult<Mask>, stage: &str) {
        match outcome {
            Ok(mask) => {
                tracing::trace!(stage, foreground = mask.count_value(255), "result updated");
                self.result = mask;
            }
            Err(e) => tracing::debug!(stage, error = %e, "result cleared"),
        }
    }

    fn source(&self) -> AnalysisResult<&Image> {
        self.source.as_ref().ok_or(AnalysisError::NoImage)
    }

    fn region_mask(&self, seed: Point, color: Color, tolerance: u8) -> AnalysisResult<Mask> {
        let image = self.source()?;
        if seed.x < 0 || seed.y < 0 {
            return Err(AnalysisError::SeedOutOfRange {
                x: seed.x,
                y: seed.y,
            });
        }

        let values = FillValues::default();
        let mut mask = binarize(image, color, tolerance)?;
        tracing::debug!(matching = mask.count_value(255), "binarized");

        floodfill(&mut mask, seed.x as u32, seed.y as u32, &values)?;
        mask.change_color(values.target, values.seed);
        Ok(mask)
    }

    /// Check that `input` is usable against the current source image.
    fn check_input(&self, input: &Mask) -> AnalysisResult<()> {
        let image = self.source()?;
        if input.is_empty() {
            return Err(AnalysisError::EmptyMask);
        }
        if input.dimensions() != image.dimensions() {
            return Err(AnalysisError::DimensionMismatch {
                expected: image.dimensions(),
                actual: input.dimensions(),
            });
        }
        Ok(())
    }

    fn perimeter_mask(&self, input: &Mask) -> AnalysisResult<Mask> {
        self.check_input(input)?;
        let mut mask = input.clone();
        detect_edges(&mut mask);
        Ok(mask)
    }

    fn smooth_perimeter_mask(
        &self,
        input: &Mask,
        options: &SmoothPerimeterOptions,
    ) -> AnalysisResult<Mask> {
        self.check_input(input)?;
        let mut mask = input.clone();

        // open, then close
        erode(&mut mask, &options.open_close)?;
        dilate(&mut mask, &options.open_close)?;
        dilate(&mut mask, &options.open_close)?;
        erode(&mut mask, &options.open_close)?;
        tracing::debug!(foreground = mask.count_value(255), "opened and closed");

        apply_kernel(&mut mask, &Kernel::gaussian_3x3());
        threshold(&mut mask, options.blur_cutoff);

        detect_edges(&mut mask);
        threshold(&mut mask, options.final_cutoff);
        Ok(mask)
    }
}
