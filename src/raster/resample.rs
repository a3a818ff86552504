//! Resampling a raster from one extent and spatial reference into another

use std::fmt;

use log::{debug, warn};
use rayon::prelude::*;

use super::raster_trait::Raster;
use crate::coordinate::{GeoExtent, GeoTransform, SpatialReference};
use crate::errors::{WarpError, WarpResult};

/// How a destination pixel is read from the source raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResamplingMode {
    /// Source pixel containing the sample point
    #[default]
    Nearest,
    /// Blend of the four source pixels around the sample point
    Bilinear,
}

impl ResamplingMode {
    /// Parse a resampling mode name (case-insensitive)
    pub fn from_name(name: &str) -> WarpResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "nearest" => Ok(ResamplingMode::Nearest),
            "bilinear" => Ok(ResamplingMode::Bilinear),
            other => Err(WarpError::ParseError(format!("Unknown resampling mode: {}", other))),
        }
    }
}

impl fmt::Display for ResamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResamplingMode::Nearest => write!(f, "nearest"),
            ResamplingMode::Bilinear => write!(f, "bilinear"),
        }
    }
}

/// Output size and sampling behaviour of a `Resampler`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleOptions {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Sampling mode
    pub mode: ResamplingMode,
    /// Spread output rows over the rayon thread pool
    pub parallel: bool,
}

impl ResampleOptions {
    /// Output size used when nothing else is configured
    pub const DEFAULT_SIZE: u32 = 256;

    /// Options for a `width` x `height` output with default sampling
    pub fn new(width: u32, height: u32) -> Self {
        ResampleOptions {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: ResamplingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for ResampleOptions {
    fn default() -> Self {
        ResampleOptions {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            mode: ResamplingMode::Nearest,
            parallel: true,
        }
    }
}

/// Per-row sampling counters, summed for the debug log
#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    transform_failures: usize,
    out_of_range: usize,
}

/// Everything a worker needs to fill one output row
struct SampleJob<'a, R: Raster> {
    source: &'a R,
    source_srs: &'a dyn SpatialReference,
    dest_srs: &'a dyn SpatialReference,
    source_grid: GeoTransform,
    dest_origin: (f64, f64),
    dest_step: (f64, f64),
    width: u32,
    mode: ResamplingMode,
}

/// Fills a destination raster by inverse mapping into a source raster
///
/// For every output pixel the lower-left corner of the pixel is taken as
/// the sample point, transformed into the source spatial reference and
/// looked up in the source raster. Pixels whose transform fails or that
/// fall outside the source are set to the raster's empty sample.
#[derive(Debug, Clone, Default)]
pub struct Resampler {
    options: ResampleOptions,
}

impl Resampler {
    pub fn new(options: ResampleOptions) -> Self {
        Resampler { options }
    }

    pub fn options(&self) -> &ResampleOptions {
        &self.options
    }

    /// Resample `source` (covering `source_extent`) into `dest_extent`
    ///
    /// # Arguments
    /// * `source` - Source raster, row 0 at the southern edge
    /// * `source_extent` - Extent covered by `source`
    /// * `dest_extent` - Extent of the output raster
    ///
    /// # Returns
    /// A raster of the configured size, or `None` if either extent is
    /// invalid, the source is empty or the output size is zero
    pub fn resample<R: Raster>(&self, source: &R, source_extent: &GeoExtent, dest_extent: &GeoExtent) -> Option<R> {
        let (source_srs, dest_srs) = match (source_extent.srs(), dest_extent.srs()) {
            (Some(s), Some(d)) if source_extent.is_valid() && dest_extent.is_valid() => (s, d),
            _ => {
                warn!("Cannot resample between {} and {}", source_extent, dest_extent);
                return None;
            }
        };
        let ResampleOptions { width, height, mode, parallel } = self.options;
        if source.is_empty() || width == 0 || height == 0 {
            warn!("Cannot resample a {}x{} raster into {}x{} pixels",
                  source.width(), source.height(), width, height);
            return None;
        }

        let job = SampleJob {
            source,
            source_srs: source_srs.as_ref(),
            dest_srs: dest_srs.as_ref(),
            source_grid: GeoTransform::grid(source_extent, source.width(), source.height()),
            dest_origin: (dest_extent.x_min(), dest_extent.y_min()),
            dest_step: (dest_extent.width() / width as f64, dest_extent.height() / height as f64),
            width,
            mode,
        };

        debug!("Resampling {}x{} {} pixels into {}x{} ({}, parallel: {})",
               source.width(), source.height(), source_srs.display_name(), width, height, mode, parallel);

        let rows: Vec<(Vec<R::Sample>, RowStats)> = if parallel {
            (0..height).into_par_iter().map(|row| job.sample_row(row)).collect()
        } else {
            (0..height).map(|row| job.sample_row(row)).collect()
        };

        let mut stats = RowStats::default();
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for (row, row_stats) in rows {
            stats.transform_failures += row_stats.transform_failures;
            stats.out_of_range += row_stats.out_of_range;
            samples.extend(row);
        }

        if stats.transform_failures > 0 || stats.out_of_range > 0 {
            debug!("Resampling left {} pixels empty ({} failed transforms, {} outside the source)",
                   stats.transform_failures + stats.out_of_range, stats.transform_failures, stats.out_of_range);
        }

        Some(R::from_samples(width, height, samples))
    }
}

impl<R: Raster> SampleJob<'_, R> {
    fn sample_row(&self, row: u32) -> (Vec<R::Sample>, RowStats) {
        let mut stats = RowStats::default();
        let mut samples = Vec::with_capacity(self.width as usize);
        let dest_y = self.dest_origin.1 + row as f64 * self.dest_step.1;

        for col in 0..self.width {
            let dest_x = self.dest_origin.0 + col as f64 * self.dest_step.0;
            let sample = match self.dest_srs.transform(dest_x, dest_y, self.source_srs) {
                Some((x, y)) => {
                    let pixel = self.source_grid.geo_to_pixel(x, y);
                    self.sample_at(pixel.x, pixel.y).unwrap_or_else(|| {
                        stats.out_of_range += 1;
                        R::empty_sample()
                    })
                },
                None => {
                    stats.transform_failures += 1;
                    R::empty_sample()
                },
            };
            samples.push(sample);
        }

        (samples, stats)
    }

    /// Read the source at a fractional pixel position
    fn sample_at(&self, px: f64, py: f64) -> Option<R::Sample> {
        let cols = self.source.width();
        let rows = self.source.height();
        if !(px >= 0.0 && px < cols as f64 && py >= 0.0 && py < rows as f64) {
            return None;
        }

        let x0 = px as u32;
        let y0 = py as u32;
        match self.mode {
            ResamplingMode::Nearest => Some(self.source.get_sample(x0, y0)),
            ResamplingMode::Bilinear => {
                let x1 = (x0 + 1).min(cols - 1);
                let y1 = (y0 + 1).min(rows - 1);
                let fx = px - x0 as f64;
                let fy = py - y0 as f64;

                let samples = [
                    self.source.get_sample(x0, y0),
                    self.source.get_sample(x1, y0),
                    self.source.get_sample(x0, y1),
                    self.source.get_sample(x1, y1),
                ];
                let weights = [
                    (1.0 - fx) * (1.0 - fy),
                    fx * (1.0 - fy),
                    (1.0 - fx) * fy,
                    fx * fy,
                ];
                Some(R::blend(&samples, &weights))
            },
        }
    }
}
